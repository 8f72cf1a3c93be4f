//! Focus record with ordered, synchronous subscribers.
//!
//! Listeners never call back into the store. Anything they want to happen
//! next goes into the [`Mailbox`] handed to them, and the caller of
//! [`ViewStateStore::update`] decides when to apply it.

use std::fmt;

use super::focus::Focus;
use super::navigation::Gesture;

/// Returned by `subscribe`; pass it back to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

/// Follow-up gestures posted by listeners during one notification round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mailbox {
	gestures: Vec<Gesture>,
}

impl Mailbox {
	/// Queues `gesture` to run after the current one.
	pub fn post(&mut self, gesture: Gesture) {
		self.gestures.push(gesture);
	}

	/// Whether nothing was posted.
	pub fn is_empty(&self) -> bool {
		self.gestures.is_empty()
	}

	/// Number of posted gestures.
	pub fn len(&self) -> usize {
		self.gestures.len()
	}

	/// Posted gestures in posting order.
	pub fn into_gestures(self) -> Vec<Gesture> {
		self.gestures
	}
}

type Listener = Box<dyn FnMut(&Focus, &mut Mailbox)>;

/// Holds the shared [`Focus`] and the listeners watching it.
pub struct ViewStateStore {
	focus: Focus,
	listeners: Vec<(SubscriptionHandle, Listener)>,
	next_handle: u64,
	revision: u64,
}

impl ViewStateStore {
	/// Starts on `WholeCorpus` at revision zero.
	pub fn new() -> Self {
		Self {
			focus: Focus::WholeCorpus,
			listeners: Vec::new(),
			next_handle: 0,
			revision: 0,
		}
	}

	/// Current focus.
	pub fn focus(&self) -> Focus {
		self.focus
	}

	/// Number of updates published so far.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Replaces the focus and notifies every listener in subscription order.
	pub fn update(&mut self, focus: Focus) -> Mailbox {
		self.focus = focus;
		self.revision += 1;
		let mut mailbox = Mailbox::default();
		for (_, listener) in &mut self.listeners {
			listener(&self.focus, &mut mailbox);
		}
		mailbox
	}

	/// Adds `listener` after the existing ones. It runs on every update.
	pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionHandle
	where
		F: FnMut(&Focus, &mut Mailbox) + 'static,
	{
		let handle = SubscriptionHandle(self.next_handle);
		self.next_handle += 1;
		self.listeners.push((handle, Box::new(listener)));
		handle
	}

	/// `false` when the handle was already gone.
	pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|(h, _)| *h != handle);
		self.listeners.len() != before
	}

	/// Number of live subscriptions.
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}
}

impl Default for ViewStateStore {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for ViewStateStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewStateStore")
			.field("focus", &self.focus)
			.field("listeners", &self.listeners.len())
			.field("revision", &self.revision)
			.finish()
	}
}
