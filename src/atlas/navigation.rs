//! Gesture handling over the ancestry stack and the shared focus.
//!
//! The controller owns both the [`NavigationStack`] (where the treemap is
//! zoomed) and the [`ViewStateStore`] (what both views filter on). Every
//! gesture that changes anything leaves the two pointing at the same
//! hierarchy entry and publishes exactly one focus.

use std::collections::VecDeque;
use std::rc::Rc;

use log::{debug, warn};

use super::config::{AtlasConfig, BackPolicy};
use super::error::InvalidFocusTransition;
use super::focus::Focus;
use super::graph::GraphModel;
use super::hierarchy::{DepthClass, HierarchyModel, NodeId};
use super::store::{Mailbox, SubscriptionHandle, ViewStateStore};

/// A user action from either view or the controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
	/// Zoom into a non-leaf entry; on a leaf, open its article instead.
	DrillDown(NodeId),
	/// Show one node and its citation neighbors.
	SelectSingle(NodeId),
	/// Zoom out one level.
	Back,
	/// Back to the whole corpus.
	Reset,
	/// Jump straight to a focus, as the category dropdowns do.
	JumpTo(Focus),
}

/// Outcome of one gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
	/// The store now holds this focus.
	Published(Focus),
	/// A leaf was drilled into. Nothing changed; the caller opens `url`.
	OpenArticle {
		/// The leaf.
		node: NodeId,
		/// Its article url.
		url: String,
	},
	/// The gesture was a no-op.
	Ignored(InvalidFocusTransition),
}

/// Root-to-current path through the hierarchy. Never empty; the root stays
/// at the bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationStack {
	frames: Vec<NodeId>,
}

impl NavigationStack {
	/// A stack holding only `root`.
	pub fn new(root: NodeId) -> Self {
		Self { frames: vec![root] }
	}

	/// Where the treemap is zoomed.
	pub fn top(&self) -> NodeId {
		self.frames[self.frames.len() - 1]
	}

	/// Bottom frame.
	pub fn root(&self) -> NodeId {
		self.frames[0]
	}

	/// Bottom to top.
	pub fn frames(&self) -> &[NodeId] {
		&self.frames
	}

	/// Number of frames.
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether only the root frame is left.
	pub fn is_at_root(&self) -> bool {
		self.frames.len() == 1
	}

	/// Zooms in on `id`.
	pub fn push(&mut self, id: NodeId) {
		self.frames.push(id);
	}

	/// Pops the top frame unless only the root is left.
	pub fn pop(&mut self) -> Option<NodeId> {
		if self.is_at_root() {
			None
		} else {
			self.frames.pop()
		}
	}

	/// Drops every frame above the root.
	pub fn truncate_to_root(&mut self) {
		self.frames.truncate(1);
	}
}

/// Turns gestures into stack changes and published focuses.
pub struct NavigationController {
	hierarchy: Rc<HierarchyModel>,
	graph: Rc<GraphModel>,
	config: AtlasConfig,
	stack: NavigationStack,
	store: ViewStateStore,
	queue: VecDeque<Gesture>,
}

impl NavigationController {
	/// Starts at the root with `WholeCorpus` and no listeners.
	pub fn new(hierarchy: Rc<HierarchyModel>, graph: Rc<GraphModel>, config: AtlasConfig) -> Self {
		let stack = NavigationStack::new(hierarchy.root());
		Self {
			hierarchy,
			graph,
			config,
			stack,
			store: ViewStateStore::new(),
			queue: VecDeque::new(),
		}
	}

	/// Last published focus.
	pub fn focus(&self) -> Focus {
		self.store.focus()
	}

	/// Where the treemap is zoomed.
	pub fn stack(&self) -> &NavigationStack {
		&self.stack
	}

	/// Read access to the focus store.
	pub fn store(&self) -> &ViewStateStore {
		&self.store
	}

	/// The tree this controller navigates.
	pub fn hierarchy(&self) -> &Rc<HierarchyModel> {
		&self.hierarchy
	}

	/// The citations this controller validates against.
	pub fn graph(&self) -> &Rc<GraphModel> {
		&self.graph
	}

	/// Settings in force.
	pub fn config(&self) -> &AtlasConfig {
		&self.config
	}

	/// Registers a focus listener; see [`ViewStateStore::subscribe`].
	pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionHandle
	where
		F: FnMut(&Focus, &mut Mailbox) + 'static,
	{
		self.store.subscribe(listener)
	}

	/// Removes a listener; `false` when it was already gone.
	pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
		self.store.unsubscribe(handle)
	}

	/// Names along the stack, root first.
	pub fn breadcrumb(&self) -> Vec<(NodeId, &str)> {
		self.stack
			.frames()
			.iter()
			.filter_map(|&id| self.hierarchy.get(id).map(|n| (id, n.name.as_str())))
			.collect()
	}

	/// Treemap tile click.
	pub fn on_drill_down(&mut self, id: NodeId) -> Transition {
		self.submit(Gesture::DrillDown(id))
	}

	/// Graph node click.
	pub fn on_select_single(&mut self, id: NodeId) -> Transition {
		self.submit(Gesture::SelectSingle(id))
	}

	/// Back button.
	pub fn on_back(&mut self) -> Transition {
		self.submit(Gesture::Back)
	}

	/// Reset button.
	pub fn on_reset(&mut self) -> Transition {
		self.submit(Gesture::Reset)
	}

	/// Dropdown selection.
	pub fn on_jump(&mut self, focus: Focus) -> Transition {
		self.submit(Gesture::JumpTo(focus))
	}

	/// Applies `gesture`, then drains whatever follow-ups listeners posted,
	/// in order. Returns the outcome of `gesture` itself.
	pub fn submit(&mut self, gesture: Gesture) -> Transition {
		let first = self.dispatch(gesture);
		let mut budget = self.config.max_cascade;
		while let Some(next) = self.queue.pop_front() {
			if budget == 0 {
				warn!(
					"Cascade limit reached, dropping {} follow-up gestures",
					self.queue.len() + 1
				);
				self.queue.clear();
				break;
			}
			budget -= 1;
			self.dispatch(next);
		}
		first
	}

	fn dispatch(&mut self, gesture: Gesture) -> Transition {
		let transition = self.apply(gesture);
		match &transition {
			Transition::Published(focus) => {
				debug!("{gesture:?} -> {focus:?} (stack depth {})", self.stack.len());
				let mailbox = self.store.update(*focus);
				self.queue.extend(mailbox.into_gestures());
				debug_assert!(self.agrees(), "stack and focus disagree after {gesture:?}");
			}
			Transition::OpenArticle { url, .. } => debug!("{gesture:?} -> open {url}"),
			Transition::Ignored(reason) => warn!("Ignoring {gesture:?}: {reason}"),
		}
		transition
	}

	fn apply(&mut self, gesture: Gesture) -> Transition {
		let result = match gesture {
			Gesture::DrillDown(id) => self.drill_down(id),
			Gesture::SelectSingle(id) => self.select_single(id),
			Gesture::Back => self.back(),
			Gesture::Reset => Ok(self.reset()),
			Gesture::JumpTo(focus) => self.jump_to(focus),
		};
		result.unwrap_or_else(Transition::Ignored)
	}

	fn drill_down(&mut self, id: NodeId) -> Result<Transition, InvalidFocusTransition> {
		let node = self
			.hierarchy
			.get(id)
			.ok_or(InvalidFocusTransition::UnknownNode(id))?;
		if node.is_leaf() {
			return match &node.article_url {
				Some(url) => Ok(Transition::OpenArticle {
					node: id,
					url: url.clone(),
				}),
				None => Err(InvalidFocusTransition::LeafWithoutArticle(id)),
			};
		}
		let focus = Focus::at(&self.hierarchy, id)?;
		if self.stack.top() == id {
			if self.store.focus() == focus {
				return Err(InvalidFocusTransition::AlreadyShown(id));
			}
			// Same frame, wider view: a single node widened to its level.
			return Ok(Transition::Published(focus));
		}
		self.descend_to(id);
		Ok(Transition::Published(focus))
	}

	/// Pushes `id`, plus the entries between the current top and `id` when
	/// the top is one of its ancestors, so the stack stays a hierarchy path.
	fn descend_to(&mut self, id: NodeId) {
		let path = self.hierarchy.ancestors_of(id);
		let below_top = path
			.iter()
			.position(|&a| a == self.stack.top())
			.map_or(&path[path.len() - 1..], |i| &path[i + 1..]);
		for &frame in below_top {
			self.stack.push(frame);
		}
	}

	fn select_single(&mut self, id: NodeId) -> Result<Transition, InvalidFocusTransition> {
		if !self.graph.contains(id) || !self.hierarchy.contains(id) {
			return Err(InvalidFocusTransition::UnknownNode(id));
		}
		if self.stack.top() != id {
			self.stack.push(id);
		}
		Ok(Transition::Published(Focus::SingleNode { node: id }))
	}

	fn back(&mut self) -> Result<Transition, InvalidFocusTransition> {
		let before = self.store.focus();
		let popped = self.stack.pop().ok_or(InvalidFocusTransition::PastRoot)?;
		let mut focus = Focus::at(&self.hierarchy, self.stack.top())?;

		let popped_leaf = self.hierarchy[popped].depth == DepthClass::Leaf;
		let unchanged = self.stack.top() == popped || focus == before;
		if self.config.back_policy == BackPolicy::SkipRepeatedLevel
			&& !popped_leaf
			&& unchanged
			&& self.stack.pop().is_some()
		{
			debug!("Back repeated {popped:?}, popping once more");
			focus = Focus::at(&self.hierarchy, self.stack.top())?;
		}
		Ok(Transition::Published(focus))
	}

	fn reset(&mut self) -> Transition {
		self.stack.truncate_to_root();
		Transition::Published(Focus::WholeCorpus)
	}

	fn jump_to(&mut self, focus: Focus) -> Result<Transition, InvalidFocusTransition> {
		focus.validate(&self.hierarchy, &self.graph)?;
		match focus {
			Focus::WholeCorpus => Ok(self.reset()),
			Focus::SingleNode { node } => self.select_single(node),
			Focus::Category { .. } | Focus::Subcategory { .. } => {
				let target = focus.anchor(self.hierarchy.root());
				if self.stack.top() != target {
					self.descend_to(target);
				}
				Ok(Transition::Published(focus))
			}
		}
	}

	/// Whether the stack top and the published focus name the same entry.
	pub fn agrees(&self) -> bool {
		let top = self.stack.top();
		match self.store.focus() {
			Focus::SingleNode { node } => node == top,
			focus => Focus::at(&self.hierarchy, top) == Ok(focus),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::atlas::fixtures;

	fn controller() -> NavigationController {
		fixtures::philosophy().controller(AtlasConfig::default())
	}

	fn key(c: &NavigationController, k: &str) -> NodeId {
		c.hierarchy().find_by_key(k).unwrap()
	}

	#[test]
	fn drilling_into_a_leaf_opens_its_article() {
		let mut c = controller();
		let leaf = key(&c, "L1");
		let transition = c.on_drill_down(leaf);
		assert_eq!(
			transition,
			Transition::OpenArticle {
				node: leaf,
				url: "https://example.org/aristotle".into()
			}
		);
		assert_eq!(c.focus(), Focus::WholeCorpus);
		assert!(c.stack().is_at_root());
		assert_eq!(c.store().revision(), 0);
	}

	#[test]
	fn leaf_without_article_is_ignored() {
		let mut c = controller();
		let leaf = key(&c, "L3");
		assert_eq!(
			c.on_drill_down(leaf),
			Transition::Ignored(InvalidFocusTransition::LeafWithoutArticle(leaf))
		);
		assert_eq!(c.store().revision(), 0);
	}

	#[test]
	fn back_at_root_publishes_nothing() {
		let mut c = controller();
		assert_eq!(
			c.on_back(),
			Transition::Ignored(InvalidFocusTransition::PastRoot)
		);
		assert_eq!(c.store().revision(), 0);
		assert_eq!(c.stack().frames(), &[c.hierarchy().root()]);
	}

	#[test]
	fn unknown_nodes_are_ignored() {
		let mut c = controller();
		let ghost = NodeId::from_index(500);
		assert_eq!(
			c.on_select_single(ghost),
			Transition::Ignored(InvalidFocusTransition::UnknownNode(ghost))
		);
		assert_eq!(
			c.on_drill_down(ghost),
			Transition::Ignored(InvalidFocusTransition::UnknownNode(ghost))
		);
		assert!(c.stack().is_at_root());
	}

	#[test]
	fn select_single_pushes_only_when_not_on_top() {
		let mut c = controller();
		let ethics = key(&c, "Ethics");
		c.on_drill_down(ethics);
		c.on_select_single(ethics);
		assert_eq!(c.stack().len(), 2);
		assert_eq!(c.focus(), Focus::SingleNode { node: ethics });
		assert!(c.agrees());

		let leaf = key(&c, "L4");
		c.on_select_single(leaf);
		assert_eq!(c.stack().top(), leaf);
		assert_eq!(c.stack().len(), 3);
	}

	#[test]
	fn back_from_a_leaf_returns_to_the_previous_frame() {
		let mut c = controller();
		let (ethics, virtue, l1, l2) = (
			key(&c, "Ethics"),
			key(&c, "Virtue"),
			key(&c, "L1"),
			key(&c, "L2"),
		);
		c.on_drill_down(ethics);
		c.on_drill_down(virtue);
		c.on_select_single(l1);
		c.on_select_single(l2);

		assert_eq!(c.on_back(), Transition::Published(Focus::SingleNode { node: l1 }));
		assert_eq!(
			c.on_back(),
			Transition::Published(Focus::Subcategory {
				category: ethics,
				subcategory: virtue
			})
		);
		assert!(c.agrees());
	}

	#[test]
	fn drilling_into_the_current_top_adds_no_frame() {
		let mut c = controller();
		let (root, ethics) = (c.hierarchy().root(), key(&c, "Ethics"));
		assert_eq!(
			c.on_drill_down(root),
			Transition::Ignored(InvalidFocusTransition::AlreadyShown(root))
		);
		assert_eq!(c.stack().frames(), &[root]);
		assert_eq!(c.store().revision(), 0);

		c.on_drill_down(ethics);
		assert_eq!(
			c.on_drill_down(ethics),
			Transition::Ignored(InvalidFocusTransition::AlreadyShown(ethics))
		);
		assert_eq!(c.stack().len(), 2);
		assert_eq!(c.on_back(), Transition::Published(Focus::WholeCorpus));
	}

	#[test]
	fn drilling_into_a_single_node_frame_widens_without_pushing() {
		let mut c = controller();
		let ethics = key(&c, "Ethics");
		c.on_select_single(ethics);
		assert_eq!(
			c.on_drill_down(ethics),
			Transition::Published(Focus::Category { category: ethics })
		);
		assert_eq!(c.stack().len(), 2);
		assert!(c.agrees());
	}

	#[test]
	fn drilling_two_levels_down_keeps_the_stack_a_path() {
		let mut c = controller();
		let (root, ethics, virtue) = (c.hierarchy().root(), key(&c, "Ethics"), key(&c, "Virtue"));
		assert_eq!(
			c.on_drill_down(virtue),
			Transition::Published(Focus::Subcategory {
				category: ethics,
				subcategory: virtue
			})
		);
		assert_eq!(c.stack().frames(), &[root, ethics, virtue]);
		assert_eq!(c.on_back(), Transition::Published(Focus::Category { category: ethics }));

		// From a category view a leaf tile still opens its article.
		assert!(matches!(
			c.on_drill_down(key(&c, "L1")),
			Transition::OpenArticle { .. }
		));
		assert_eq!(c.stack().frames(), &[root, ethics]);
	}

	#[test]
	fn back_skips_a_repeated_frame() {
		let mut c = controller();
		let ethics = key(&c, "Ethics");
		c.on_drill_down(ethics);
		// Gestures never stack a duplicate; seed one directly.
		c.stack.push(ethics);
		assert_eq!(c.stack().len(), 3);

		assert_eq!(c.on_back(), Transition::Published(Focus::WholeCorpus));
		assert!(c.stack().is_at_root());
	}

	#[test]
	fn single_level_policy_pops_exactly_once() {
		let corpus = fixtures::philosophy();
		let mut c = corpus.controller(AtlasConfig {
			back_policy: BackPolicy::SingleLevel,
			..AtlasConfig::default()
		});
		let ethics = key(&c, "Ethics");
		c.on_drill_down(ethics);
		c.stack.push(ethics);

		assert_eq!(
			c.on_back(),
			Transition::Published(Focus::Category { category: ethics })
		);
		assert_eq!(c.stack().len(), 2);
	}

	#[test]
	fn back_from_single_node_on_a_category_frame_widens() {
		let mut c = controller();
		let ethics = key(&c, "Ethics");
		c.on_select_single(ethics);
		assert_eq!(c.stack().frames(), &[c.hierarchy().root(), ethics]);
		assert_eq!(c.on_back(), Transition::Published(Focus::WholeCorpus));
	}

	#[test]
	fn jump_validates_and_moves_the_stack() {
		let mut c = controller();
		let (ethics, logic, applied) = (key(&c, "Ethics"), key(&c, "cat-logic"), key(&c, "Applied"));

		let bad = Focus::Subcategory {
			category: logic,
			subcategory: applied,
		};
		assert!(matches!(c.on_jump(bad), Transition::Ignored(_)));
		assert!(c.stack().is_at_root());

		let good = Focus::Subcategory {
			category: ethics,
			subcategory: applied,
		};
		assert_eq!(c.on_jump(good), Transition::Published(good));
		assert_eq!(c.stack().frames(), &[c.hierarchy().root(), ethics, applied]);
		c.on_jump(good);
		assert_eq!(c.stack().len(), 3);

		assert_eq!(c.on_jump(Focus::WholeCorpus), Transition::Published(Focus::WholeCorpus));
		assert!(c.stack().is_at_root());
	}

	#[test]
	fn follow_ups_run_after_the_current_round_in_order() {
		let mut c = controller();
		let ethics = key(&c, "Ethics");
		let seen = Rc::new(RefCell::new(Vec::new()));

		let log = seen.clone();
		c.subscribe(move |focus, mailbox| {
			log.borrow_mut().push(*focus);
			if let Focus::Category { .. } = focus {
				mailbox.post(Gesture::SelectSingle(ethics));
			}
		});

		let first = c.on_drill_down(ethics);
		assert_eq!(first, Transition::Published(Focus::Category { category: ethics }));
		assert_eq!(
			*seen.borrow(),
			vec![
				Focus::Category { category: ethics },
				Focus::SingleNode { node: ethics }
			]
		);
		assert_eq!(c.focus(), Focus::SingleNode { node: ethics });
		assert!(c.agrees());
	}

	#[test]
	fn cascades_are_bounded() {
		let corpus = fixtures::philosophy();
		let mut c = corpus.controller(AtlasConfig {
			max_cascade: 3,
			..AtlasConfig::default()
		});
		c.subscribe(|_, mailbox| mailbox.post(Gesture::Reset));

		c.on_reset();
		assert_eq!(c.store().revision(), 4);
		assert_eq!(c.focus(), Focus::WholeCorpus);
	}

	#[test]
	fn breadcrumb_names_the_stack() {
		let mut c = controller();
		c.on_drill_down(key(&c, "Ethics"));
		c.on_drill_down(key(&c, "Virtue"));
		let names: Vec<_> = c.breadcrumb().into_iter().map(|(_, n)| n).collect();
		assert_eq!(names, vec!["Philosophy", "Ethics", "Virtue"]);
	}
}
