//! The shared record of what both views are looking at.

use super::error::InvalidFocusTransition;
use super::graph::GraphModel;
use super::hierarchy::{DepthClass, HierarchyModel, NodeId};

/// Exactly one of four selections. Replaced as a whole, never patched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Focus {
	/// Nothing selected; everything is shown.
	#[default]
	WholeCorpus,
	/// One top-level category.
	Category {
		/// A depth-1 entry.
		category: NodeId,
	},
	/// One subcategory inside its category.
	Subcategory {
		/// Parent of `subcategory`.
		category: NodeId,
		/// A depth-2 entry.
		subcategory: NodeId,
	},
	/// One entry and its citation neighbors.
	SingleNode {
		/// Any entry, usually a leaf.
		node: NodeId,
	},
}

impl Focus {
	/// Focus for a hierarchy position: root, category and subcategory map to
	/// their filters, a leaf maps to its neighborhood.
	pub fn at(hierarchy: &HierarchyModel, id: NodeId) -> Result<Self, InvalidFocusTransition> {
		let node = hierarchy
			.get(id)
			.ok_or(InvalidFocusTransition::UnknownNode(id))?;
		Ok(match node.depth {
			DepthClass::Root => Self::WholeCorpus,
			DepthClass::Category => Self::Category { category: id },
			DepthClass::Subcategory => Self::Subcategory {
				category: node.parent.ok_or(InvalidFocusTransition::NotASubcategory(id))?,
				subcategory: id,
			},
			DepthClass::Leaf => Self::SingleNode { node: id },
		})
	}

	/// Checks every id names an entry of the right depth, and that a
	/// subcategory sits under its category.
	pub fn validate(
		&self,
		hierarchy: &HierarchyModel,
		graph: &GraphModel,
	) -> Result<(), InvalidFocusTransition> {
		let depth_of = |id: NodeId| {
			hierarchy
				.get(id)
				.map(|n| n.depth)
				.ok_or(InvalidFocusTransition::UnknownNode(id))
		};
		match *self {
			Self::WholeCorpus => Ok(()),
			Self::Category { category } => match depth_of(category)? {
				DepthClass::Category => Ok(()),
				_ => Err(InvalidFocusTransition::NotACategory(category)),
			},
			Self::Subcategory {
				category,
				subcategory,
			} => {
				if depth_of(category)? != DepthClass::Category {
					return Err(InvalidFocusTransition::NotACategory(category));
				}
				if depth_of(subcategory)? != DepthClass::Subcategory {
					return Err(InvalidFocusTransition::NotASubcategory(subcategory));
				}
				if !hierarchy.is_child_of(subcategory, category) {
					return Err(InvalidFocusTransition::SubcategoryOutsideCategory {
						category,
						subcategory,
					});
				}
				Ok(())
			}
			Self::SingleNode { node } if graph.contains(node) => Ok(()),
			Self::SingleNode { node } => Err(InvalidFocusTransition::UnknownNode(node)),
		}
	}

	/// The hierarchy entry this focus points at; the root for the whole
	/// corpus.
	pub fn anchor(&self, root: NodeId) -> NodeId {
		match *self {
			Self::WholeCorpus => root,
			Self::Category { category } => category,
			Self::Subcategory { subcategory, .. } => subcategory,
			Self::SingleNode { node } => node,
		}
	}

	/// Active category for the category dropdown.
	pub fn category(&self) -> Option<NodeId> {
		match *self {
			Self::Category { category } | Self::Subcategory { category, .. } => Some(category),
			_ => None,
		}
	}

	/// Active subcategory for the subcategory dropdown.
	pub fn subcategory(&self) -> Option<NodeId> {
		match *self {
			Self::Subcategory { subcategory, .. } => Some(subcategory),
			_ => None,
		}
	}
}
