//! Error and warning types for the corpus model and navigation.

use thiserror::Error;

use super::hierarchy::NodeId;

/// The raw hierarchy violates a naming or depth invariant. Fatal at load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInputError {
	/// A node has no name, or a blank one. `path` is the chain of child
	/// positions from the root, e.g. `root/2/0`.
	#[error("node at {path} has no name")]
	MissingName {
		/// Child positions from the root.
		path: String,
	},
	/// A node sits below the leaf level.
	#[error("node `{name}` is at depth {depth}, deeper than the leaf level")]
	TooDeep {
		/// Name of the offending node.
		name: String,
		/// Its distance from the root.
		depth: usize,
	},
	/// A node carries an article url but is not a leaf.
	#[error("node `{name}` at depth {depth} has an article url but is not a leaf")]
	ArticleAboveLeaf {
		/// Name of the offending node.
		name: String,
		/// Its distance from the root.
		depth: usize,
	},
	/// Two nodes resolve to the same key.
	#[error("duplicate node key `{key}`")]
	DuplicateKey {
		/// The shared id or name.
		key: String,
	},
}

/// Errors surfaced by the loading entry points.
#[derive(Debug, Error)]
pub enum AtlasError {
	/// The hierarchy parsed but broke an invariant.
	#[error("malformed hierarchy: {0}")]
	Malformed(#[from] MalformedInputError),
	/// The text is not a corpus document.
	#[error("failed to parse corpus document: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Which endpoint of a raw edge could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
	/// Only the citing end is unknown.
	Source,
	/// Only the cited end is unknown.
	Target,
	/// Neither end resolves.
	Both,
}

/// A raw edge that referenced an unknown node and was left out of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedEdge {
	/// Raw source reference as written in the data file.
	pub source: String,
	/// Raw target reference as written in the data file.
	pub target: String,
	/// Which of the two failed to resolve.
	pub missing: EdgeEnd,
}

/// A navigation request that cannot be honored. Reported back to the caller
/// as a no-op, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidFocusTransition {
	/// Back with only the root on the stack.
	#[error("already at the root")]
	PastRoot,
	/// The id is not in the hierarchy or the graph.
	#[error("unknown node {0:?}")]
	UnknownNode(NodeId),
	/// A category focus named an entry at another depth.
	#[error("{0:?} is not a category")]
	NotACategory(NodeId),
	/// A subcategory focus named an entry at another depth.
	#[error("{0:?} is not a subcategory")]
	NotASubcategory(NodeId),
	/// The subcategory belongs to a different category.
	#[error("subcategory {subcategory:?} is not a child of category {category:?}")]
	SubcategoryOutsideCategory {
		/// Category named by the focus.
		category: NodeId,
		/// Subcategory named by the focus.
		subcategory: NodeId,
	},
	/// Drill-down on a leaf that has no url.
	#[error("leaf {0:?} has no article to open")]
	LeafWithoutArticle(NodeId),
	/// Drill-down on the entry that is already on top and in focus.
	#[error("{0:?} is already shown")]
	AlreadyShown(NodeId),
}
