//! Shared navigation state for the treemap and the citation graph.
//!
//! Both views read from one [`Focus`] owned by a [`NavigationController`];
//! gestures from either side go through the controller, which keeps its
//! ancestry stack and the published focus pointing at the same entry.

mod config;
mod error;
mod focus;
mod graph;
mod hierarchy;
mod input;
mod navigation;
mod projection;
mod store;

#[cfg(test)]
mod fixtures;

use std::rc::Rc;

pub use config::{AtlasConfig, BackPolicy};
pub use error::{AtlasError, EdgeEnd, InvalidFocusTransition, MalformedInputError, UnresolvedEdge};
pub use focus::Focus;
pub use graph::{EdgeId, GraphEdge, GraphModel, GraphNode};
pub use hierarchy::{DepthClass, HierarchyModel, HierarchyNode, NodeId};
pub use input::{CorpusDocument, RawEdge, RawNode};
pub use navigation::{Gesture, NavigationController, NavigationStack, Transition};
pub use projection::{
	CategoryOption, GraphProjection, GraphProjector, Tile, TreeProjection, TreeProjector,
	category_options,
};
pub use store::{Mailbox, SubscriptionHandle, ViewStateStore};

/// Both models built from one data file.
#[derive(Clone, Debug)]
pub struct Corpus {
	/// The category tree.
	pub hierarchy: Rc<HierarchyModel>,
	/// Citations resolved against `hierarchy`.
	pub graph: Rc<GraphModel>,
}

impl Corpus {
	/// Builds the hierarchy, then resolves links against it. Links that do
	/// not resolve are dropped and recorded, never fatal.
	pub fn load(document: &CorpusDocument) -> Result<Self, AtlasError> {
		let hierarchy = HierarchyModel::build(&document.hierarchy)?;
		let graph = GraphModel::build(&hierarchy, &document.links);
		Ok(Self {
			hierarchy: Rc::new(hierarchy),
			graph: Rc::new(graph),
		})
	}

	/// Parses and loads a data file in one step.
	pub fn from_json(text: &str) -> Result<Self, AtlasError> {
		Self::load(&CorpusDocument::from_json(text)?)
	}

	/// A fresh session over this corpus.
	pub fn controller(&self, config: AtlasConfig) -> NavigationController {
		NavigationController::new(self.hierarchy.clone(), self.graph.clone(), config)
	}

	/// Graph filter sharing this corpus's models.
	pub fn graph_projector(&self) -> GraphProjector {
		GraphProjector::new(self.hierarchy.clone(), self.graph.clone())
	}

	/// Treemap layout using `config.default_leaf_weight`.
	pub fn tree_projector(&self, config: &AtlasConfig) -> TreeProjector {
		TreeProjector::new(self.hierarchy.clone(), config.default_leaf_weight)
	}
}
