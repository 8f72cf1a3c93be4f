//! Per-view projections of the shared focus.

use std::rc::Rc;

use super::focus::Focus;
use super::graph::{EdgeId, GraphModel};
use super::hierarchy::{DepthClass, HierarchyModel, NodeId};
use super::navigation::NavigationStack;

/// Visible part of the citation graph for one focus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphProjection {
	/// The focus this was computed for.
	pub focus: Focus,
	/// Ascending by id.
	pub nodes: Vec<NodeId>,
	/// Edges with both ends visible, in model order.
	pub edges: Vec<EdgeId>,
}

impl GraphProjection {
	/// Whether `id` is visible.
	pub fn contains(&self, id: NodeId) -> bool {
		self.nodes.binary_search(&id).is_ok()
	}

	/// The `limit` most cited visible nodes, most cited first, ties by id.
	pub fn labeled(&self, graph: &GraphModel, limit: usize) -> Vec<NodeId> {
		let mut ranked = self.nodes.clone();
		ranked.sort_by(|a, b| {
			graph
				.incoming_links(*b)
				.cmp(&graph.incoming_links(*a))
				.then(a.cmp(b))
		});
		ranked.truncate(limit);
		ranked
	}
}

/// Filters the graph model down to what the current focus shows. Keeps the
/// last result and reuses it while the focus is unchanged.
pub struct GraphProjector {
	hierarchy: Rc<HierarchyModel>,
	graph: Rc<GraphModel>,
	cache: Option<Rc<GraphProjection>>,
}

impl GraphProjector {
	/// A projector with an empty cache.
	pub fn new(hierarchy: Rc<HierarchyModel>, graph: Rc<GraphModel>) -> Self {
		Self {
			hierarchy,
			graph,
			cache: None,
		}
	}

	/// The projection for `focus`; cached while it stays the same.
	pub fn project(&mut self, focus: &Focus) -> Rc<GraphProjection> {
		if let Some(cached) = &self.cache {
			if cached.focus == *focus {
				return cached.clone();
			}
		}
		let projection = Rc::new(self.compute(focus));
		self.cache = Some(projection.clone());
		projection
	}

	fn compute(&self, focus: &Focus) -> GraphProjection {
		let nodes: Vec<NodeId> = match *focus {
			Focus::WholeCorpus => self.graph.nodes().iter().map(|n| n.id).collect(),
			Focus::Category { category } => self
				.hierarchy
				.iter()
				.filter(|n| n.depth != DepthClass::Root && n.top_category == category)
				.map(|n| n.id)
				.collect(),
			Focus::Subcategory { subcategory, .. } => self
				.hierarchy
				.iter()
				.filter(|n| n.parent == Some(subcategory))
				.map(|n| n.id)
				.collect(),
			Focus::SingleNode { node } => self.graph.neighbors_of(node).into_iter().collect(),
		};

		let mut visible = vec![false; self.graph.nodes().len()];
		for id in &nodes {
			if let Some(slot) = visible.get_mut(id.index()) {
				*slot = true;
			}
		}
		let edges = self
			.graph
			.edges()
			.iter()
			.filter(|e| visible[e.source.index()] && visible[e.target.index()])
			.map(|e| e.id)
			.collect();

		GraphProjection {
			focus: *focus,
			nodes,
			edges,
		}
	}
}

/// One rectangle of the treemap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
	/// Entry shown.
	pub id: NodeId,
	/// Parent entry, `None` for the hierarchy root.
	pub parent: Option<NodeId>,
	/// Depth below the projected subtree root.
	pub relative_depth: usize,
	/// Subtree word count.
	pub weight: u64,
}

/// Tiles under one stack top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeProjection {
	/// The stack top.
	pub root: NodeId,
	/// Set when the root is a leaf; the treemap then shows the article alone.
	pub root_is_article: bool,
	/// Pre-order, siblings heaviest first.
	pub tiles: Vec<Tile>,
}

/// Lays out the treemap for a stack. Shows two levels below the top.
pub struct TreeProjector {
	hierarchy: Rc<HierarchyModel>,
	default_weight: u64,
	max_relative_depth: usize,
}

impl TreeProjector {
	/// `default_weight` stands in for missing word counts.
	pub fn new(hierarchy: Rc<HierarchyModel>, default_weight: u64) -> Self {
		Self {
			hierarchy,
			default_weight,
			max_relative_depth: 2,
		}
	}

	/// The treemap always starts from the top of the stack.
	pub fn subtree_root(stack: &NavigationStack) -> NodeId {
		stack.top()
	}

	/// Tiles for the subtree under the stack top, down to two levels.
	pub fn project(&self, stack: &NavigationStack) -> TreeProjection {
		let root = Self::subtree_root(stack);
		let mut tiles = Vec::new();
		self.collect(root, 0, &mut tiles);
		TreeProjection {
			root,
			root_is_article: self.hierarchy.get(root).is_some_and(|n| n.is_leaf()),
			tiles,
		}
	}

	fn collect(&self, id: NodeId, relative_depth: usize, tiles: &mut Vec<Tile>) {
		let Some(node) = self.hierarchy.get(id) else {
			return;
		};
		tiles.push(Tile {
			id,
			parent: node.parent,
			relative_depth,
			weight: self.hierarchy.subtree_weight(id, self.default_weight),
		});
		if relative_depth == self.max_relative_depth {
			return;
		}
		let mut children: Vec<(NodeId, u64)> = node
			.children
			.iter()
			.map(|&c| (c, self.hierarchy.subtree_weight(c, self.default_weight)))
			.collect();
		children.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
		for (child, _) in children {
			self.collect(child, relative_depth + 1, tiles);
		}
	}
}

/// A category dropdown entry with the subcategories offered under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryOption {
	/// The category entry.
	pub id: NodeId,
	/// Its display name.
	pub name: String,
	/// In hierarchy order.
	pub subcategories: Vec<(NodeId, String)>,
}

/// Dropdown entries for every category, in hierarchy order.
pub fn category_options(hierarchy: &HierarchyModel) -> Vec<CategoryOption> {
	hierarchy
		.categories()
		.iter()
		.filter_map(|&c| hierarchy.get(c))
		.map(|category| CategoryOption {
			id: category.id,
			name: category.name.clone(),
			subcategories: category
				.children
				.iter()
				.filter_map(|&s| hierarchy.get(s))
				.map(|s| (s.id, s.name.clone()))
				.collect(),
		})
		.collect()
}
