//! Reactive wrapper around one navigation session.

use leptos::prelude::*;
use log::{info, warn};

use crate::atlas::{
	AtlasConfig, CategoryOption, Corpus, Focus, Gesture, GraphProjector, HierarchyModel,
	HierarchyNode, NavigationController, NodeId, Transition, TreeProjection, TreeProjector, category_options,
};
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};

/// Everything the page components share. Copyable handle into local
/// storage; the published focus is mirrored into a signal so views re-run
/// when it changes.
#[derive(Clone, Copy)]
pub struct AtlasSession {
	corpus: StoredValue<Corpus, LocalStorage>,
	controller: StoredValue<NavigationController, LocalStorage>,
	graph_projector: StoredValue<GraphProjector, LocalStorage>,
	tree_projector: StoredValue<TreeProjector, LocalStorage>,
	label_limit: usize,
	focus: RwSignal<Focus>,
}

impl AtlasSession {
	pub fn new(corpus: Corpus, config: AtlasConfig) -> Self {
		info!(
			"Starting session over {} entries and {} citations",
			corpus.hierarchy.len(),
			corpus.graph.edges().len()
		);
		let focus = RwSignal::new(Focus::WholeCorpus);
		let label_limit = config.label_limit;
		let graph_projector = corpus.graph_projector();
		let tree_projector = corpus.tree_projector(&config);
		let mut controller = corpus.controller(config);
		controller.subscribe(move |published, _| focus.set(*published));

		Self {
			corpus: StoredValue::new_local(corpus),
			controller: StoredValue::new_local(controller),
			graph_projector: StoredValue::new_local(graph_projector),
			tree_projector: StoredValue::new_local(tree_projector),
			label_limit,
			focus,
		}
	}

	/// Current focus; tracked.
	pub fn focus(&self) -> Focus {
		self.focus.get()
	}

	fn submit(&self, gesture: Gesture) {
		let Some(transition) = self.controller.try_update_value(|c| c.submit(gesture)) else {
			return;
		};
		if let Transition::OpenArticle { url, .. } = transition {
			open_article(&url);
		}
	}

	pub fn drill_down(&self, id: NodeId) {
		self.submit(Gesture::DrillDown(id));
	}

	pub fn select_single(&self, id: NodeId) {
		self.submit(Gesture::SelectSingle(id));
	}

	pub fn back(&self) {
		self.submit(Gesture::Back);
	}

	pub fn reset(&self) {
		self.submit(Gesture::Reset);
	}

	/// Category dropdown change. An empty value is the "all categories"
	/// entry.
	pub fn choose_category(&self, value: &str) {
		if value.is_empty() {
			self.reset();
			return;
		}
		let Some(category) = self.parse_option(value) else {
			return;
		};
		self.submit(Gesture::JumpTo(Focus::Category { category }));
	}

	/// Subcategory dropdown change. An empty value falls back to the whole
	/// active category.
	pub fn choose_subcategory(&self, value: &str) {
		let Some(category) = self.focus.get_untracked().category() else {
			return;
		};
		let focus = match self.parse_option(value) {
			Some(subcategory) => Focus::Subcategory {
				category,
				subcategory,
			},
			None if value.is_empty() => Focus::Category { category },
			None => return,
		};
		self.submit(Gesture::JumpTo(focus));
	}

	fn parse_option(&self, value: &str) -> Option<NodeId> {
		self.corpus
			.with_value(|corpus| parse_node(&corpus.hierarchy, value))
	}

	/// Graph canvas input for the current focus; tracked.
	pub fn graph_data(&self) -> GraphData {
		let focus = self.focus.get();
		let Some(projection) = self.graph_projector.try_update_value(|p| p.project(&focus)) else {
			return GraphData::default();
		};
		self.corpus
			.with_value(|corpus| {
				let (hierarchy, graph) = (&corpus.hierarchy, &corpus.graph);
				let labeled = projection.labeled(graph, self.label_limit);
				let nodes = projection
					.nodes
					.iter()
					.map(|&id| GraphNode {
						id,
						label: labeled.contains(&id).then(|| hierarchy[id].name.clone()),
						group: group_of(hierarchy, id),
						incoming_links: graph.incoming_links(id),
					})
					.collect();
				let links = projection
					.edges
					.iter()
					.filter_map(|&e| graph.edge(e))
					.map(|edge| GraphLink {
						source: edge.source,
						target: edge.target,
					})
					.collect();
				GraphData { nodes, links }
			})
	}

	/// Treemap tiles under the stack top; tracked.
	pub fn tree(&self) -> TreeProjection {
		self.focus.track();
		let stack = self.controller.with_value(|c| c.stack().clone());
		self.tree_projector.with_value(|p| p.project(&stack))
	}

	/// Root-first names along the stack; tracked.
	pub fn breadcrumb(&self) -> Vec<(NodeId, String)> {
		self.focus.track();
		self.controller.with_value(|c| {
			c.breadcrumb()
				.into_iter()
				.map(|(id, name)| (id, name.to_string()))
				.collect()
		})
	}

	pub fn can_go_back(&self) -> bool {
		self.focus.track();
		self.controller.with_value(|c| !c.stack().is_at_root())
	}

	pub fn category_options(&self) -> Vec<CategoryOption> {
		self.corpus.with_value(|corpus| category_options(&corpus.hierarchy))
	}

	pub fn name(&self, id: NodeId) -> String {
		self.corpus.with_value(|corpus| {
			corpus
				.hierarchy
				.get(id)
				.map(|n| n.name.clone())
				.unwrap_or_default()
		})
	}

	/// Hover text for a tile: the name, plus the author for articles.
	pub fn tooltip(&self, id: NodeId) -> String {
		self.corpus
			.with_value(|corpus| corpus.hierarchy.get(id).map(tooltip).unwrap_or_default())
	}

	pub fn group(&self, id: NodeId) -> usize {
		self.corpus.with_value(|corpus| group_of(&corpus.hierarchy, id))
	}

	pub fn is_leaf(&self, id: NodeId) -> bool {
		self.corpus
			.with_value(|corpus| corpus.hierarchy.get(id).is_some_and(|n| n.is_leaf()))
	}
}

fn open_article(url: &str) {
	let opened = web_sys::window().map(|w| w.open_with_url_and_target(url, "_blank"));
	if !matches!(opened, Some(Ok(_))) {
		warn!("Could not open {url}");
	}
}

fn tooltip(node: &HierarchyNode) -> String {
	match &node.author {
		Some(author) => format!("{} by {author}", node.name),
		None => node.name.clone(),
	}
}

/// Dropdown option values are node indices.
fn parse_node(hierarchy: &HierarchyModel, value: &str) -> Option<NodeId> {
	let id = NodeId::from_index(value.parse().ok()?);
	hierarchy.contains(id).then_some(id)
}

/// Color group: 0 for the root, otherwise one plus the position of the
/// entry's top-level category.
fn group_of(hierarchy: &HierarchyModel, id: NodeId) -> usize {
	let Some(node) = hierarchy.get(id) else {
		return 0;
	};
	hierarchy
		.categories()
		.iter()
		.position(|&c| c == node.top_category)
		.map_or(0, |i| i + 1)
}
