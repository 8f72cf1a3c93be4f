//! Citation graph over the hierarchy entries.

use std::collections::BTreeSet;

use log::{info, warn};

use super::error::{EdgeEnd, UnresolvedEdge};
use super::hierarchy::{HierarchyModel, NodeId};
use super::input::RawEdge;

/// Position of an edge in [`GraphModel::edges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u32);

impl EdgeId {
	/// Raw position.
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

/// A hierarchy entry as seen by the citation graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	/// Same id as the hierarchy entry.
	pub id: NodeId,
	/// Resolved edges that point at this node.
	pub incoming_links: usize,
}

/// One resolved citation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// Position in [`GraphModel::edges`].
	pub id: EdgeId,
	/// Citing entry.
	pub source: NodeId,
	/// Cited entry.
	pub target: NodeId,
	/// Title of the cited article as the data file gives it.
	pub target_title: String,
}

/// Every hierarchy entry plus the citations that resolved. Frozen after
/// [`GraphModel::build`].
#[derive(Clone, Debug)]
pub struct GraphModel {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	adjacency: Vec<BTreeSet<NodeId>>,
	unresolved: Vec<UnresolvedEdge>,
}

impl GraphModel {
	/// Resolves every raw edge against the hierarchy. Edges with an unknown
	/// endpoint are left out and recorded, never fatal.
	pub fn build(hierarchy: &HierarchyModel, raw_edges: &[RawEdge]) -> Self {
		let mut nodes: Vec<GraphNode> = hierarchy
			.iter()
			.map(|n| GraphNode {
				id: n.id,
				incoming_links: 0,
			})
			.collect();
		let mut adjacency = vec![BTreeSet::new(); nodes.len()];
		let mut edges = Vec::with_capacity(raw_edges.len());
		let mut unresolved = Vec::new();

		for raw in raw_edges {
			let resolve = |key: &str| {
				hierarchy
					.find_by_key(key)
					.or_else(|| hierarchy.find_by_name(key))
			};
			let (source, target) = match (resolve(&raw.source), resolve(&raw.target)) {
				(Some(s), Some(t)) => (s, t),
				(s, t) => {
					let missing = match (s, t) {
						(None, None) => EdgeEnd::Both,
						(None, _) => EdgeEnd::Source,
						_ => EdgeEnd::Target,
					};
					warn!(
						"Dropping link {} -> {}: unresolved {:?}",
						raw.source, raw.target, missing
					);
					unresolved.push(UnresolvedEdge {
						source: raw.source.clone(),
						target: raw.target.clone(),
						missing,
					});
					continue;
				}
			};

			nodes[target.index()].incoming_links += 1;
			adjacency[source.index()].insert(target);
			adjacency[target.index()].insert(source);
			edges.push(GraphEdge {
				id: EdgeId(edges.len() as u32),
				source,
				target,
				target_title: raw.target_title.clone(),
			});
		}

		info!(
			"Graph built: {} nodes, {} edges, {} dropped",
			nodes.len(),
			edges.len(),
			unresolved.len()
		);
		Self {
			nodes,
			edges,
			adjacency,
			unresolved,
		}
	}

	/// Indexed by [`NodeId::index`].
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Resolved edges in input order.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	/// The graph node for `id`, if it exists.
	pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
		self.nodes.get(id.index())
	}

	/// The edge at `id`, if it exists.
	pub fn edge(&self, id: EdgeId) -> Option<&GraphEdge> {
		self.edges.get(id.index())
	}

	/// Whether `id` is a graph node.
	pub fn contains(&self, id: NodeId) -> bool {
		id.index() < self.nodes.len()
	}

	/// Citations received; zero for unknown ids.
	pub fn incoming_links(&self, id: NodeId) -> usize {
		self.node(id).map_or(0, |n| n.incoming_links)
	}

	/// The node plus everything linked to it in either direction. Empty for
	/// an unknown id.
	pub fn neighbors_of(&self, id: NodeId) -> BTreeSet<NodeId> {
		let Some(linked) = self.adjacency.get(id.index()) else {
			return BTreeSet::new();
		};
		let mut set = linked.clone();
		set.insert(id);
		set
	}

	/// Raw edges left out at build time.
	pub fn unresolved(&self) -> &[UnresolvedEdge] {
		&self.unresolved
	}

	/// Number of raw edges left out at build time.
	pub fn dropped_edge_count(&self) -> usize {
		self.unresolved.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atlas::fixtures;

	#[test]
	fn incoming_counts_only_count_targets() {
		let corpus = fixtures::philosophy();
		let (h, g) = (&corpus.hierarchy, &corpus.graph);
		let l1 = h.find_by_key("L1").unwrap();
		let l2 = h.find_by_key("L2").unwrap();
		let l4 = h.find_by_key("L4").unwrap();
		assert_eq!(g.incoming_links(l1), 2);
		assert_eq!(g.incoming_links(l2), 1);
		assert_eq!(g.incoming_links(l4), 0);
	}

	#[test]
	fn neighbors_include_self_and_both_directions() {
		let corpus = fixtures::philosophy();
		let (h, g) = (&corpus.hierarchy, &corpus.graph);
		let key = |k: &str| h.find_by_key(k).unwrap();
		let expected: BTreeSet<_> = [key("L1"), key("L2"), key("L3"), key("L4")].into();
		assert_eq!(g.neighbors_of(key("L1")), expected);

		let isolated = key("Applied");
		assert_eq!(g.neighbors_of(isolated), BTreeSet::from([isolated]));
	}

	#[test]
	fn edges_resolve_by_name_when_no_key_matches() {
		let corpus = fixtures::philosophy();
		let (h, g) = (&corpus.hierarchy, &corpus.graph);
		let logic = h.find_by_key("cat-logic").unwrap();
		let to_logic: Vec<_> = g.edges().iter().filter(|e| e.target == logic).collect();
		assert_eq!(to_logic.len(), 1);
		assert_eq!(to_logic[0].source, h.find_by_key("L2").unwrap());
		assert_eq!(to_logic[0].target_title, "Logic");
	}

	#[test]
	fn unresolved_edges_are_dropped_and_counted() {
		let corpus = fixtures::philosophy();
		let g = &corpus.graph;
		assert_eq!(g.dropped_edge_count(), 2);
		assert_eq!(
			g.unresolved(),
			&[
				UnresolvedEdge {
					source: "L4".into(),
					target: "Ghost".into(),
					missing: EdgeEnd::Target,
				},
				UnresolvedEdge {
					source: "Nobody".into(),
					target: "Nowhere".into(),
					missing: EdgeEnd::Both,
				},
			]
		);
		assert!(g.edges().iter().all(|e| g.contains(e.source) && g.contains(e.target)));
	}

	#[test]
	fn every_hierarchy_entry_is_a_graph_node() {
		let corpus = fixtures::philosophy();
		assert_eq!(corpus.graph.nodes().len(), corpus.hierarchy.len());
		for (i, node) in corpus.graph.nodes().iter().enumerate() {
			assert_eq!(node.id.index(), i);
		}
	}
}
