//! The immutable four-level tree: root, categories, subcategories, leaves.

use std::collections::HashMap;
use std::ops::Index;

use log::info;

use super::error::MalformedInputError;
use super::input::RawNode;

/// Dense index of a hierarchy entry, assigned in pre-order at build time.
/// Graph nodes reuse the same ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
	/// Position in pre-order.
	pub fn index(self) -> usize {
		self.0 as usize
	}

	pub(crate) fn from_index(index: usize) -> Self {
		Self(index as u32)
	}
}

/// Level of an entry; the tree has exactly four.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DepthClass {
	/// Depth 0.
	Root,
	/// Depth 1.
	Category,
	/// Depth 2.
	Subcategory,
	/// Depth 3, an article.
	Leaf,
}

impl DepthClass {
	/// Deepest allowed level.
	pub const LEAF_DEPTH: usize = 3;

	/// `None` past [`Self::LEAF_DEPTH`].
	pub fn from_depth(depth: usize) -> Option<Self> {
		match depth {
			0 => Some(Self::Root),
			1 => Some(Self::Category),
			2 => Some(Self::Subcategory),
			3 => Some(Self::Leaf),
			_ => None,
		}
	}

	/// Distance from the root.
	pub fn depth(self) -> usize {
		match self {
			Self::Root => 0,
			Self::Category => 1,
			Self::Subcategory => 2,
			Self::Leaf => 3,
		}
	}
}

/// One entry of the hierarchy, as stored after build.
#[derive(Clone, Debug)]
pub struct HierarchyNode {
	/// Own id.
	pub id: NodeId,
	/// External identifier: the raw `id`, else the name.
	pub key: String,
	/// Display name.
	pub name: String,
	/// Level in the tree.
	pub depth: DepthClass,
	/// `None` only for the root.
	pub parent: Option<NodeId>,
	/// In input order.
	pub children: Vec<NodeId>,
	/// Root for the root, the node itself for a category, the depth-1
	/// ancestor for everything below.
	pub top_category: NodeId,
	/// Article author, when the data file names one.
	pub author: Option<String>,
	/// Where drill-down on the leaf goes.
	pub article_url: Option<String>,
	/// `None` when missing or not numeric.
	pub word_count: Option<u64>,
}

impl HierarchyNode {
	/// Whether this is an article.
	pub fn is_leaf(&self) -> bool {
		self.depth == DepthClass::Leaf
	}
}

/// The whole tree, frozen after [`HierarchyModel::build`].
#[derive(Clone, Debug)]
pub struct HierarchyModel {
	nodes: Vec<HierarchyNode>,
	by_key: HashMap<String, NodeId>,
}

impl HierarchyModel {
	/// Numbers the tree in pre-order and checks its shape: every entry named,
	/// no entry deeper than a leaf, articles only at leaf depth, keys unique.
	pub fn build(raw: &RawNode) -> Result<Self, MalformedInputError> {
		let mut model = Self {
			nodes: Vec::new(),
			by_key: HashMap::new(),
		};
		model.insert(raw, None, 0, "root".to_string())?;
		info!(
			"Hierarchy built: {} nodes, {} categories",
			model.nodes.len(),
			model.categories().len()
		);
		Ok(model)
	}

	fn insert(
		&mut self,
		raw: &RawNode,
		parent: Option<NodeId>,
		depth: usize,
		path: String,
	) -> Result<NodeId, MalformedInputError> {
		let name = match raw.name.as_deref() {
			Some(name) if !name.trim().is_empty() => name.to_string(),
			_ => return Err(MalformedInputError::MissingName { path }),
		};
		let Some(class) = DepthClass::from_depth(depth) else {
			return Err(MalformedInputError::TooDeep { name, depth });
		};
		if raw.article_url.is_some() && class != DepthClass::Leaf {
			return Err(MalformedInputError::ArticleAboveLeaf { name, depth });
		}
		let key = match raw.id.as_deref() {
			Some(id) if !id.trim().is_empty() => id.to_string(),
			_ => name.clone(),
		};
		if self.by_key.contains_key(&key) {
			return Err(MalformedInputError::DuplicateKey { key });
		}

		let id = NodeId::from_index(self.nodes.len());
		let top_category = match (class, parent) {
			(DepthClass::Root | DepthClass::Category, _) | (_, None) => id,
			(_, Some(parent)) => self.nodes[parent.index()].top_category,
		};
		self.by_key.insert(key.clone(), id);
		self.nodes.push(HierarchyNode {
			id,
			key,
			name,
			depth: class,
			parent,
			children: Vec::new(),
			top_category,
			author: raw.author.clone(),
			article_url: raw.article_url.clone(),
			word_count: raw.word_count,
		});

		let mut children = Vec::with_capacity(raw.children.len());
		for (i, child) in raw.children.iter().enumerate() {
			children.push(self.insert(child, Some(id), depth + 1, format!("{path}/{i}"))?);
		}
		self.nodes[id.index()].children = children;
		Ok(id)
	}

	/// The single depth-0 entry.
	pub fn root(&self) -> NodeId {
		NodeId(0)
	}

	/// `None` for ids from another model.
	pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
		self.nodes.get(id.index())
	}

	/// Whether `id` belongs to this model.
	pub fn contains(&self, id: NodeId) -> bool {
		id.index() < self.nodes.len()
	}

	/// Looks up an external id, or a name for entries without one.
	pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
		self.by_key.get(key).copied()
	}

	/// Lookup by display name for callers that only know names. Linear in the
	/// number of nodes; returns the first match in pre-order.
	pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
		self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
	}

	/// Root-to-node path, inclusive. Empty for an unknown id.
	pub fn ancestors_of(&self, id: NodeId) -> Vec<NodeId> {
		let mut path = Vec::new();
		let mut cursor = self.get(id);
		while let Some(node) = cursor {
			path.push(node.id);
			cursor = node.parent.and_then(|p| self.get(p));
		}
		path.reverse();
		path
	}

	/// Empty for leaves and unknown ids.
	pub fn children_of(&self, id: NodeId) -> &[NodeId] {
		self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
	}

	/// The root's children.
	pub fn categories(&self) -> &[NodeId] {
		self.children_of(self.root())
	}

	/// Whether `parent` is the direct parent of `child`.
	pub fn is_child_of(&self, child: NodeId, parent: NodeId) -> bool {
		self.get(child).and_then(|n| n.parent) == Some(parent)
	}

	/// Treemap weight: the node's own word count (or `default_weight` when it
	/// has none or it is zero) plus the weights of all its descendants.
	pub fn subtree_weight(&self, id: NodeId, default_weight: u64) -> u64 {
		let Some(node) = self.get(id) else {
			return 0;
		};
		let own = node.word_count.filter(|&w| w > 0).unwrap_or(default_weight);
		node.children.iter().fold(own, |acc, &c| {
			acc.saturating_add(self.subtree_weight(c, default_weight))
		})
	}

	/// Number of entries, root included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Never true for a built model.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Entries in pre-order.
	pub fn iter(&self) -> impl Iterator<Item = &HierarchyNode> {
		self.nodes.iter()
	}
}

impl Index<NodeId> for HierarchyModel {
	type Output = HierarchyNode;

	fn index(&self, id: NodeId) -> &HierarchyNode {
		&self.nodes[id.index()]
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::atlas::fixtures;

	fn build(value: serde_json::Value) -> Result<HierarchyModel, MalformedInputError> {
		let raw: RawNode = serde_json::from_value(value).unwrap();
		HierarchyModel::build(&raw)
	}

	#[test]
	fn depth_classes_follow_distance_from_root() {
		let model = fixtures::philosophy().hierarchy;
		let ethics = model.find_by_key("Ethics").unwrap();
		let virtue = model.find_by_key("Virtue").unwrap();
		let leaf = model.find_by_key("L1").unwrap();
		assert_eq!(model[model.root()].depth, DepthClass::Root);
		assert_eq!(model[ethics].depth, DepthClass::Category);
		assert_eq!(model[virtue].depth, DepthClass::Subcategory);
		assert_eq!(model[leaf].depth, DepthClass::Leaf);
		assert!(model[leaf].children.is_empty());
		assert_eq!(model[leaf].parent, Some(virtue));
	}

	#[test]
	fn top_category_is_memoized_per_branch() {
		let model = fixtures::philosophy().hierarchy;
		let root = model.root();
		let ethics = model.find_by_key("Ethics").unwrap();
		let logic = model.find_by_key("cat-logic").unwrap();
		assert_eq!(model[root].top_category, root);
		assert_eq!(model[ethics].top_category, ethics);
		assert_eq!(model[model.find_by_key("Virtue").unwrap()].top_category, ethics);
		assert_eq!(model[model.find_by_key("L3").unwrap()].top_category, ethics);
		assert_eq!(model[model.find_by_key("L4").unwrap()].top_category, logic);
	}

	#[test]
	fn ancestors_run_from_root_to_node() {
		let model = fixtures::philosophy().hierarchy;
		let leaf = model.find_by_key("L2").unwrap();
		let names: Vec<_> = model
			.ancestors_of(leaf)
			.into_iter()
			.map(|id| model[id].name.as_str())
			.collect();
		assert_eq!(names, vec!["Philosophy", "Ethics", "Virtue", "Courage"]);
		assert_eq!(model.ancestors_of(model.root()), vec![model.root()]);
	}

	#[test]
	fn name_lookup_and_key_lookup_agree() {
		let model = fixtures::philosophy().hierarchy;
		assert_eq!(model.find_by_name("Courage"), model.find_by_key("L2"));
		assert_eq!(model.find_by_name("Nothing"), None);
		assert_eq!(model.find_by_key("Courage"), None);
	}

	#[test]
	fn missing_name_is_rejected_with_path() {
		let err = build(json!({
			"name": "Root",
			"children": [{ "name": "A" }, { "name": "B", "children": [{ "word_count": 3 }] }]
		}))
		.unwrap_err();
		assert_eq!(
			err,
			MalformedInputError::MissingName {
				path: "root/1/0".into()
			}
		);
		assert!(matches!(
			build(json!({ "name": "  " })),
			Err(MalformedInputError::MissingName { .. })
		));
	}

	#[test]
	fn nodes_below_leaf_depth_are_rejected() {
		let err = build(json!({
			"name": "Root",
			"children": [{ "name": "A", "children": [{ "name": "A1", "children": [
				{ "name": "Leaf", "children": [{ "name": "Too deep" }] }
			]}]}]
		}))
		.unwrap_err();
		assert_eq!(
			err,
			MalformedInputError::TooDeep {
				name: "Too deep".into(),
				depth: 4
			}
		);
	}

	#[test]
	fn article_urls_only_on_leaves() {
		let err = build(json!({
			"name": "Root",
			"children": [{ "name": "A", "article_url": "https://example.org/a" }]
		}))
		.unwrap_err();
		assert!(matches!(err, MalformedInputError::ArticleAboveLeaf { depth: 1, .. }));
	}

	#[test]
	fn duplicate_keys_are_rejected() {
		let err = build(json!({
			"name": "Root",
			"children": [{ "name": "A" }, { "name": "B", "children": [{ "name": "A" }] }]
		}))
		.unwrap_err();
		assert_eq!(err, MalformedInputError::DuplicateKey { key: "A".into() });

		let ok = build(json!({
			"name": "Root",
			"children": [{ "name": "A" }, { "name": "B", "children": [{ "id": "b-a", "name": "A" }] }]
		}));
		assert!(ok.is_ok());
	}

	#[test]
	fn subtree_weight_counts_defaults_for_missing_word_counts() {
		let model = build(json!({
			"name": "Root",
			"children": [{ "name": "A", "children": [{ "name": "A1", "children": [
				{ "name": "x", "word_count": 100 },
				{ "name": "y" }
			]}]}]
		}))
		.unwrap();
		let a1 = model.find_by_key("A1").unwrap();
		assert_eq!(model.subtree_weight(a1, 10), 10 + 100 + 10);
		assert_eq!(model.subtree_weight(model.root(), 10), 10 + 10 + 10 + 100 + 10);
	}

	#[test]
	fn zero_word_count_falls_back_to_default_weight() {
		let model = build(json!({
			"name": "Root",
			"children": [{ "name": "A", "children": [{ "name": "A1", "children": [
				{ "name": "zero", "word_count": 0 },
				{ "name": "text", "word_count": "0" },
				{ "name": "float", "word_count": 0.0 }
			]}]}]
		}))
		.unwrap();
		for name in ["zero", "text", "float"] {
			assert_eq!(model.subtree_weight(model.find_by_key(name).unwrap(), 10), 10);
		}
	}
}
