//! Wire shapes of the corpus data file.
//!
//! The file holds one nested hierarchy record and a flat list of citation
//! links that reference hierarchy entries by id or name.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use super::error::AtlasError;

/// A hierarchy record as written in the data file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawNode {
	/// Explicit link key.
	#[serde(default)]
	pub id: Option<String>,
	/// Required once built; optional here so build can report where it is missing.
	#[serde(default)]
	pub name: Option<String>,
	/// Numbers, floats and numeric strings; anything else reads as absent.
	#[serde(default, deserialize_with = "lenient_count")]
	pub word_count: Option<u64>,
	/// Shown in tooltips.
	#[serde(default)]
	pub author: Option<String>,
	/// Only meaningful on leaves.
	#[serde(default)]
	pub article_url: Option<String>,
	/// Nested records, one level down.
	#[serde(default)]
	pub children: Vec<RawNode>,
}

impl RawNode {
	/// Identifier used to resolve links: the explicit id, else the name.
	pub fn key(&self) -> Option<&str> {
		self.id.as_deref().or(self.name.as_deref())
	}
}

/// One citation, by key or name on both ends.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEdge {
	/// Citing entry.
	pub source: String,
	/// Cited entry.
	pub target: String,
	/// Title of the cited article, kept for display.
	#[serde(default, rename = "targetTitle")]
	pub target_title: String,
}

/// The whole data file: `{ "hierarchy": {...}, "links": [...] }`.
#[derive(Clone, Debug, Deserialize)]
pub struct CorpusDocument {
	/// The root record.
	pub hierarchy: RawNode,
	/// Citations. Absent means none.
	#[serde(default)]
	pub links: Vec<RawEdge>,
}

impl CorpusDocument {
	/// Parses the data file. Shape checks happen later, in [`crate::atlas::Corpus::load`].
	pub fn from_json(text: &str) -> Result<Self, AtlasError> {
		Ok(serde_json::from_str(text)?)
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
	Number(u64),
	Float(f64),
	Text(String),
	Other(#[allow(dead_code)] IgnoredAny),
}

/// Word counts show up as numbers or numeric strings; anything else counts as
/// missing.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
	D: Deserializer<'de>,
{
	let repr = Option::<CountRepr>::deserialize(deserializer)?;
	Ok(match repr {
		Some(CountRepr::Number(n)) => Some(n),
		Some(CountRepr::Float(f)) if f.is_finite() && f >= 0.0 => Some(f.round() as u64),
		Some(CountRepr::Text(s)) => s
			.trim()
			.parse::<f64>()
			.ok()
			.filter(|f| f.is_finite() && *f >= 0.0)
			.map(|f| f.round() as u64),
		_ => None,
	})
}
