use serde::Deserialize;

use super::error::AtlasError;

/// How a single Back gesture treats a pop that would land on the same
/// position it left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackPolicy {
	/// Pop once more when the popped frame was not a leaf and the first pop
	/// would not change what is shown.
	#[default]
	SkipRepeatedLevel,
	/// Always pop exactly one frame.
	SingleLevel,
}

/// Session settings. Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
	/// See [`BackPolicy`].
	pub back_policy: BackPolicy,
	/// Nodes that get a text label in the graph view, by incoming links.
	pub label_limit: usize,
	/// Treemap weight for entries without a word count.
	pub default_leaf_weight: u64,
	/// Upper bound on gestures drained per dispatch, follow-ups included.
	pub max_cascade: usize,
}

impl Default for AtlasConfig {
	fn default() -> Self {
		Self {
			back_policy: BackPolicy::default(),
			label_limit: 10,
			default_leaf_weight: 2000,
			max_cascade: 32,
		}
	}
}

impl AtlasConfig {
	/// Parses a config, filling absent fields with defaults.
	pub fn from_json(text: &str) -> Result<Self, AtlasError> {
		Ok(serde_json::from_str(text)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_fields_fall_back_to_defaults() {
		let config = AtlasConfig::from_json(r#"{ "back_policy": "single_level", "label_limit": 3 }"#)
			.unwrap();
		assert_eq!(config.back_policy, BackPolicy::SingleLevel);
		assert_eq!(config.label_limit, 3);
		assert_eq!(config.default_leaf_weight, 2000);
		assert_eq!(config.max_cascade, 32);
		assert_eq!(AtlasConfig::from_json("{}").unwrap(), AtlasConfig::default());
	}

	#[test]
	fn unknown_policy_is_rejected() {
		assert!(AtlasConfig::from_json(r#"{ "back_policy": "twice" }"#).is_err());
	}
}
