use serde_json::json;

use super::Corpus;
use super::input::CorpusDocument;

fn load(value: serde_json::Value) -> Corpus {
	let document: CorpusDocument = serde_json::from_value(value).unwrap();
	Corpus::load(&document).unwrap()
}

/// Two categories, three subcategories, four leaves. `L3` has no article,
/// `Logic` is keyed `cat-logic` so the `Logic` link resolves by name, and
/// two links point nowhere.
pub(crate) fn philosophy() -> Corpus {
	load(json!({
		"hierarchy": {
			"name": "Philosophy",
			"children": [
				{
					"name": "Ethics",
					"children": [
						{
							"name": "Virtue",
							"children": [
								{
									"id": "L1",
									"name": "Aristotle on Virtue",
									"author": "Aristotle",
									"article_url": "https://example.org/aristotle",
									"word_count": 1200
								},
								{
									"id": "L2",
									"name": "Courage",
									"article_url": "https://example.org/courage",
									"word_count": "800"
								}
							]
						},
						{
							"name": "Applied",
							"children": [{ "id": "L3", "name": "Animal Ethics" }]
						}
					]
				},
				{
					"id": "cat-logic",
					"name": "Logic",
					"children": [
						{
							"name": "Modal",
							"children": [{
								"id": "L4",
								"name": "Possible Worlds",
								"article_url": "https://example.org/worlds"
							}]
						}
					]
				}
			]
		},
		"links": [
			{ "source": "L1", "target": "L2", "targetTitle": "Courage" },
			{ "source": "L3", "target": "L1", "targetTitle": "Aristotle on Virtue" },
			{ "source": "L4", "target": "L1", "targetTitle": "Aristotle on Virtue" },
			{ "source": "L2", "target": "Logic", "targetTitle": "Logic" },
			{ "source": "L4", "target": "Ghost", "targetTitle": "Ghost" },
			{ "source": "Nobody", "target": "Nowhere" }
		]
	}))
}

/// `Root -> A -> A1 -> {Leaf1, Leaf2}` with a single `Leaf1 -> Leaf2` link.
pub(crate) fn minimal() -> Corpus {
	load(json!({
		"hierarchy": {
			"name": "Root",
			"children": [{
				"name": "A",
				"children": [{
					"name": "A1",
					"children": [
						{ "name": "Leaf1", "article_url": "https://example.org/1" },
						{ "name": "Leaf2", "article_url": "https://example.org/2" }
					]
				}]
			}]
		},
		"links": [{ "source": "Leaf1", "target": "Leaf2", "targetTitle": "Leaf2" }]
	}))
}
