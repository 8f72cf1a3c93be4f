//! Color and size scales shared by the graph canvas and the treemap.

/// One color per top-level category, cycling when there are more.
const CATEGORY_COLORS: &[&str] = &["#D96666", "#E3A617", "#6FAB78", "#A982B4", "#5C99CC"];

pub const ROOT_COLOR: &str = "#a6283b";

/// Group 0 is the root; categories start at 1.
pub fn group_color(group: usize) -> &'static str {
	match group {
		0 => ROOT_COLOR,
		g => CATEGORY_COLORS[(g - 1) % CATEGORY_COLORS.len()],
	}
}

/// Node radius grows with the number of citations it receives.
pub fn node_radius(incoming_links: usize) -> f64 {
	(incoming_links as f64 * 0.5).clamp(super::state::NODE_RADIUS, 24.0)
}
