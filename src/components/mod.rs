pub mod controls;
pub mod force_graph;
pub mod treemap;
