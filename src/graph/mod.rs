//! Co-star graph module — the structural backbone of the game.
//!
//! Provides the graph data model, the engine, the builder that populates
//! it from the loaded tables, and the shortest-path tree built from it.

pub mod builder;
pub mod engine;
pub mod tree;
pub mod types;

pub use builder::{build_graph, build_graph_from_files};
pub use engine::CostarGraph;
pub use tree::{build_tree, ShortestPathTree};
pub use types::{Credit, GraphStats, PathStep};
