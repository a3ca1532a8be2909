//! # Bacon
//!
//! Degrees of separation between actors, measured through the movies they
//! shared.
//!
//! Actors are vertices, shared movies are edges. Pick a root actor and the
//! crate builds a breadth-first shortest-path tree from it, then answers
//! "how far is X from the root, and through which movies?".
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bacon::{build_graph_from_files, BaconSession, DataFiles};
//!
//! let files = DataFiles {
//!     actors: "data/actors.txt".into(),
//!     movies: "data/movies.txt".into(),
//!     movie_actors: "data/movie-actors.txt".into(),
//! };
//! let graph = build_graph_from_files(&files)?;
//!
//! let session = BaconSession::new(&graph, "Kevin Bacon")?;
//! for step in session.path_to_root("Tom Hanks")? {
//!     println!("{}", step);
//! }
//! # Ok::<(), bacon::BaconError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod query;

// Re-exports for convenience
pub use config::BaconConfig;
pub use error::{BaconError, Result};

// Graph re-exports
pub use graph::{
    build_graph, build_graph_from_files, build_tree, CostarGraph, Credit, GraphStats, PathStep,
    ShortestPathTree,
};
pub use loader::{load_tables, DataFiles, Tables};
pub use query::{
    average_distance, bacon_number, distances_by_level, max_distance, path_to_root, BaconNumber,
    BaconSession, DistanceMap, LevelSummary,
};
