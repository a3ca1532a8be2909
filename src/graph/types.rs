//! Core types for the co-star graph and the shortest-path tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data stored on a co-star edge: the movie both actors appeared in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub movie: String,
}

impl Credit {
    pub fn new(movie: impl Into<String>) -> Self {
        Self {
            movie: movie.into(),
        }
    }
}

/// One hop of a path toward the root: `actor` appeared in `movie` with
/// `co_star`, and `co_star` is one step closer to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub actor: String,
    pub movie: String,
    pub co_star: String,
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} appeared in {} with {}.",
            self.actor, self.movie, self.co_star
        )
    }
}

/// Statistics about the co-star graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of actor vertices.
    pub actor_count: usize,
    /// Number of co-star edges, one per (movie, actor pair).
    pub edge_count: usize,
    /// Movies that contributed at least one edge.
    pub movie_count: usize,
    /// Actors with no co-star at all.
    pub isolated_actors: usize,
    /// Cast references dropped during the build (unknown actor or movie id).
    pub skipped_references: usize,
}
