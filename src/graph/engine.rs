//! The co-star graph engine.
//!
//! Uses petgraph to store actors as vertices and shared movies as
//! undirected edges, with a name index for constant-time lookup.

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::types::*;

/// Actors joined by the movies they share. Parallel edges are allowed, one
/// per shared movie; self-edges are not.
#[derive(Debug, Clone)]
pub struct CostarGraph {
    /// The undirected graph: actor name on vertices, movie on edges.
    graph: UnGraph<String, Credit>,
    /// Index: actor name -> vertex.
    actor_index: HashMap<String, NodeIndex>,
    /// Movies that produced at least one edge.
    movie_count: usize,
    /// Cast references dropped by the builder.
    skipped_references: usize,
}

impl CostarGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            actor_index: HashMap::new(),
            movie_count: 0,
            skipped_references: 0,
        }
    }

    pub(crate) fn inner_graph(&self) -> &UnGraph<String, Credit> {
        &self.graph
    }

    // ─── Vertex Operations ──────────────────────────────────────

    /// Add an actor vertex. Returns the existing vertex if the name is
    /// already present.
    pub fn add_actor(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.actor_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.actor_index.insert(name.to_string(), idx);
        idx
    }

    // ─── Edge Operations ────────────────────────────────────────

    /// Connect two actors through a movie. Returns `None` for a self-pair.
    pub fn add_credit(&mut self, a: NodeIndex, b: NodeIndex, movie: &str) -> Option<EdgeIndex> {
        if a == b {
            return None;
        }
        Some(self.graph.add_edge(a, b, Credit::new(movie)))
    }

    pub(crate) fn note_movie(&mut self) {
        self.movie_count += 1;
    }

    pub(crate) fn note_skipped(&mut self, count: usize) {
        self.skipped_references += count;
    }

    // ─── Query Operations ───────────────────────────────────────

    /// Look up an actor's vertex by name.
    pub fn actor(&self, name: &str) -> Option<NodeIndex> {
        self.actor_index.get(name).copied()
    }

    pub fn contains_actor(&self, name: &str) -> bool {
        self.actor_index.contains_key(name)
    }

    /// Name of the actor at `idx`.
    ///
    /// Panics if `idx` did not come from this graph.
    pub fn actor_name(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// All actor names in insertion order.
    pub fn actor_names(&self) -> impl Iterator<Item = &str> {
        self.graph
            .node_indices()
            .map(move |idx| self.graph[idx].as_str())
    }

    pub fn actor_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edges touching `idx` as `(co-star, credit)`, in edge insertion order.
    ///
    /// petgraph walks adjacency lists newest-first, so the edges are sorted
    /// by index to give callers a stable order.
    pub fn incident(&self, idx: NodeIndex) -> Vec<(NodeIndex, &Credit)> {
        let mut edges: Vec<_> = self.graph.edges(idx).collect();
        edges.sort_by_key(|e| e.id());
        edges
            .into_iter()
            .map(|e| {
                let other = if e.source() == idx {
                    e.target()
                } else {
                    e.source()
                };
                (other, e.weight())
            })
            .collect()
    }

    /// Movies shared by two actors, in edge insertion order.
    pub fn shared_movies(&self, a: &str, b: &str) -> Vec<&str> {
        let (Some(a), Some(b)) = (self.actor(a), self.actor(b)) else {
            return Vec::new();
        };
        self.incident(a)
            .into_iter()
            .filter(|(other, _)| *other == b)
            .map(|(_, credit)| credit.movie.as_str())
            .collect()
    }

    /// Get graph statistics.
    pub fn stats(&self) -> GraphStats {
        let isolated_actors = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).next().is_none())
            .count();

        GraphStats {
            actor_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            movie_count: self.movie_count,
            isolated_actors,
            skipped_references: self.skipped_references,
        }
    }
}

impl Default for CostarGraph {
    fn default() -> Self {
        Self::new()
    }
}
