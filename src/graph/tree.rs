//! Shortest-path tree over the co-star graph.
//!
//! A breadth-first search from the root records, for every reachable actor,
//! the edge that first discovered it. Stored as a petgraph `DiGraph` whose
//! edges point from child to parent, so following outgoing edges walks
//! toward the root.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{EdgeRef, VisitMap, Visitable};
use petgraph::Direction;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

use super::engine::CostarGraph;
use super::types::{Credit, PathStep};
use crate::error::{BaconError, Result};

/// One shortest path from every actor reachable from the root back to it.
///
/// The root has no outgoing edge; every other vertex has exactly one.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    tree: DiGraph<String, Credit>,
    index: HashMap<String, NodeIndex>,
    root: NodeIndex,
}

/// Build the shortest-path tree rooted at `root`.
///
/// Incident edges are examined in insertion order, so when several shortest
/// paths exist the earliest-inserted edge decides the parent and the movie.
pub fn build_tree(graph: &CostarGraph, root: &str) -> Result<ShortestPathTree> {
    let source = graph
        .actor(root)
        .ok_or_else(|| BaconError::NotFound(root.to_string()))?;

    let mut visited = graph.inner_graph().visit_map();
    let mut tree = DiGraph::new();
    let mut index = HashMap::new();

    let root_idx = tree.add_node(root.to_string());
    index.insert(root.to_string(), root_idx);
    visited.visit(source);

    let mut queue = VecDeque::new();
    queue.push_back((source, root_idx));

    while let Some((current, current_idx)) = queue.pop_front() {
        for (other, credit) in graph.incident(current) {
            if !visited.visit(other) {
                continue;
            }
            let name = graph.actor_name(other);
            let idx = tree.add_node(name.to_string());
            index.insert(name.to_string(), idx);
            tree.add_edge(idx, current_idx, credit.clone());
            queue.push_back((other, idx));
        }
    }

    debug!(root, reachable = tree.node_count(), "shortest-path tree built");

    Ok(ShortestPathTree {
        tree,
        index,
        root: root_idx,
    })
}

impl ShortestPathTree {
    /// Name of the root actor.
    pub fn root(&self) -> &str {
        &self.tree[self.root]
    }

    /// Number of actors in the tree, root included.
    pub fn len(&self) -> usize {
        self.tree.node_count()
    }

    /// A tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, actor: &str) -> bool {
        self.index.contains_key(actor)
    }

    /// Actors in discovery (BFS) order, root first.
    pub fn actors(&self) -> impl Iterator<Item = &str> {
        self.tree
            .node_indices()
            .map(move |idx| self.tree[idx].as_str())
    }

    /// The next hop toward the root and the movie linking them, or `None`
    /// for the root and for actors outside the tree.
    pub fn parent(&self, actor: &str) -> Option<(&str, &Credit)> {
        let idx = self.node(actor)?;
        self.parent_edge(idx)
            .map(|(parent, credit)| (self.tree[parent].as_str(), credit))
    }

    /// Every tree edge as a path step, in discovery order.
    pub fn edges(&self) -> Vec<PathStep> {
        self.tree
            .edge_references()
            .map(|e| PathStep {
                actor: self.tree[e.source()].clone(),
                movie: e.weight().movie.clone(),
                co_star: self.tree[e.target()].clone(),
            })
            .collect()
    }

    pub(crate) fn inner_tree(&self) -> &DiGraph<String, Credit> {
        &self.tree
    }

    pub(crate) fn root_index(&self) -> NodeIndex {
        self.root
    }

    pub(crate) fn node(&self, actor: &str) -> Option<NodeIndex> {
        self.index.get(actor).copied()
    }

    pub(crate) fn parent_edge(&self, idx: NodeIndex) -> Option<(NodeIndex, &Credit)> {
        self.tree
            .edges_directed(idx, Direction::Outgoing)
            .next()
            .map(|e| (e.target(), e.weight()))
    }

    /// Vertices whose parent is `idx`, in discovery order.
    pub(crate) fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self.tree.edges_directed(idx, Direction::Incoming).collect();
        edges.sort_by_key(|e| e.id());
        edges.into_iter().map(|e| e.source()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A-B via M1, B-C via M2, plus D-E in a separate component.
    fn sample() -> CostarGraph {
        let mut graph = CostarGraph::new();
        let a = graph.add_actor("A");
        let b = graph.add_actor("B");
        let c = graph.add_actor("C");
        let d = graph.add_actor("D");
        let e = graph.add_actor("E");
        graph.add_actor("Z");
        graph.add_credit(a, b, "M1");
        graph.add_credit(b, c, "M2");
        graph.add_credit(d, e, "M3");
        graph
    }

    #[test]
    fn test_unknown_root() {
        let graph = sample();
        let result = build_tree(&graph, "Nobody");
        assert!(matches!(result, Err(BaconError::NotFound(name)) if name == "Nobody"));
    }

    #[test]
    fn test_tree_covers_root_component_only() {
        let graph = sample();
        let tree = build_tree(&graph, "A").unwrap();

        assert_eq!(tree.root(), "A");
        assert_eq!(tree.len(), 3);
        let actors: Vec<&str> = tree.actors().collect();
        assert_eq!(actors, vec!["A", "B", "C"]);
        assert!(!tree.contains("D"));
        assert!(!tree.contains("E"));
        assert!(!tree.contains("Z"));
    }

    #[test]
    fn test_parent_links() {
        let graph = sample();
        let tree = build_tree(&graph, "A").unwrap();

        assert!(tree.parent("A").is_none());
        let (parent, credit) = tree.parent("B").unwrap();
        assert_eq!(parent, "A");
        assert_eq!(credit.movie, "M1");
        let (parent, credit) = tree.parent("C").unwrap();
        assert_eq!(parent, "B");
        assert_eq!(credit.movie, "M2");
        assert!(tree.parent("D").is_none());
    }

    #[test]
    fn test_one_outgoing_edge_per_non_root() {
        let graph = sample();
        let tree = build_tree(&graph, "B").unwrap();
        let inner = tree.inner_tree();

        for idx in inner.node_indices() {
            let out = inner.edges_directed(idx, Direction::Outgoing).count();
            if idx == tree.root_index() {
                assert_eq!(out, 0);
            } else {
                assert_eq!(out, 1);
            }
        }
        assert_eq!(inner.edge_count(), tree.len() - 1);
    }

    #[test]
    fn test_isolated_root() {
        let graph = sample();
        let tree = build_tree(&graph, "Z").unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.edges().is_empty());
    }

    #[test]
    fn test_tie_break_prefers_first_inserted_edge() {
        // Two shortest paths from R to T: via P (inserted first) and via Q.
        let mut graph = CostarGraph::new();
        let r = graph.add_actor("R");
        let p = graph.add_actor("P");
        let q = graph.add_actor("Q");
        let t = graph.add_actor("T");
        graph.add_credit(r, p, "RP");
        graph.add_credit(r, q, "RQ");
        graph.add_credit(p, t, "PT");
        graph.add_credit(q, t, "QT");

        let tree = build_tree(&graph, "R").unwrap();
        let (parent, credit) = tree.parent("T").unwrap();
        assert_eq!(parent, "P");
        assert_eq!(credit.movie, "PT");
    }

    #[test]
    fn test_parallel_edges_record_first_movie() {
        let mut graph = CostarGraph::new();
        let a = graph.add_actor("A");
        let b = graph.add_actor("B");
        graph.add_credit(a, b, "Older");
        graph.add_credit(a, b, "Newer");

        let tree = build_tree(&graph, "B").unwrap();
        assert_eq!(tree.parent("A").unwrap().1.movie, "Older");
    }

    #[test]
    fn test_rebuild_is_identical() {
        let mut graph = CostarGraph::new();
        let names = ["A", "B", "C", "D", "E", "F"];
        let idx: Vec<_> = names.iter().map(|n| graph.add_actor(n)).collect();
        graph.add_credit(idx[0], idx[1], "m1");
        graph.add_credit(idx[0], idx[2], "m2");
        graph.add_credit(idx[1], idx[3], "m3");
        graph.add_credit(idx[2], idx[3], "m4");
        graph.add_credit(idx[3], idx[4], "m5");
        graph.add_credit(idx[2], idx[4], "m6");
        graph.add_credit(idx[4], idx[5], "m7");

        let first = build_tree(&graph, "A").unwrap();
        let second = build_tree(&graph, "A").unwrap();
        assert_eq!(first.edges(), second.edges());
        assert_eq!(
            first.actors().collect::<Vec<_>>(),
            second.actors().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_input_graph_untouched() {
        let graph = sample();
        let before = graph.stats();
        let _ = build_tree(&graph, "A").unwrap();
        assert_eq!(graph.stats(), before);
    }
}
