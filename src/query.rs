//! Query engine over a shortest-path tree.
//!
//! Distances, per-level groupings and root paths are all read from the
//! tree; nothing here mutates it. [`BaconSession`] bundles the tree and its
//! distance map for the current root and is replaced whole on re-root.

use petgraph::visit::{VisitMap, Visitable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::info;

use crate::error::{BaconError, Result};
use crate::graph::{build_tree, CostarGraph, PathStep, ShortestPathTree};

/// Actors grouped by their distance from the root.
///
/// Levels partition the tree's actors; level 0 holds only the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMap {
    levels: BTreeMap<usize, BTreeSet<String>>,
}

/// Size of one level, for compact reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub distance: usize,
    pub actors: usize,
}

/// Bacon number of one actor with the path that proves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaconNumber {
    pub actor: String,
    pub root: String,
    /// `None` when the actor cannot reach the root.
    pub number: Option<usize>,
    pub path: Vec<PathStep>,
}

impl DistanceMap {
    pub fn levels(&self) -> &BTreeMap<usize, BTreeSet<String>> {
        &self.levels
    }

    /// Actors at exactly `distance`, if any.
    pub fn actors_at(&self, distance: usize) -> Option<&BTreeSet<String>> {
        self.levels.get(&distance)
    }

    /// Highest distance present; 0 for a root-only tree.
    pub fn max_distance(&self) -> usize {
        self.levels.keys().next_back().copied().unwrap_or(0)
    }

    /// Number of actors across all levels, root included.
    pub fn reachable(&self) -> usize {
        self.levels.values().map(BTreeSet::len).sum()
    }

    /// Mean distance of every actor except the root. The root is left out of
    /// the denominator since nobody counts their distance to themselves.
    pub fn average_distance(&self, root: &str) -> Result<f64> {
        let others = self.reachable().saturating_sub(1);
        if others == 0 {
            return Err(BaconError::EmptyTree(root.to_string()));
        }
        let total: usize = self
            .levels
            .iter()
            .map(|(distance, actors)| distance * actors.len())
            .sum();
        Ok(total as f64 / others as f64)
    }

    pub fn summary(&self) -> Vec<LevelSummary> {
        self.levels
            .iter()
            .map(|(&distance, actors)| LevelSummary {
                distance,
                actors: actors.len(),
            })
            .collect()
    }
}

// ─── Tree Queries ───────────────────────────────────────────────

/// Group every actor in the tree by distance from the root.
///
/// Walks child edges level by level with an explicit queue, visiting each
/// vertex once.
pub fn distances_by_level(tree: &ShortestPathTree) -> DistanceMap {
    let inner = tree.inner_tree();
    let mut visited = inner.visit_map();
    let mut levels: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();
    let mut queue = VecDeque::new();
    queue.push_back((tree.root_index(), 0usize));

    while let Some((idx, distance)) = queue.pop_front() {
        if !visited.visit(idx) {
            continue;
        }
        levels
            .entry(distance)
            .or_default()
            .insert(inner[idx].clone());
        for child in tree.children(idx) {
            queue.push_back((child, distance + 1));
        }
    }

    DistanceMap { levels }
}

/// Highest distance from the root; 0 when only the root is present.
pub fn max_distance(tree: &ShortestPathTree) -> usize {
    distances_by_level(tree).max_distance()
}

/// Mean distance over all non-root actors.
pub fn average_distance(tree: &ShortestPathTree) -> Result<f64> {
    distances_by_level(tree).average_distance(tree.root())
}

/// The chain of tree edges from `actor` up to the root, start first.
/// Empty when `actor` is the root.
pub fn path_to_root(tree: &ShortestPathTree, actor: &str) -> Result<Vec<PathStep>> {
    let mut idx = tree
        .node(actor)
        .ok_or_else(|| BaconError::NotFound(actor.to_string()))?;
    let inner = tree.inner_tree();

    let mut path = Vec::new();
    while let Some((parent, credit)) = tree.parent_edge(idx) {
        path.push(PathStep {
            actor: inner[idx].clone(),
            movie: credit.movie.clone(),
            co_star: inner[parent].clone(),
        });
        idx = parent;
    }

    Ok(path)
}

/// Distance from `actor` to the root.
pub fn bacon_number(tree: &ShortestPathTree, actor: &str) -> Result<usize> {
    path_to_root(tree, actor).map(|path| path.len())
}

// ─── Session ────────────────────────────────────────────────────

/// The tree and distance map for one root.
#[derive(Debug, Clone)]
pub struct BaconSession {
    tree: ShortestPathTree,
    distances: DistanceMap,
}

impl BaconSession {
    /// Build the tree and distance map for `root`.
    pub fn new(graph: &CostarGraph, root: &str) -> Result<Self> {
        let tree = build_tree(graph, root)?;
        let distances = distances_by_level(&tree);
        info!(
            root,
            reachable = distances.reachable(),
            max_distance = distances.max_distance(),
            "session ready"
        );
        Ok(Self { tree, distances })
    }

    /// Switch to a new root. On failure the current session is kept.
    pub fn reroot(&mut self, graph: &CostarGraph, root: &str) -> Result<()> {
        *self = Self::new(graph, root)?;
        Ok(())
    }

    pub fn root(&self) -> &str {
        self.tree.root()
    }

    pub fn tree(&self) -> &ShortestPathTree {
        &self.tree
    }

    pub fn distances(&self) -> &DistanceMap {
        &self.distances
    }

    pub fn max_distance(&self) -> usize {
        self.distances.max_distance()
    }

    pub fn average_distance(&self) -> Result<f64> {
        self.distances.average_distance(self.root())
    }

    pub fn actors_at(&self, distance: usize) -> Option<&BTreeSet<String>> {
        self.distances.actors_at(distance)
    }

    pub fn path_to_root(&self, actor: &str) -> Result<Vec<PathStep>> {
        path_to_root(&self.tree, actor)
    }

    /// Bacon number report. Unreachable actors get `number: None`; actors
    /// missing from the graph entirely are a `NotFound` error.
    pub fn bacon_number(&self, graph: &CostarGraph, actor: &str) -> Result<BaconNumber> {
        if !graph.contains_actor(actor) {
            return Err(BaconError::NotFound(actor.to_string()));
        }
        let (number, path) = match self.path_to_root(actor) {
            Ok(path) => (Some(path.len()), path),
            Err(BaconError::NotFound(_)) => (None, Vec::new()),
            Err(e) => return Err(e),
        };
        Ok(BaconNumber {
            actor: actor.to_string(),
            root: self.root().to_string(),
            number,
            path,
        })
    }
}
