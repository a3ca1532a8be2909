//! Graph builder — turns the loaded lookup tables into the co-star graph.
//!
//! Every actor becomes a vertex; every pair of distinct actors sharing a
//! movie gets an edge labeled with that movie. Cast references to unknown
//! actor or movie ids are skipped and counted.

use petgraph::graph::NodeIndex;
use tracing::{debug, info, warn};

use super::engine::CostarGraph;
use crate::error::Result;
use crate::loader::{load_tables, DataFiles, Tables};

/// Load the three input files and build the graph from them.
pub fn build_graph_from_files(files: &DataFiles) -> Result<CostarGraph> {
    let tables = load_tables(files)?;
    Ok(build_graph(tables))
}

/// Build the co-star graph. The tables are consumed; nothing outlives the
/// call except the graph.
pub fn build_graph(tables: Tables) -> CostarGraph {
    let Tables {
        actors,
        movies,
        cast,
        ..
    } = tables;

    debug!(
        actors = actors.len(),
        movies = cast.len(),
        "building co-star graph"
    );

    let mut graph = CostarGraph::new();

    // Phase 1: one vertex per actor, ascending id
    for name in actors.values() {
        graph.add_actor(name);
    }

    // Phase 2: one edge per distinct pair in each cast
    let mut skipped = 0usize;
    for (movie_id, actor_ids) in &cast {
        let Some(title) = movies.get(movie_id) else {
            debug!(movie_id, members = actor_ids.len(), "cast references unknown movie");
            skipped += actor_ids.len();
            continue;
        };

        let mut members: Vec<NodeIndex> = Vec::with_capacity(actor_ids.len());
        for actor_id in actor_ids {
            match actors.get(actor_id) {
                Some(name) => {
                    if let Some(idx) = graph.actor(name) {
                        if !members.contains(&idx) {
                            members.push(idx);
                        }
                    }
                }
                None => {
                    debug!(movie_id, actor_id, "cast references unknown actor");
                    skipped += 1;
                }
            }
        }

        let mut linked = false;
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                linked |= graph.add_credit(a, b, title).is_some();
            }
        }
        if linked {
            graph.note_movie();
        }
    }

    if skipped > 0 {
        warn!(skipped, "dropped cast references to unknown actors or movies");
    }
    graph.note_skipped(skipped);

    let stats = graph.stats();
    info!(
        actors = stats.actor_count,
        edges = stats.edge_count,
        movies = stats.movie_count,
        "co-star graph built"
    );

    graph
}
