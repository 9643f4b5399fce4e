//! Score aggregation over descendant sets

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use super::descendants::{collect_descendants, DescendantSets};
use super::types::NodeScores;
use crate::graph::{mean, CascadeEngine, CascadeResult, NodeId};

/// Concatenate the own scores of every node in `idx`'s descendant set
fn gather(engine: &CascadeEngine, sets: &DescendantSets, idx: usize) -> Vec<f64> {
    let nodes = engine.nodes();
    let members = sets.get(idx);
    let len = members.iter().map(|&d| nodes[d].scores.len()).sum();

    let mut all = Vec::with_capacity(len);
    for &d in members {
        all.extend_from_slice(&nodes[d].scores);
    }
    all
}

/// Scores of every node together with all of its descendants
pub(crate) fn collect_all_scores(engine: &CascadeEngine) -> CascadeResult<HashMap<NodeId, Vec<f64>>> {
    let sets = collect_descendants(engine)?;
    Ok(engine
        .nodes()
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.clone(), gather(engine, &sets, idx)))
        .collect())
}

/// Statistics for a single node from an already collected pass
pub(crate) fn scores_for(engine: &CascadeEngine, sets: &DescendantSets, idx: usize) -> NodeScores {
    let all_scores = gather(engine, sets, idx);
    NodeScores {
        direct_score: engine.nodes()[idx].direct_score(),
        full_score: mean(&all_scores),
        all_scores,
        descendants: sets.ids(engine, idx),
    }
}

/// Direct and full scores for every node
pub(crate) fn calculate_node_scores(
    engine: &CascadeEngine,
) -> CascadeResult<HashMap<NodeId, NodeScores>> {
    let sets = collect_descendants(engine)?;
    let started = Instant::now();

    let results: HashMap<NodeId, NodeScores> = engine
        .nodes()
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.clone(), scores_for(engine, &sets, idx)))
        .collect();

    debug!(
        nodes = results.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "node scores calculated"
    );
    Ok(results)
}
