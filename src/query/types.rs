//! Query result structures

use crate::graph::NodeId;
use serde::{Deserialize, Serialize};

/// Aggregated scores for one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeScores {
    /// Scores of the node and every descendant, duplicates kept
    pub all_scores: Vec<f64>,
    /// Mean of the node's own scores, 0 when it has none
    pub direct_score: f64,
    /// Mean of `all_scores`, 0 when empty
    pub full_score: f64,
    /// Descendant set, the node itself included
    pub descendants: Vec<NodeId>,
}

impl NodeScores {
    /// Number of scores contributing to `full_score`
    pub fn score_count(&self) -> usize {
        self.all_scores.len()
    }

    /// Whether any node in the descendant set has a score
    pub fn has_scores(&self) -> bool {
        !self.all_scores.is_empty()
    }
}
