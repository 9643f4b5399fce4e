//! Score queries over a Cascade graph
//!
//! Descendant collection runs first over the whole graph, then score
//! aggregation consumes its memoized sets. Path walking is independent.

mod descendants;
mod path;
mod scores;
mod types;

pub(crate) use descendants::collect_descendants;
pub(crate) use path::first_parent_path;
pub(crate) use scores::{calculate_node_scores, collect_all_scores, scores_for};
pub use types::NodeScores;
