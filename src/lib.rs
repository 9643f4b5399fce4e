//! Cascade: Graph Score-Propagation Engine
//!
//! Rolls raw scores up a directed graph of hierarchical units (skills,
//! topics, activities) so that every node reports both its own performance
//! and the performance of everything reachable below it.
//!
//! # Core Concepts
//!
//! - **Nodes**: identified units carrying zero or more raw scores
//! - **Edges**: identified parent/child relationships, declared in either direction
//! - **Descendant sets**: everything reachable from a node along child edges, itself included
//!
//! Cycles are tolerated. The node of a cycle reached first in insertion order
//! collects the whole cycle; the others see only the part ahead of them.
//!
//! # Example
//!
//! ```
//! use cascade::{CascadeEngine, EdgeSpec, NodeId};
//!
//! let mut engine = CascadeEngine::new();
//! engine.add_node("fractions", vec![80.0]);
//! engine.add_node("adding-fractions", vec![60.0]);
//! engine
//!     .add_edge(EdgeSpec::to_child("fractions", "adding-fractions", "e1"))
//!     .unwrap();
//!
//! let scores = engine.calculate_node_scores().unwrap();
//! assert_eq!(scores[&NodeId::from("fractions")].full_score, 70.0);
//! ```

pub mod config;
mod graph;
pub mod query;
pub mod synthetic;

pub use config::EngineConfig;
pub use graph::{
    AdjacencySet, CascadeEngine, CascadeError, CascadeResult, EdgeDirection, EdgeId, EdgeSpec, Node,
    NodeId,
};
pub use query::NodeScores;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
