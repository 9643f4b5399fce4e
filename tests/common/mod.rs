//! Common test utilities for Cascade integration tests
//!
//! Builders for small hand-written graphs and random graphs, plus plain
//! reference walks to check the memoized collector against.

pub mod graph_builder;

#[allow(unused_imports)]
pub use graph_builder::{
    build_from_edges, naive_descendants, random_cyclic, random_dag, recursive_descendants,
    RandomDag,
};
