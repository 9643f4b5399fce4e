//! Synthetic graph shapes for load testing

use crate::graph::{CascadeEngine, CascadeResult, EdgeSpec};

/// Id of the `i`th synthetic node
pub fn node_name(i: usize) -> String {
    format!("n{}", i)
}

/// Binary tree of `nodes` nodes rooted at `n0`
///
/// Node `i` is a child of node `(i - 1) / 2`. When `cross_link_every` is
/// non-zero, every node whose index is a positive multiple of it also gets
/// the root as a child, closing a cycle through the root. Each node carries
/// a single score in `0..100`.
pub fn binary_tree(nodes: usize, cross_link_every: usize) -> CascadeResult<CascadeEngine> {
    let mut engine = CascadeEngine::new();
    for i in 0..nodes {
        engine.add_node(node_name(i), vec![(i % 100) as f64]);
    }

    let root = node_name(0);
    for i in 1..nodes {
        engine.add_edge(EdgeSpec::to_child(
            node_name((i - 1) / 2),
            node_name(i),
            format!("e{}", i),
        ))?;
        if cross_link_every > 0 && i % cross_link_every == 0 {
            engine.add_edge(EdgeSpec::to_child(node_name(i), root.as_str(), format!("x{}", i)))?;
        }
    }
    Ok(engine)
}

/// A single root `n0` with `width` direct children, every node scored
pub fn fan_out(width: usize) -> CascadeResult<CascadeEngine> {
    let mut engine = CascadeEngine::new();
    engine.add_node(node_name(0), vec![50.0]);

    let children: Vec<String> = (1..=width).map(node_name).collect();
    for (i, child) in children.iter().enumerate() {
        engine.add_node(child.as_str(), vec![(i % 100) as f64]);
    }

    let edge_ids: Vec<String> = (1..=width).map(|i| format!("e{}", i)).collect();
    engine.add_edges(node_name(0), children, crate::EdgeDirection::ToChild, edge_ids, None)?;
    Ok(engine)
}
