//! Graph building utilities for integration tests

use cascade::{CascadeEngine, EdgeSpec, NodeId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Build an engine from `(id, scores)` pairs followed by `(parent, child)` edges
///
/// Nodes are inserted first, in the order given, so insertion order is
/// under the caller's control.
pub fn build_from_edges(nodes: &[(&str, Vec<f64>)], edges: &[(&str, &str)]) -> CascadeEngine {
    let mut engine = CascadeEngine::new();
    for (id, scores) in nodes {
        engine.add_node(*id, scores.clone());
    }
    for (parent, child) in edges {
        engine
            .add_edge(EdgeSpec::to_child(*parent, *child, format!("{}->{}", parent, child)))
            .expect("edge endpoints are auto-created");
    }
    engine
}

/// A random acyclic graph and the edges it was built from
pub struct RandomDag {
    pub engine: CascadeEngine,
    pub edges: Vec<(usize, usize)>,
    pub nodes: usize,
}

/// Random DAG: edges only run from a lower index to a higher one
///
/// Node ids are inserted in a shuffled order so the collector's insertion
/// order differs from the topological one.
pub fn random_dag(seed: u64, nodes: usize, edge_probability: f64) -> RandomDag {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = CascadeEngine::new();

    let mut order: Vec<usize> = (0..nodes).collect();
    order.shuffle(&mut rng);
    for &i in &order {
        let count = rng.gen_range(0..3);
        let scores = (0..count).map(|_| rng.gen_range(0..=100) as f64).collect();
        engine.add_node(format!("n{}", i), scores);
    }

    let mut edges = Vec::new();
    for parent in 0..nodes {
        for child in (parent + 1)..nodes {
            if rng.gen_bool(edge_probability) {
                engine
                    .add_edge(EdgeSpec::to_child(
                        format!("n{}", parent),
                        format!("n{}", child),
                        format!("e{}-{}", parent, child),
                    ))
                    .expect("endpoints exist");
                edges.push((parent, child));
            }
        }
    }

    RandomDag {
        engine,
        edges,
        nodes,
    }
}

/// Plain per-node DFS reachability, itself included
pub fn naive_descendants(nodes: usize, edges: &[(usize, usize)]) -> HashMap<NodeId, BTreeSet<NodeId>> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes];
    for &(parent, child) in edges {
        adjacency[parent].push(child);
    }

    (0..nodes)
        .map(|start| {
            let mut seen = vec![false; nodes];
            let mut stack = vec![start];
            seen[start] = true;
            while let Some(current) = stack.pop() {
                for &next in &adjacency[current] {
                    if !seen[next] {
                        seen[next] = true;
                        stack.push(next);
                    }
                }
            }
            let set = (0..nodes)
                .filter(|&i| seen[i])
                .map(|i| NodeId::from(format!("n{}", i)))
                .collect();
            (NodeId::from(format!("n{}", start)), set)
        })
        .collect()
}

/// Random graph that may contain cycles and self loops
///
/// Candidate edges are tried in a shuffled order, so child insertion order
/// is unrelated to node ids.
pub fn random_cyclic(seed: u64, nodes: usize, edge_probability: f64) -> CascadeEngine {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = CascadeEngine::new();
    for i in 0..nodes {
        engine.add_node(format!("n{}", i), vec![rng.gen_range(0..=100) as f64]);
    }

    let mut pairs: Vec<(usize, usize)> = (0..nodes)
        .flat_map(|p| (0..nodes).map(move |c| (p, c)))
        .collect();
    pairs.shuffle(&mut rng);
    for (parent, child) in pairs {
        if rng.gen_bool(edge_probability) {
            engine
                .add_edge(EdgeSpec::to_child(
                    format!("n{}", parent),
                    format!("n{}", child),
                    format!("e{}-{}", parent, child),
                ))
                .expect("endpoints exist");
        }
    }
    engine
}

/// Recursive descendant collection: memo first, then the on-path guard
///
/// Walks nodes in insertion order and children in the order they were
/// linked, copying the path set into each call.
pub fn recursive_descendants(engine: &CascadeEngine) -> HashMap<NodeId, BTreeSet<NodeId>> {
    fn visit(
        engine: &CascadeEngine,
        node: &NodeId,
        path: &HashSet<NodeId>,
        memo: &mut HashMap<NodeId, BTreeSet<NodeId>>,
    ) -> BTreeSet<NodeId> {
        if let Some(done) = memo.get(node) {
            return done.clone();
        }
        if path.contains(node) {
            return BTreeSet::new();
        }

        let mut below = path.clone();
        below.insert(node.clone());

        let mut set = BTreeSet::from([node.clone()]);
        for child in engine.children_of(node.as_str()).expect("node exists") {
            set.extend(visit(engine, &child, &below, memo));
        }
        memo.insert(node.clone(), set.clone());
        set
    }

    let mut memo = HashMap::new();
    for node in engine.node_ids() {
        visit(engine, &node, &HashSet::new(), &mut memo);
    }
    memo
}
