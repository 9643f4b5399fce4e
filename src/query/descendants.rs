//! Memoized descendant collection
//!
//! Every node's descendant set (itself plus everything reachable along child
//! edges) is computed in one depth-first pass over the whole graph. Results are
//! memoized globally, so shared subgraphs are merged rather than re-walked.
//!
//! Cycles are broken with a path-local guard: a child that is an ancestor on the
//! current walk contributes nothing to that branch. The first node of a cycle
//! reached in insertion order therefore collects the whole cycle, while the
//! members discovered beneath it only see the part of the cycle ahead of them.

use std::time::Instant;

use tracing::debug;

use crate::graph::{CascadeEngine, CascadeError, CascadeResult, NodeId};

/// Descendant sets for every node, indexed by engine insertion order
#[derive(Debug, Clone)]
pub(crate) struct DescendantSets {
    sets: Vec<Vec<usize>>,
}

impl DescendantSets {
    /// Node positions in the descendant set of node `idx`, itself first
    pub(crate) fn get(&self, idx: usize) -> &[usize] {
        &self.sets[idx]
    }

    /// Descendant set of node `idx` as ids
    pub(crate) fn ids(&self, engine: &CascadeEngine, idx: usize) -> Vec<NodeId> {
        let nodes = engine.nodes();
        self.sets[idx].iter().map(|&d| nodes[d].id.clone()).collect()
    }

    /// Sum of all set sizes
    pub(crate) fn total_entries(&self) -> usize {
        self.sets.iter().map(Vec::len).sum()
    }
}

/// A node on the explicit DFS stack and the next child to visit
struct Frame {
    node: usize,
    next_child: usize,
}

/// Resolve child ids to positions
///
/// With validation enabled a child missing from the store is an error;
/// otherwise it is skipped.
fn resolve_children(engine: &CascadeEngine) -> CascadeResult<Vec<Vec<usize>>> {
    let validate = engine.config().validate_children;
    let mut adjacency = Vec::with_capacity(engine.node_count());

    for node in engine.nodes() {
        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            match engine.index_of(child.as_str()) {
                Some(idx) => children.push(idx),
                None if validate => return Err(CascadeError::NodeNotFound(child.clone())),
                None => {}
            }
        }
        adjacency.push(children);
    }
    Ok(adjacency)
}

/// Compute the descendant set of every node
pub(crate) fn collect_descendants(engine: &CascadeEngine) -> CascadeResult<DescendantSets> {
    let started = Instant::now();
    let adjacency = resolve_children(engine)?;
    let n = adjacency.len();

    let mut memo: Vec<Option<Vec<usize>>> = vec![None; n];
    let mut on_path = vec![false; n];
    let mut merger = Merger::new(n);
    let mut stack: Vec<Frame> = Vec::new();

    for start in 0..n {
        if memo[start].is_some() {
            continue;
        }

        on_path[start] = true;
        stack.push(Frame {
            node: start,
            next_child: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let children = &adjacency[frame.node];

            if frame.next_child < children.len() {
                let child = children[frame.next_child];
                frame.next_child += 1;

                if memo[child].is_some() || on_path[child] {
                    continue;
                }
                on_path[child] = true;
                stack.push(Frame {
                    node: child,
                    next_child: 0,
                });
                continue;
            }

            let node = frame.node;
            stack.pop();

            // Ancestors still on the path (and the node itself, for self loops)
            // are the truncated branches and contribute nothing.
            let set = merger.merge(node, &adjacency[node], &memo, &on_path);
            memo[node] = Some(set);
            on_path[node] = false;
        }
    }

    let sets = DescendantSets {
        sets: memo.into_iter().map(Option::unwrap_or_default).collect(),
    };

    debug!(
        nodes = n,
        entries = sets.total_entries(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "descendant sets collected"
    );
    Ok(sets)
}

/// Deduplicating union of child sets using a reusable stamp buffer
struct Merger {
    stamps: Vec<u32>,
    current: u32,
}

impl Merger {
    fn new(n: usize) -> Self {
        Self {
            stamps: vec![0; n],
            current: 0,
        }
    }

    fn next_stamp(&mut self) -> u32 {
        self.current = self.current.wrapping_add(1);
        if self.current == 0 {
            self.stamps.iter_mut().for_each(|s| *s = 0);
            self.current = 1;
        }
        self.current
    }

    fn merge(
        &mut self,
        node: usize,
        children: &[usize],
        memo: &[Option<Vec<usize>>],
        on_path: &[bool],
    ) -> Vec<usize> {
        let stamp = self.next_stamp();
        let mut set = vec![node];
        self.stamps[node] = stamp;

        for &child in children {
            if on_path[child] {
                continue;
            }
            let Some(child_set) = &memo[child] else {
                continue;
            };
            for &d in child_set {
                if self.stamps[d] != stamp {
                    self.stamps[d] = stamp;
                    set.push(d);
                }
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeSpec;
    use std::collections::HashSet;

    fn engine_with_edges(edges: &[(&str, &str)]) -> CascadeEngine {
        let mut engine = CascadeEngine::new();
        for (i, (from, to)) in edges.iter().enumerate() {
            engine
                .add_edge(EdgeSpec::to_child(*from, *to, format!("e{}", i)))
                .unwrap();
        }
        engine
    }

    fn set_of(engine: &CascadeEngine, id: &str) -> HashSet<String> {
        engine
            .descendants_of(id)
            .unwrap()
            .into_iter()
            .map(|d| d.as_str().to_string())
            .collect()
    }

    fn names(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn isolated_node_contains_itself() {
        let mut engine = CascadeEngine::new();
        engine.add_node("A", vec![]);
        assert_eq!(set_of(&engine, "A"), names(&["A"]));
    }

    #[test]
    fn chain_collects_everything_below() {
        let engine = engine_with_edges(&[("A", "B"), ("B", "C")]);
        assert_eq!(set_of(&engine, "A"), names(&["A", "B", "C"]));
        assert_eq!(set_of(&engine, "B"), names(&["B", "C"]));
        assert_eq!(set_of(&engine, "C"), names(&["C"]));
    }

    #[test]
    fn diamond_dedupes_shared_descendant() {
        let engine = engine_with_edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        let desc = engine.descendants_of("A").unwrap();
        assert_eq!(desc.len(), 4);
        assert_eq!(set_of(&engine, "C"), names(&["C", "D"]));
    }

    #[test]
    fn cycle_entry_point_collects_whole_cycle() {
        let engine = engine_with_edges(&[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(set_of(&engine, "A"), names(&["A", "B", "C"]));
        assert_eq!(set_of(&engine, "B"), names(&["B", "C"]));
        assert_eq!(set_of(&engine, "C"), names(&["C"]));
    }

    #[test]
    fn cycle_result_follows_insertion_order() {
        let mut engine = CascadeEngine::new();
        engine.add_node("C", vec![]);
        engine.add_node("A", vec![]);
        engine.add_node("B", vec![]);
        for (from, to) in [("A", "B"), ("B", "C"), ("C", "A")] {
            engine
                .add_edge(EdgeSpec::to_child(from, to, format!("{}{}", from, to)))
                .unwrap();
        }
        assert_eq!(set_of(&engine, "C"), names(&["A", "B", "C"]));
        assert_eq!(set_of(&engine, "A"), names(&["A", "B"]));
        assert_eq!(set_of(&engine, "B"), names(&["B"]));
    }

    #[test]
    fn self_loop_terminates() {
        let engine = engine_with_edges(&[("A", "A"), ("A", "B")]);
        assert_eq!(set_of(&engine, "A"), names(&["A", "B"]));
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let mut engine = CascadeEngine::new();
        let depth = 4_000;
        for i in 0..depth {
            engine
                .add_edge(EdgeSpec::to_child(format!("n{}", i), format!("n{}", i + 1), format!("e{}", i)))
                .unwrap();
        }
        let sets = collect_descendants(&engine).unwrap();
        assert_eq!(sets.get(depth).len(), 1);
        assert_eq!(sets.get(depth - 1).len(), 2);
        assert_eq!(sets.get(0).len(), depth + 1);
    }

    #[test]
    fn dangling_child_is_reported() {
        let mut engine = CascadeEngine::new();
        engine.add_node("A", vec![1.0]);
        engine.insert_dangling_child("A", "ghost");

        let err = collect_descendants(&engine).unwrap_err();
        assert_eq!(err, CascadeError::NodeNotFound(NodeId::from("ghost")));
    }

    #[test]
    fn dangling_child_skipped_without_validation() {
        let mut engine = CascadeEngine::with_config(
            crate::config::EngineConfig::default().with_validate_children(false),
        );
        engine.add_node("A", vec![1.0]);
        engine.insert_dangling_child("A", "ghost");

        let sets = collect_descendants(&engine).unwrap();
        assert_eq!(sets.get(0), &[0]);
    }
}
