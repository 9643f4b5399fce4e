//! First-parent path walking

use std::collections::HashSet;

use crate::graph::{CascadeEngine, CascadeError, CascadeResult, NodeId};

/// Walk from `id` up to a root, taking the earliest linked parent at each step
///
/// Returns the path root first, `id` last. If the parent chain loops back on
/// itself the walk stops before repeating a node.
pub(crate) fn first_parent_path(engine: &CascadeEngine, id: &str) -> CascadeResult<Vec<NodeId>> {
    let mut current = engine
        .node_ref(id)
        .ok_or_else(|| CascadeError::NodeNotFound(NodeId::from_string(id)))?;

    let mut path = vec![current.id.clone()];
    let mut seen: HashSet<&NodeId> = HashSet::new();
    seen.insert(&current.id);

    while let Some(parent) = current.parents.first() {
        if !seen.insert(parent) {
            break;
        }
        current = engine
            .node_ref(parent.as_str())
            .ok_or_else(|| CascadeError::NodeNotFound(parent.clone()))?;
        path.push(current.id.clone());
    }

    path.reverse();
    Ok(path)
}
