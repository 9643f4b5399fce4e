//! CascadeEngine: node store, edge registry and the entry point for score queries

use super::edge::{EdgeDirection, EdgeId, EdgeSpec};
use super::node::{Node, NodeId};
use crate::config::EngineConfig;
use crate::query::{self, NodeScores};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors that can occur in Cascade operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CascadeError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for Cascade operations
pub type CascadeResult<T> = Result<T, CascadeError>;

/// The score-propagation engine
///
/// Owns every node and edge. Mutation is cheap and performs no graph analysis;
/// score queries run a full descendant pass followed by an aggregation pass.
#[derive(Debug, Default)]
pub struct CascadeEngine {
    config: EngineConfig,
    /// Nodes in insertion order
    nodes: Vec<Node>,
    /// Position of each node in `nodes`
    index: HashMap<NodeId, usize>,
    /// Edge ids keyed by parent, then child
    edge_ids: HashMap<NodeId, HashMap<NodeId, EdgeId>>,
    edge_count: usize,
}

impl CascadeEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given defaults
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Add a node, or replace the scores of an existing one
    ///
    /// Whether an existing node is overwritten follows `EngineConfig::overwrite_existing`.
    pub fn add_node(&mut self, id: impl Into<NodeId>, scores: Vec<f64>) {
        let overwrite = self.config.overwrite_existing;
        self.add_node_with(id, scores, overwrite);
    }

    /// Add a node with explicit overwrite behavior
    ///
    /// Overwriting replaces only the score list; children and parents are kept.
    pub fn add_node_with(&mut self, id: impl Into<NodeId>, scores: Vec<f64>, overwrite_if_exists: bool) {
        let id = id.into();
        match self.index.get(&id) {
            Some(&idx) if overwrite_if_exists => {
                self.nodes[idx].scores = scores;
            }
            Some(_) => {
                warn!(node = %id, "node already exists, overwrite skipped");
            }
            None => {
                self.index.insert(id.clone(), self.nodes.len());
                self.nodes.push(Node::new(id, scores));
            }
        }
    }

    /// Add a single edge
    ///
    /// Missing endpoints are created (checking `from`, then `to`) unless
    /// `create_missing` resolves to false, in which case the first missing
    /// endpoint is reported and nothing is changed.
    pub fn add_edge(&mut self, spec: EdgeSpec) -> CascadeResult<()> {
        let create_missing = spec.create_missing.unwrap_or(self.config.create_missing);

        for endpoint in [&spec.from, &spec.to] {
            if self.index.contains_key(endpoint) {
                continue;
            }
            if !create_missing {
                return Err(CascadeError::NodeNotFound(endpoint.clone()));
            }
            debug!(node = %endpoint, edge = %spec.id, "creating missing endpoint");
            self.add_node_with(endpoint.clone(), Vec::new(), false);
        }

        let (parent, child) = spec.canonical();
        self.link(parent, child);

        let previous = self
            .edge_ids
            .entry(parent.clone())
            .or_default()
            .insert(child.clone(), spec.id.clone());
        if previous.is_none() {
            self.edge_count += 1;
        }

        trace!(edge = %spec.id, parent = %parent, child = %child, "edge added");
        Ok(())
    }

    /// Add one edge from `from` to each of `to_ids`, pairing ids by position
    ///
    /// Fails before any mutation if the two lists differ in length. Individual
    /// failures propagate immediately; pairs already applied stay applied.
    pub fn add_edges<T, E>(
        &mut self,
        from: impl Into<NodeId>,
        to_ids: impl IntoIterator<Item = T>,
        direction: EdgeDirection,
        edge_ids: impl IntoIterator<Item = E>,
        create_missing: Option<bool>,
    ) -> CascadeResult<()>
    where
        T: Into<NodeId>,
        E: Into<EdgeId>,
    {
        let from = from.into();
        let to_ids: Vec<NodeId> = to_ids.into_iter().map(Into::into).collect();
        let edge_ids: Vec<EdgeId> = edge_ids.into_iter().map(Into::into).collect();

        if to_ids.len() != edge_ids.len() {
            return Err(CascadeError::Validation(format!(
                "count mismatch: {} target nodes but {} edge ids",
                to_ids.len(),
                edge_ids.len()
            )));
        }

        for (to, id) in to_ids.into_iter().zip(edge_ids) {
            let mut spec = EdgeSpec::new(from.clone(), to, direction, id);
            spec.create_missing = create_missing;
            self.add_edge(spec)?;
        }
        Ok(())
    }

    /// Id recorded for the canonical pair `parent -> child`
    pub fn get_edge_id(&self, parent: &str, child: &str) -> Option<EdgeId> {
        self.edge_ids.get(parent)?.get(child).cloned()
    }

    /// Record `child` under `parent` on both sides
    fn link(&mut self, parent: &NodeId, child: &NodeId) {
        if let Some(&idx) = self.index.get(parent) {
            self.nodes[idx].children.insert(child.clone());
        }
        if let Some(&idx) = self.index.get(child) {
            self.nodes[idx].parents.insert(parent.clone());
        }
    }

    /// Check if a node exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get a copy of a node
    pub fn node(&self, id: &str) -> Option<Node> {
        self.node_ref(id).cloned()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct parent/child pairs
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// All node ids in insertion order
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn children_of(&self, id: &str) -> CascadeResult<Vec<NodeId>> {
        Ok(self.require(id)?.children.iter().cloned().collect())
    }

    pub fn parents_of(&self, id: &str) -> CascadeResult<Vec<NodeId>> {
        Ok(self.require(id)?.parents.iter().cloned().collect())
    }

    /// Ids of nodes without parents, in insertion order
    pub fn get_root_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.is_root())
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn get_num_roots(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_root()).count()
    }

    /// Every node's descendant set, itself included
    pub fn collect_descendants(&self) -> CascadeResult<HashMap<NodeId, Vec<NodeId>>> {
        let sets = query::collect_descendants(self)?;
        Ok(self
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id.clone(), sets.ids(self, idx)))
            .collect())
    }

    /// Descendant set of one node, as computed by a full pass
    ///
    /// Runs the whole descendant pass on every call; use `collect_descendants`
    /// when more than one node is needed.
    pub fn descendants_of(&self, id: &str) -> CascadeResult<Vec<NodeId>> {
        let idx = self.require_index(id)?;
        let sets = query::collect_descendants(self)?;
        Ok(sets.ids(self, idx))
    }

    /// Concatenated scores of every node's descendant set
    pub fn collect_all_scores(&self) -> CascadeResult<HashMap<NodeId, Vec<f64>>> {
        query::collect_all_scores(self)
    }

    /// Direct and full score statistics for every node
    pub fn calculate_node_scores(&self) -> CascadeResult<HashMap<NodeId, NodeScores>> {
        query::calculate_node_scores(self)
    }

    /// Score statistics for one node, as computed by a full pass
    ///
    /// Runs the whole descendant pass on every call; use `calculate_node_scores`
    /// when more than one node is needed.
    pub fn node_scores(&self, id: &str) -> CascadeResult<NodeScores> {
        let idx = self.require_index(id)?;
        let sets = query::collect_descendants(self)?;
        Ok(query::scores_for(self, &sets, idx))
    }

    /// Path from a root down to `id`, following the first parent at each step
    pub fn first_parent_path(&self, id: &str) -> CascadeResult<Vec<NodeId>> {
        query::first_parent_path(self, id)
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_ref(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    fn require(&self, id: &str) -> CascadeResult<&Node> {
        self.node_ref(id)
            .ok_or_else(|| CascadeError::NodeNotFound(NodeId::from_string(id)))
    }

    fn require_index(&self, id: &str) -> CascadeResult<usize> {
        self.index_of(id)
            .ok_or_else(|| CascadeError::NodeNotFound(NodeId::from_string(id)))
    }

    /// Insert a child reference without creating the child or its back link
    #[cfg(test)]
    pub(crate) fn insert_dangling_child(&mut self, parent: &str, child: &str) {
        if let Some(idx) = self.index_of(parent) {
            self.nodes[idx].children.insert(NodeId::from_string(child));
        }
    }
}
