//! Node representation in the score graph

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

/// Unique identifier for a node
///
/// Serializes as a plain string. Cloning is a reference-count bump, so ids can be
/// handed out freely in result maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Arc<str>);

impl NodeId {
    /// Create a NodeId from a string
    pub fn from_string(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::from_string(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Set of node ids that remembers insertion order
///
/// Iteration, `first` and serialization follow the order ids were first
/// inserted; re-inserting an id is a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<NodeId>", into = "Vec<NodeId>")]
pub struct AdjacencySet {
    order: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl AdjacencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id`, returning whether it was new
    pub fn insert(&mut self, id: NodeId) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.order.push(id);
        true
    }

    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        NodeId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.members.contains(id)
    }

    /// Earliest inserted id
    pub fn first(&self) -> Option<&NodeId> {
        self.order.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeId> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl PartialEq for AdjacencySet {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl<'a> IntoIterator for &'a AdjacencySet {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<NodeId>> for AdjacencySet {
    fn from(ids: Vec<NodeId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }
}

impl From<AdjacencySet> for Vec<NodeId> {
    fn from(set: AdjacencySet) -> Self {
        set.order
    }
}

/// A node in the score graph
///
/// `children` and `parents` mirror each other: `b ∈ a.children` exactly when
/// `a ∈ b.parents`. Only the engine mutates them. Both keep edge insertion
/// order, which decides how cycles are broken during descendant collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// Raw measurements taken directly on this node
    pub scores: Vec<f64>,
    /// Nodes this node points to
    pub children: AdjacencySet,
    /// Nodes pointing at this node
    pub parents: AdjacencySet,
}

impl Node {
    /// Create a node with the given scores and no relationships
    pub fn new(id: impl Into<NodeId>, scores: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            scores,
            children: AdjacencySet::new(),
            parents: AdjacencySet::new(),
        }
    }

    /// Mean of this node's own scores, 0 when it has none
    pub fn direct_score(&self) -> f64 {
        mean(&self.scores)
    }

    /// Whether nothing points at this node
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Arithmetic mean, 0 for an empty slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
