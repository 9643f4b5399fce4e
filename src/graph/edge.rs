//! Edge declarations and their canonical parent/child orientation

use super::node::NodeId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Externally supplied identifier for an edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Create an EdgeId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Which way an edge declaration points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    /// `to` becomes a child of `from`
    #[default]
    ToChild,
    /// `to` becomes a parent of `from`
    ToParent,
}

impl EdgeDirection {
    /// Wire name: `"to_child"` or `"to_parent"`
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeDirection::ToChild => "to_child",
            EdgeDirection::ToParent => "to_parent",
        }
    }
}

impl std::fmt::Display for EdgeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to_child" => Ok(EdgeDirection::ToChild),
            "to_parent" => Ok(EdgeDirection::ToParent),
            other => Err(format!("unknown edge direction: {}", other)),
        }
    }
}

/// A single edge declaration
///
/// `create_missing` left as `None` falls back to the engine's configured default.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    /// Node the declaration starts from
    pub from: NodeId,
    /// Node the declaration points at
    pub to: NodeId,
    /// Whether `to` is a child or a parent of `from`
    pub direction: EdgeDirection,
    /// External identifier recorded for the canonical pair
    pub id: EdgeId,
    /// Create missing endpoints; `None` uses the engine default
    pub create_missing: Option<bool>,
}

impl EdgeSpec {
    /// Declare an edge in the given direction
    pub fn new(
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        direction: EdgeDirection,
        id: impl Into<EdgeId>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            direction,
            id: id.into(),
            create_missing: None,
        }
    }

    /// Declare `to` as a child of `from`
    pub fn to_child(from: impl Into<NodeId>, to: impl Into<NodeId>, id: impl Into<EdgeId>) -> Self {
        Self::new(from, to, EdgeDirection::ToChild, id)
    }

    /// Declare `to` as a parent of `from`
    pub fn to_parent(from: impl Into<NodeId>, to: impl Into<NodeId>, id: impl Into<EdgeId>) -> Self {
        Self::new(from, to, EdgeDirection::ToParent, id)
    }

    /// Whether missing endpoints are created instead of rejected
    pub fn create_missing(mut self, create_missing: bool) -> Self {
        self.create_missing = Some(create_missing);
        self
    }

    /// The stored orientation: `(parent, child)`
    pub fn canonical(&self) -> (&NodeId, &NodeId) {
        match self.direction {
            EdgeDirection::ToChild => (&self.from, &self.to),
            EdgeDirection::ToParent => (&self.to, &self.from),
        }
    }
}
