//! Core graph data structures

mod edge;
mod engine;
mod node;


pub use edge::{EdgeDirection, EdgeId, EdgeSpec};
pub use engine::{CascadeEngine, CascadeError, CascadeResult};
pub use node::{AdjacencySet, Node, NodeId};

pub(crate) use node::mean;
