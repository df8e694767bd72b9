//! Core graph container
//!
//! This module implements the projected graph model:
//! - Nodes unique by name, edges unique by endpoint pair
//! - Directed (`in_edges`/`out_edges`) and undirected adjacency
//! - Projection indices tying nodes and edges to the active rows of a backing store
//! - Arena storage with integer handles

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{AdjacentProjections, Graph, GraphConfig, GraphError, GraphResult, NodeRef};
pub use types::{Direction, EdgeId, GraphId, NodeId};
