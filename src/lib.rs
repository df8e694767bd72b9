//! Tablegraph
//!
//! A mutable, name-indexed graph whose node and edge attributes live in an
//! external tabular store. The store's active row set can be filtered or
//! reordered at any time; [`Graph::resynchronize`] then recomputes which nodes
//! and edges are active and where their rows sit.
//!
//! # Modules
//!
//! - [`graph`]: nodes, edges and the [`Graph`] container (registries,
//!   directed/undirected adjacency, projection indices, cloning)
//! - [`algo`]: breadth-first traversal
//! - [`data`]: the [`BackingStore`] contract and the in-memory [`RowStore`]
//! - [`document`]: building a graph and its stores from JSON/YAML
//!
//! ## Example Usage
//!
//! ```rust
//! use tablegraph::{Direction, Graph, RowRecord, RowStore, Visit};
//!
//! let mut rows = RowStore::new();
//! let mut graph = Graph::new(true);
//! for (i, name) in ["a", "b", "c"].iter().enumerate() {
//!     let raw = rows.push_row(RowRecord::new().with_value("value", i as f64));
//!     graph.add_node(name, Some(raw));
//! }
//! graph.add_edge("a", "b", None);
//! graph.add_edge("b", "c", None);
//!
//! // Filter the store, then bring the graph back in line with it
//! rows.filter_by_value("value", |v| v > 0.0);
//! graph.resynchronize(&rows);
//! assert_eq!(graph.active_nodes().count(), 2);
//!
//! let mut order = Vec::new();
//! graph.breadth_first_traverse("a", Direction::Out, |node, _| {
//!     order.push(node.name().to_string());
//!     Visit::Continue
//! });
//! assert_eq!(order, vec!["a", "b", "c"]);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod data;
pub mod document;
pub mod graph;

// Re-export main types for convenience
pub use graph::{
    AdjacentProjections, Direction, Edge, EdgeId, Graph, GraphConfig, GraphError, GraphId,
    GraphResult, Node, NodeId, NodeRef, PropertyMap, PropertyValue,
};

pub use algo::{breadth_first_traverse, Visit};

pub use data::{BackingStore, RowFilter, RowRecord, RowStore};

pub use document::{BuiltGraph, DocumentError, DocumentResult, EdgeRecord, GraphDocument, NodeRecord};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
