//! Graph algorithms module
//!
//! Traversals over a [`crate::graph::Graph`]. Depth-first traversal is not
//! provided.

pub mod traversal;

pub use traversal::{breadth_first_traverse, Visit};
