//! Node implementation
//!
//! A node is identified by a name that is unique within its graph. Its row
//! attributes live in the node [`BackingStore`]; the node only carries the
//! projection index addressing its row in the store's active set.

use super::property::PropertyValue;
use super::types::{Direction, EdgeId, GraphId, NodeId};
use crate::data::BackingStore;

/// A node in the graph
///
/// Nodes hold:
/// - A unique name (never reassigned)
/// - Incident edges (`edges`), plus `in_edges`/`out_edges` on directed graphs
/// - The id of the graph that created it
/// - A projection index into the active rows of the node store
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    name: String,
    host: GraphId,
    pub(crate) edges: Vec<EdgeId>,
    pub(crate) in_edges: Vec<EdgeId>,
    pub(crate) out_edges: Vec<EdgeId>,
    pub(crate) projection: Option<usize>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String, host: GraphId, projection: Option<usize>) -> Self {
        Node {
            id,
            name,
            host,
            edges: Vec::new(),
            in_edges: Vec::new(),
            out_edges: Vec::new(),
            projection,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Graph this node belongs to
    pub fn host(&self) -> GraphId {
        self.host
    }

    /// All incident edges; a self-loop appears once
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Incoming edges (directed graphs only)
    pub fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    /// Outgoing edges (directed graphs only)
    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    /// Adjacency list followed by a traversal in `direction`
    pub fn adjacency(&self, direction: Direction) -> &[EdgeId] {
        match direction {
            Direction::Out => &self.out_edges,
            Direction::In => &self.in_edges,
            Direction::Both => &self.edges,
        }
    }

    /// Position of this node's row in the store's active set, `None` when filtered out
    pub fn projection_index(&self) -> Option<usize> {
        self.projection
    }

    pub fn is_active(&self) -> bool {
        self.projection.is_some()
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn in_degree(&self) -> usize {
        self.in_edges.len()
    }

    pub fn out_degree(&self) -> usize {
        self.out_edges.len()
    }

    /// Row configuration, optionally narrowed by a dotted path.
    /// Absent while the node is inactive.
    pub fn configuration<'s, S>(&self, store: &'s S, path: Option<&str>) -> Option<&'s PropertyValue>
    where
        S: BackingStore + ?Sized,
    {
        store.configuration_for(self.projection?, path)
    }

    /// Scalar value of `dimension`
    pub fn value<S>(&self, store: &S, dimension: &str) -> Option<f64>
    where
        S: BackingStore + ?Sized,
    {
        store.scalar_value(dimension, self.projection?)
    }

    /// Visual attribute of the node's row. An inactive node still sees the
    /// store-level visual unless `ignore_parent`.
    pub fn visual<'s, S>(&self, store: &'s S, key: &str, ignore_parent: bool) -> Option<&'s PropertyValue>
    where
        S: BackingStore + ?Sized,
    {
        match self.projection {
            Some(projection) => store.visual(projection, key, ignore_parent),
            None if ignore_parent => None,
            None => store.parent_visual(key),
        }
    }

    /// No-op while the node is inactive
    pub fn set_visual<S>(&self, store: &mut S, key: &str, value: impl Into<PropertyValue>)
    where
        S: BackingStore + ?Sized,
    {
        if let Some(projection) = self.projection {
            store.set_visual(projection, key, value.into());
        }
    }

    pub fn layout<'s, S>(&self, store: &'s S) -> Option<&'s PropertyValue>
    where
        S: BackingStore + ?Sized,
    {
        store.layout(self.projection?)
    }

    /// No-op while the node is inactive
    pub fn set_layout<S>(&self, store: &mut S, layout: impl Into<PropertyValue>, merge: bool)
    where
        S: BackingStore + ?Sized,
    {
        if let Some(projection) = self.projection {
            store.set_layout(projection, layout.into(), merge);
        }
    }

    /// Raw (pre-filter) row position of this node's data
    pub fn raw_index<S>(&self, store: &S) -> Option<usize>
    where
        S: BackingStore + ?Sized,
    {
        store.raw_index_of(self.projection?)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.host == other.host && self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.host.hash(state);
        self.id.hash(state);
    }
}
