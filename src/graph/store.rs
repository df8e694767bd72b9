//! Name-indexed graph container
//!
//! Nodes and edges live in insertion-ordered arenas; [`NodeId`] / [`EdgeId`]
//! are positions in those arenas. A node's arena position is also the raw row
//! position of its data in the node store, which is what lets
//! [`Graph::resynchronize`] map the store's active rows back onto nodes.

use super::edge::Edge;
use super::node::Node;
use super::types::{Direction, EdgeId, GraphId, NodeId};
use crate::algo::{self, Visit};
use crate::data::{BackingStore, RowFilter};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Errors raised by the fallible parts of the crate
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Raw row {raw} out of range for a store of {rows} rows")]
    RowOutOfRange { raw: usize, rows: usize },

    #[error("Raw row {0} selected more than once")]
    DuplicateRow(usize),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Construction options for a [`Graph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Edges have a source and a target; fixed for the graph's lifetime
    pub directed: bool,
    /// Initial node arena capacity
    pub node_capacity: usize,
    /// Initial edge arena capacity
    pub edge_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: false,
            node_capacity: 64,
            edge_capacity: 128,
        }
    }
}

/// Anything that can name a node of a graph
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Name(&'a str),
    /// Resolves by position alone, so a handle taken from another graph
    /// (a clone, say) resolves to whatever node sits at that position here
    Id(NodeId),
    /// Resolves only within the graph that created the node
    Node(&'a Node),
}

impl<'a> From<&'a str> for NodeRef<'a> {
    fn from(name: &'a str) -> Self {
        NodeRef::Name(name)
    }
}

impl<'a> From<&'a String> for NodeRef<'a> {
    fn from(name: &'a String) -> Self {
        NodeRef::Name(name)
    }
}

impl From<NodeId> for NodeRef<'_> {
    fn from(id: NodeId) -> Self {
        NodeRef::Id(id)
    }
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(node: &'a Node) -> Self {
        NodeRef::Node(node)
    }
}

/// Projection indices related to a node or edge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacentProjections {
    pub nodes: Vec<usize>,
    pub edges: Vec<usize>,
}

impl AdjacentProjections {
    fn push_node(&mut self, projection: Option<usize>) {
        if let Some(p) = projection {
            if !self.nodes.contains(&p) {
                self.nodes.push(p);
            }
        }
    }
}

/// Graph container
///
/// Owns every node and edge. Names are unique; an edge is identified by its
/// ordered endpoint pair (either order on undirected graphs). Nothing is ever
/// removed, so handles stay valid for the graph's lifetime.
#[derive(Debug)]
pub struct Graph {
    id: GraphId,
    directed: bool,
    /// Node arena, keyed by name
    nodes: FxIndexMap<String, Node>,
    /// Edge arena, keyed by (node1, node2)
    edges: FxIndexMap<(NodeId, NodeId), Edge>,
}

impl Graph {
    /// Create an empty graph
    pub fn new(directed: bool) -> Self {
        Self::with_config(GraphConfig {
            directed,
            ..GraphConfig::default()
        })
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Graph {
            id: GraphId::next(),
            directed: config.directed,
            nodes: IndexMap::with_capacity_and_hasher(config.node_capacity, FxBuildHasher::default()),
            edges: IndexMap::with_capacity_and_hasher(config.edge_capacity, FxBuildHasher::default()),
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Add a node, or return the existing one with that name.
    ///
    /// `projection` is only used when the node is created.
    pub fn add_node(&mut self, name: &str, projection: Option<usize>) -> NodeId {
        if let Some(index) = self.nodes.get_index_of(name) {
            return NodeId::new(index);
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes
            .insert(name.to_string(), Node::new(id, name.to_string(), self.id, projection));
        id
    }

    /// Get a node by name
    pub fn get_node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Like [`Graph::get_node_by_name`], as an error when missing
    pub fn require_node(&self, name: &str) -> GraphResult<&Node> {
        self.get_node_by_name(name)
            .ok_or_else(|| GraphError::NodeNotFound(name.to_string()))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get_index(id.index()).map(|(_, node)| node)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get_index(id.index()).map(|(_, edge)| edge)
    }

    /// Resolve a name, handle or node reference to a handle of this graph
    pub fn resolve<'a>(&self, node: impl Into<NodeRef<'a>>) -> Option<NodeId> {
        match node.into() {
            NodeRef::Name(name) => self.nodes.get_index_of(name).map(NodeId::new),
            NodeRef::Id(id) => (id.index() < self.nodes.len()).then_some(id),
            NodeRef::Node(node) => (node.host() == self.id).then(|| node.id()),
        }
    }

    /// Add an edge, or return the existing one between the same endpoints.
    ///
    /// Returns `None` when either endpoint does not resolve. `projection` is
    /// only used when the edge is created.
    pub fn add_edge<'a>(
        &mut self,
        n1: impl Into<NodeRef<'a>>,
        n2: impl Into<NodeRef<'a>>,
        projection: Option<usize>,
    ) -> Option<EdgeId> {
        let (Some(node1), Some(node2)) = (self.resolve(n1), self.resolve(n2)) else {
            trace!(graph = %self.id, "add_edge: endpoint not found");
            return None;
        };
        if let Some(existing) = self.find_edge(node1, node2) {
            return Some(existing);
        }

        let id = EdgeId::new(self.edges.len());
        if self.directed {
            self.nodes[node1.index()].out_edges.push(id);
            self.nodes[node2.index()].in_edges.push(id);
        }
        self.nodes[node1.index()].edges.push(id);
        if node1 != node2 {
            self.nodes[node2.index()].edges.push(id);
        }
        self.edges
            .insert((node1, node2), Edge::new(id, node1, node2, projection));
        Some(id)
    }

    /// Get the edge between two nodes; either order matches on undirected graphs
    pub fn get_edge<'a>(
        &self,
        n1: impl Into<NodeRef<'a>>,
        n2: impl Into<NodeRef<'a>>,
    ) -> Option<&Edge> {
        let id = self.find_edge(self.resolve(n1)?, self.resolve(n2)?)?;
        self.edge(id)
    }

    fn find_edge(&self, node1: NodeId, node2: NodeId) -> Option<EdgeId> {
        self.edges
            .get_index_of(&(node1, node2))
            .or_else(|| {
                if self.directed {
                    None
                } else {
                    self.edges.get_index_of(&(node2, node1))
                }
            })
            .map(EdgeId::new)
    }

    /// Get number of nodes, active or not
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get number of edges, active or not
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Every node in insertion order, including inactive ones
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Every edge in insertion order, including inactive ones
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Active nodes in insertion order
    pub fn active_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().filter(|node| node.is_active())
    }

    /// Active edges in insertion order; an edge also needs both endpoints active
    pub fn active_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values().filter(move |edge| self.is_edge_active(edge))
    }

    pub fn is_edge_active(&self, edge: &Edge) -> bool {
        edge.projection.is_some()
            && self.is_node_active(edge.node1())
            && self.is_node_active(edge.node2())
    }

    fn is_node_active(&self, id: NodeId) -> bool {
        self.node(id).map_or(false, Node::is_active)
    }

    /// Node whose row sits at `projection` in the store's active set
    pub fn get_node_by_index<S>(&self, store: &S, projection: usize) -> Option<&Node>
    where
        S: BackingStore + ?Sized,
    {
        self.node(NodeId::new(store.raw_position_of(projection)?))
    }

    /// Edge whose row sits at `projection` in the edge store's active set
    pub fn get_edge_by_index<S>(&self, store: &S, projection: usize) -> Option<&Edge>
    where
        S: BackingStore + ?Sized,
    {
        self.edge(EdgeId::new(store.raw_position_of(projection)?))
    }

    /// Rebuild node projection indices from the store's current active rows.
    ///
    /// Every node is reset to inactive first; then the node at raw position
    /// `store.raw_position_of(i)` receives projection `i`.
    pub fn resynchronize<S>(&mut self, store: &S)
    where
        S: BackingStore + ?Sized,
    {
        for node in self.nodes.values_mut() {
            node.projection = None;
        }
        let active = store.active_row_count();
        for i in 0..active {
            match store.raw_position_of(i) {
                Some(raw) if raw < self.nodes.len() => self.nodes[raw].projection = Some(i),
                raw => warn!(graph = %self.id, projection = i, ?raw, "active row has no node"),
            }
        }
        debug!(graph = %self.id, active, nodes = self.nodes.len(), "resynchronized node projections");
    }

    /// Full projection rebuild for nodes and edges.
    ///
    /// After the nodes are resynchronized, edge rows whose endpoints are not
    /// both active are removed from the edge store's active set, and edge
    /// projection indices are rebuilt from what remains. Edge raw position `r`
    /// belongs to the `r`-th inserted edge.
    pub fn resynchronize_with_edges<N, E>(&mut self, node_store: &N, edge_store: &mut E)
    where
        N: BackingStore + ?Sized,
        E: RowFilter,
    {
        self.resynchronize(node_store);

        let graph = &*self;
        edge_store.retain_rows(|raw| {
            graph.edges.get_index(raw).map_or(false, |(_, edge)| {
                graph.is_node_active(edge.node1()) && graph.is_node_active(edge.node2())
            })
        });

        for edge in self.edges.values_mut() {
            edge.projection = None;
        }
        let active = edge_store.active_row_count();
        for i in 0..active {
            let Some(raw) = edge_store.raw_position_of(i) else {
                continue;
            };
            match self.edges.get_index_mut(raw) {
                Some((_, edge)) => edge.projection = Some(i),
                None => warn!(graph = %self.id, raw, "active edge row has no edge"),
            }
        }
        debug!(graph = %self.id, active, edges = self.edges.len(), "resynchronized edge projections");
    }

    /// Projection indices related to a node: its incident active edges and
    /// their endpoints (the node itself included)
    pub fn adjacent_projections<'a>(&self, node: impl Into<NodeRef<'a>>) -> AdjacentProjections {
        let mut related = AdjacentProjections::default();
        let Some(node) = self.resolve(node).and_then(|id| self.node(id)) else {
            return related;
        };
        for edge in node.edges().iter().filter_map(|&id| self.edge(id)) {
            let Some(projection) = edge.projection_index() else {
                continue;
            };
            related.edges.push(projection);
            related.push_node(self.node(edge.node1()).and_then(Node::projection_index));
            related.push_node(self.node(edge.node2()).and_then(Node::projection_index));
        }
        related
    }

    /// Projection indices related to an edge: its own and its endpoints'
    pub fn edge_adjacent_projections(&self, edge: &Edge) -> AdjacentProjections {
        let mut related = AdjacentProjections::default();
        related.edges.extend(edge.projection_index());
        related.push_node(self.node(edge.node1()).and_then(Node::projection_index));
        related.push_node(self.node(edge.node2()).and_then(Node::projection_index));
        related
    }

    /// Breadth-first traversal from `start`; see [`algo::breadth_first_traverse`]
    pub fn breadth_first_traverse<'a, F>(
        &self,
        start: impl Into<NodeRef<'a>>,
        direction: Direction,
        visit: F,
    ) where
        F: FnMut(&Node, Option<&Node>) -> Visit,
    {
        algo::breadth_first_traverse(self, start, direction, visit)
    }
}

impl Clone for Graph {
    /// Copy the topology into a new graph with fresh node and edge identities.
    ///
    /// Names, connectivity and projection indices carry over; store data does not.
    fn clone(&self) -> Self {
        let mut graph = Graph::with_config(GraphConfig {
            directed: self.directed,
            node_capacity: self.nodes.len(),
            edge_capacity: self.edges.len(),
        });
        for node in self.nodes.values() {
            graph.add_node(node.name(), node.projection);
        }
        for edge in self.edges.values() {
            let (Some(n1), Some(n2)) = (self.node(edge.node1()), self.node(edge.node2())) else {
                continue;
            };
            graph.add_edge(n1.name(), n2.name(), edge.projection);
        }
        graph
    }
}
