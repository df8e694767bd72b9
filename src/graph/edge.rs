//! Edge implementation
//!
//! Edges are value holders: two endpoint handles and a projection index into
//! the edge store. On directed graphs `node1` is the source and `node2` the
//! target.

use super::types::{EdgeId, NodeId};

/// An edge between two nodes of the same graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    id: EdgeId,
    node1: NodeId,
    node2: NodeId,
    pub(crate) projection: Option<usize>,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, node1: NodeId, node2: NodeId, projection: Option<usize>) -> Self {
        Edge {
            id,
            node1,
            node2,
            projection,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// First endpoint (source on directed graphs)
    pub fn node1(&self) -> NodeId {
        self.node1
    }

    /// Second endpoint (target on directed graphs)
    pub fn node2(&self) -> NodeId {
        self.node2
    }

    pub fn projection_index(&self) -> Option<usize> {
        self.projection
    }

    pub fn is_self_loop(&self) -> bool {
        self.node1 == self.node2
    }

    /// The endpoint opposite to `node`; for a self-loop that is `node` itself
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.node1 == node {
            self.node2
        } else {
            self.node1
        }
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.node1 == a && self.node2 == b) || (self.node1 == b && self.node2 == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let edge = Edge::new(EdgeId::new(0), NodeId::new(1), NodeId::new(2), None);
        assert_eq!(edge.node1(), NodeId::new(1));
        assert_eq!(edge.node2(), NodeId::new(2));
        assert_eq!(edge.projection_index(), None);
        assert!(!edge.is_self_loop());
    }

    #[test]
    fn test_other_endpoint() {
        let edge = Edge::new(EdgeId::new(0), NodeId::new(1), NodeId::new(2), Some(0));
        assert_eq!(edge.other(NodeId::new(1)), NodeId::new(2));
        assert_eq!(edge.other(NodeId::new(2)), NodeId::new(1));

        let looped = Edge::new(EdgeId::new(1), NodeId::new(4), NodeId::new(4), None);
        assert!(looped.is_self_loop());
        assert_eq!(looped.other(NodeId::new(4)), NodeId::new(4));
    }

    #[test]
    fn test_edge_connects() {
        let edge = Edge::new(EdgeId::new(5), NodeId::new(10), NodeId::new(20), None);
        assert!(edge.connects(NodeId::new(10), NodeId::new(20)));
        assert!(edge.connects(NodeId::new(20), NodeId::new(10)));
        assert!(!edge.connects(NodeId::new(10), NodeId::new(30)));
    }
}
