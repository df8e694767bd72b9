//! Graph traversal
//!
//! Breadth-first traversal over one of three adjacency views of a [`Graph`]:
//! outgoing edges, incoming edges, or every incident edge.

use crate::graph::{Direction, Graph, Node, NodeRef};
use std::collections::VecDeque;

/// Control signal returned by a traversal callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    /// Terminate the whole traversal immediately
    Stop,
}

impl Visit {
    pub fn is_stop(self) -> bool {
        self == Visit::Stop
    }
}

/// Breadth-first traversal starting at `start`.
///
/// `visit` is called with each newly reached node and the node it was reached
/// from (`None` for `start`). Nodes are visited at most once, in layer order;
/// within a layer, in the adjacency order of the node that discovered them.
/// Returning [`Visit::Stop`] ends the traversal at once, even mid-scan.
///
/// An unresolved `start` is a no-op. Inactive nodes are not skipped.
pub fn breadth_first_traverse<'a, F>(
    graph: &Graph,
    start: impl Into<NodeRef<'a>>,
    direction: Direction,
    mut visit: F,
) where
    F: FnMut(&Node, Option<&Node>) -> Visit,
{
    let Some(start) = graph.resolve(start).and_then(|id| graph.node(id)) else {
        return;
    };

    if visit(start, None).is_stop() {
        return;
    }

    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();
    visited[start.id().index()] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for edge in current
            .adjacency(direction)
            .iter()
            .filter_map(|&id| graph.edge(id))
        {
            let Some(next) = graph.node(edge.other(current.id())) else {
                continue;
            };
            if visited[next.id().index()] {
                continue;
            }
            if visit(next, Some(current)).is_stop() {
                return;
            }
            visited[next.id().index()] = true;
            queue.push_back(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(directed: bool) -> Graph {
        let mut graph = Graph::new(directed);
        for name in ["A", "B", "C"] {
            graph.add_node(name, None);
        }
        graph.add_edge("A", "B", None);
        graph.add_edge("B", "C", None);
        graph
    }

    fn collect(graph: &Graph, start: &str, direction: Direction) -> Vec<(String, Option<String>)> {
        let mut seen = Vec::new();
        breadth_first_traverse(graph, start, direction, |node, from| {
            seen.push((node.name().to_string(), from.map(|n| n.name().to_string())));
            Visit::Continue
        });
        seen
    }

    fn names(visits: &[(String, Option<String>)]) -> Vec<&str> {
        visits.iter().map(|(n, _)| n.as_str()).collect()
    }

    #[test]
    fn test_bfs_out_edges() {
        let graph = chain(true);
        let visits = collect(&graph, "A", Direction::Out);
        assert_eq!(names(&visits), vec!["A", "B", "C"]);
        assert_eq!(visits[0].1, None);
        assert_eq!(visits[2].1.as_deref(), Some("B"));
    }

    #[test]
    fn test_bfs_in_edges() {
        let graph = chain(true);
        assert_eq!(names(&collect(&graph, "C", Direction::In)), vec!["C", "B", "A"]);
        assert_eq!(names(&collect(&graph, "A", Direction::In)), vec!["A"]);
    }

    #[test]
    fn test_bfs_both_directions_on_directed_graph() {
        let graph = chain(true);
        assert_eq!(names(&collect(&graph, "B", Direction::Both)), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_bfs_undirected_out_view_is_empty() {
        let graph = chain(false);
        assert_eq!(names(&collect(&graph, "A", Direction::Out)), vec!["A"]);
        assert_eq!(names(&collect(&graph, "C", Direction::Both)), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_bfs_layer_order() {
        // root -> x, y ; x -> z ; y -> w
        let mut graph = Graph::new(true);
        for name in ["root", "x", "y", "z", "w"] {
            graph.add_node(name, None);
        }
        graph.add_edge("root", "x", None);
        graph.add_edge("root", "y", None);
        graph.add_edge("x", "z", None);
        graph.add_edge("y", "w", None);
        graph.add_edge("z", "root", None);

        assert_eq!(
            names(&collect(&graph, "root", Direction::Out)),
            vec!["root", "x", "y", "z", "w"]
        );
    }

    #[test]
    fn test_bfs_visits_each_node_once() {
        let mut graph = Graph::new(false);
        for name in ["a", "b", "c"] {
            graph.add_node(name, None);
        }
        graph.add_edge("a", "b", None);
        graph.add_edge("b", "c", None);
        graph.add_edge("c", "a", None);
        graph.add_edge("a", "a", None);

        assert_eq!(names(&collect(&graph, "a", Direction::Both)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_stop_on_start() {
        let graph = chain(true);
        let mut count = 0;
        breadth_first_traverse(&graph, "A", Direction::Out, |_, _| {
            count += 1;
            Visit::Stop
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn test_stop_mid_scan() {
        let mut graph = Graph::new(true);
        for name in ["hub", "a", "b", "c"] {
            graph.add_node(name, None);
        }
        graph.add_edge("hub", "a", None);
        graph.add_edge("hub", "b", None);
        graph.add_edge("hub", "c", None);

        let mut seen = Vec::new();
        breadth_first_traverse(&graph, "hub", Direction::Out, |node, _| {
            seen.push(node.name().to_string());
            if node.name() == "a" {
                Visit::Stop
            } else {
                Visit::Continue
            }
        });
        assert_eq!(seen, vec!["hub", "a"]);
    }

    #[test]
    fn test_unresolved_start_is_noop() {
        let graph = chain(true);
        let mut called = false;
        breadth_first_traverse(&graph, "missing", Direction::Both, |_, _| {
            called = true;
            Visit::Continue
        });
        assert!(!called);
    }
}
