//! Building graphs from node/edge documents
//!
//! A [`GraphDocument`] lists nodes and edges together with their row data.
//! [`GraphDocument::build`] produces the graph plus the two row stores backing
//! it, keeping raw row `r` of each store aligned with the `r`-th inserted node
//! or edge.

use crate::data::{BackingStore, RowRecord, RowStore};
use crate::graph::{Graph, GraphConfig, PropertyMap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while reading a document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

/// A node and its row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    #[serde(flatten)]
    pub row: RowRecord,
}

/// An edge and its row; endpoints are node names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub row: RowRecord,
}

/// Serialized description of a graph and its row data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphDocument {
    pub directed: bool,
    pub nodes: Vec<NodeRecord>,
    #[serde(alias = "links")]
    pub edges: Vec<EdgeRecord>,
    /// Store-level visuals shared by every node row
    pub node_visuals: PropertyMap,
    /// Store-level visuals shared by every edge row
    pub edge_visuals: PropertyMap,
}

/// A graph together with the stores behind its nodes and edges
#[derive(Debug)]
pub struct BuiltGraph {
    pub graph: Graph,
    pub nodes: RowStore,
    pub edges: RowStore,
}

impl BuiltGraph {
    /// Recompute projections after either store's active set changed
    pub fn resynchronize(&mut self) {
        self.graph
            .resynchronize_with_edges(&self.nodes, &mut self.edges);
    }
}

impl GraphDocument {
    pub fn from_json(input: &str) -> DocumentResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_yaml(input: &str) -> DocumentResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Read a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: impl AsRef<Path>) -> DocumentResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&input),
            Some("yaml") | Some("yml") => Self::from_yaml(&input),
            other => Err(DocumentError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Build the graph and its row stores.
    ///
    /// Duplicate node names, edges with an unknown endpoint and duplicate
    /// edges are skipped and get no row.
    pub fn build(&self) -> BuiltGraph {
        let mut graph = Graph::with_config(GraphConfig {
            directed: self.directed,
            node_capacity: self.nodes.len(),
            edge_capacity: self.edges.len(),
        });
        let mut nodes = RowStore::new();
        let mut edges = RowStore::new();

        for record in &self.nodes {
            if graph.get_node_by_name(&record.name).is_some() {
                warn!(name = %record.name, "duplicate node skipped");
                continue;
            }
            let raw = nodes.push_row(record.row.clone());
            graph.add_node(&record.name, Some(raw));
        }

        for record in &self.edges {
            let (Some(source), Some(target)) = (
                graph.resolve(record.source.as_str()),
                graph.resolve(record.target.as_str()),
            ) else {
                warn!(source = %record.source, target = %record.target, "edge with unknown endpoint skipped");
                continue;
            };
            if graph.get_edge(source, target).is_some() {
                warn!(source = %record.source, target = %record.target, "duplicate edge skipped");
                continue;
            }
            graph.add_edge(source, target, Some(edges.active_row_count()));
            edges.push_row(record.row.clone());
        }

        for (key, value) in &self.node_visuals {
            nodes.set_parent_visual(key.clone(), value.clone());
        }
        for (key, value) in &self.edge_visuals {
            edges.set_parent_visual(key.clone(), value.clone());
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            directed = self.directed,
            "built graph from document"
        );
        BuiltGraph { graph, nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PropertyValue;
    use std::io::Write;

    const YAML: &str = r#"
directed: true
nodes:
  - name: a
    values: { value: 1.0 }
    config: { label: { show: true } }
  - name: b
    values: { value: 2.0 }
  - name: a
  - name: c
    values: { value: 3.0 }
    visuals: { color: red }
links:
  - { source: a, target: b, values: { weight: 0.5 } }
  - { source: a, target: zz }
  - { source: a, target: b }
  - { source: b, target: c }
node_visuals:
  color: grey
"#;

    #[test]
    fn test_build_from_yaml() {
        let built = GraphDocument::from_yaml(YAML).unwrap().build();
        let graph = &built.graph;

        assert!(graph.is_directed());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(built.nodes.row_count(), 3);
        assert_eq!(built.edges.row_count(), 2);

        let c = graph.get_node_by_name("c").unwrap();
        assert_eq!(c.projection_index(), Some(2));
        assert_eq!(c.value(&built.nodes, "value"), Some(3.0));
        assert_eq!(c.visual(&built.nodes, "color", false), Some(&PropertyValue::from("red")));

        let b = graph.get_node_by_name("b").unwrap();
        assert_eq!(b.visual(&built.nodes, "color", false), Some(&PropertyValue::from("grey")));

        let a = graph.get_node_by_name("a").unwrap();
        assert_eq!(
            a.configuration(&built.nodes, Some("label.show")),
            Some(&PropertyValue::Boolean(true))
        );

        let ab = graph.get_edge("a", "b").unwrap();
        assert_eq!(ab.projection_index(), Some(0));
        assert_eq!(built.edges.scalar_value("weight", 0), Some(0.5));
        assert_eq!(graph.get_edge("b", "c").unwrap().projection_index(), Some(1));
    }

    #[test]
    fn test_resynchronize_built_graph() {
        let mut built = GraphDocument::from_yaml(YAML).unwrap().build();
        built.nodes.filter_by_value("value", |v| v > 1.0);
        built.resynchronize();

        assert_eq!(built.graph.get_node_by_name("a").unwrap().projection_index(), None);
        assert_eq!(built.graph.get_node_by_name("b").unwrap().projection_index(), Some(0));
        assert_eq!(built.edges.active_rows(), &[1]);
        assert_eq!(built.graph.get_edge("b", "c").unwrap().projection_index(), Some(0));
        assert_eq!(built.graph.active_edges().count(), 1);
    }

    #[test]
    fn test_from_json_and_path() {
        let json = r#"{"nodes": [{"name": "x"}, {"name": "y"}], "edges": [{"source": "x", "target": "y"}]}"#;
        let doc = GraphDocument::from_json(json).unwrap();
        assert!(!doc.directed);
        assert_eq!(doc.edges.len(), 1);

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let from_file = GraphDocument::from_path(file.path()).unwrap();
        assert_eq!(from_file, doc);

        let built = from_file.build();
        assert!(built.graph.get_edge("y", "x").is_some());
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = GraphDocument::from_path(file.path()).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat(ext) if ext == "toml"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            GraphDocument::from_json("{ nodes: "),
            Err(DocumentError::Json(_))
        ));
    }
}
