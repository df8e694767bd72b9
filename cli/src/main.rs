//! Tablegraph CLI: inspect and traverse graph documents
//!
//! Loads a JSON/YAML graph document, optionally filters the node rows, brings
//! the graph back in line with the filtered store and prints the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tablegraph::{BackingStore, BuiltGraph, Direction, GraphDocument, Visit};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tablegraph", version, about = "Inspect and traverse tablegraph documents")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true, env = "TABLEGRAPH_FORMAT")]
    format: OutputFormat,

    /// Keep only node rows matching `dimension<op>value` (ops: >=, <=, >, <, ==, !=)
    #[arg(long, global = true)]
    filter: Option<RowFilterArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Node and edge counts
    Stats {
        /// Graph document (.json, .yaml, .yml)
        file: PathBuf,
    },
    /// List nodes with their projection and degrees
    Nodes {
        file: PathBuf,
    },
    /// Breadth-first traversal from a node
    Bfs {
        file: PathBuf,

        /// Start node name
        start: String,

        /// Adjacency to follow: out, in or both
        #[arg(long, default_value = "both")]
        direction: Direction,

        /// Stop after this many nodes
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,
    },
}

/// Parsed `--filter` expression
#[derive(Debug, Clone, PartialEq)]
struct RowFilterArg {
    dimension: String,
    op: CompareOp,
    threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CompareOp {
    Ge,
    Le,
    Gt,
    Lt,
    Eq,
    Ne,
}

impl CompareOp {
    fn apply(self, value: f64, threshold: f64) -> bool {
        match self {
            CompareOp::Ge => value >= threshold,
            CompareOp::Le => value <= threshold,
            CompareOp::Gt => value > threshold,
            CompareOp::Lt => value < threshold,
            CompareOp::Eq => value == threshold,
            CompareOp::Ne => value != threshold,
        }
    }
}

impl FromStr for RowFilterArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Two-character operators first so ">=" is not read as ">"
        const OPS: [(&str, CompareOp); 6] = [
            (">=", CompareOp::Ge),
            ("<=", CompareOp::Le),
            ("==", CompareOp::Eq),
            ("!=", CompareOp::Ne),
            (">", CompareOp::Gt),
            ("<", CompareOp::Lt),
        ];
        for (token, op) in OPS {
            if let Some((dimension, threshold)) = s.split_once(token) {
                let dimension = dimension.trim();
                if dimension.is_empty() {
                    return Err(format!("missing dimension in '{}'", s));
                }
                let threshold = threshold
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| format!("invalid threshold in '{}': {}", s, e))?;
                return Ok(RowFilterArg {
                    dimension: dimension.to_string(),
                    op,
                    threshold,
                });
            }
        }
        Err(format!("expected dimension<op>value, got '{}'", s))
    }
}

/// Tabular command output
#[derive(Serialize)]
struct Report {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let report = match &cli.command {
        Commands::Stats { file } => stats(&load(file, cli.filter.as_ref())?),
        Commands::Nodes { file } => nodes(&load(file, cli.filter.as_ref())?),
        Commands::Bfs {
            file,
            start,
            direction,
            limit,
        } => bfs(
            &load(file, cli.filter.as_ref())?,
            start,
            *direction,
            limit.map(|n| n as usize),
        )?,
    };
    print_report(&report, &cli.format)
}

fn load(path: &Path, filter: Option<&RowFilterArg>) -> Result<BuiltGraph> {
    let document = GraphDocument::from_path(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let mut built = document.build();
    if let Some(filter) = filter {
        built
            .nodes
            .filter_by_value(&filter.dimension, |v| filter.op.apply(v, filter.threshold));
        built.resynchronize();
        debug!(?filter, active = built.nodes.active_row_count(), "applied node filter");
    }
    Ok(built)
}

fn stats(built: &BuiltGraph) -> Report {
    let graph = &built.graph;
    Report {
        columns: vec!["metric".into(), "value".into()],
        rows: vec![
            vec![json!("directed"), json!(graph.is_directed())],
            vec![json!("nodes"), json!(graph.node_count())],
            vec![json!("active_nodes"), json!(graph.active_nodes().count())],
            vec![json!("edges"), json!(graph.edge_count())],
            vec![json!("active_edges"), json!(graph.active_edges().count())],
        ],
    }
}

fn nodes(built: &BuiltGraph) -> Report {
    let dimensions = built.nodes.columns().dimensions();
    let mut columns: Vec<String> = ["name", "projection", "degree", "in", "out"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    columns.extend(dimensions.iter().map(|d| d.to_string()));

    let rows = built
        .graph
        .nodes()
        .map(|node| {
            let mut row = vec![
                json!(node.name()),
                json!(node.projection_index()),
                json!(node.degree()),
                json!(node.in_degree()),
                json!(node.out_degree()),
            ];
            row.extend(
                dimensions
                    .iter()
                    .map(|d| json!(built.nodes.raw_value(node.id().index(), d))),
            );
            row
        })
        .collect();
    Report { columns, rows }
}

fn bfs(built: &BuiltGraph, start: &str, direction: Direction, limit: Option<usize>) -> Result<Report> {
    let graph = &built.graph;
    let start = graph.require_node(start)?;

    let mut rows = Vec::new();
    graph.breadth_first_traverse(start, direction, |node, from| {
        if limit.is_some_and(|limit| rows.len() >= limit) {
            return Visit::Stop;
        }
        rows.push(vec![
            json!(rows.len()),
            json!(node.name()),
            json!(from.map(|n| n.name())),
            json!(node.projection_index()),
        ]);
        match limit {
            Some(limit) if rows.len() >= limit => Visit::Stop,
            _ => Visit::Continue,
        }
    });
    Ok(Report {
        columns: vec!["order".into(), "node".into(), "from".into(), "projection".into()],
        rows,
    })
}

fn print_report(report: &Report, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Csv => {
            println!("{}", report.columns.join(","));
            for row in &report.rows {
                let cells: Vec<String> = row.iter().map(format_csv_value).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if report.rows.is_empty() {
                println!("(no results)");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(&report.columns);
            for row in &report.rows {
                let cells: Vec<String> = row.iter().map(format_table_value).collect();
                table.add_row(cells);
            }
            println!("{}", table);
            println!("{} row(s)", report.rows.len());
        }
    }
    Ok(())
}

fn format_table_value(v: &Value) -> String {
    match v {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_csv_value(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) if s.contains(',') || s.contains('"') => {
            format!("\"{}\"", s.replace('"', "\"\""))
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
