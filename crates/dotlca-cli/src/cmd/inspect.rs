//! Implementation of `dotlca inspect <file>`.
//!
//! Parses a DOT file and prints summary statistics to stdout:
//! - vertex and edge counts
//! - root count (vertices with no predecessors)
//! - leaf count (vertices with no successors)
//! - labeled vertex count (vertices carrying a `label` attribute)
//!
//! In `--format json` mode a single JSON object is emitted to stdout.
//! In human mode, aligned key/value lines are printed. Inspection is purely
//! structural, so cyclic graphs are reported too rather than rejected.
//!
//! Exit codes: 0 = success, 2 = read/parse failure.
use dotlca_core::DotGraph;

use crate::OutputFormat;
use crate::cmd;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Statistics gathered from a parsed [`DotGraph`].
pub struct GraphStats {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of edges, parallel edges counted individually.
    pub edge_count: usize,
    /// Vertices with no predecessors.
    pub root_count: usize,
    /// Vertices with no successors.
    pub leaf_count: usize,
    /// Vertices carrying a `label` attribute.
    pub labeled_count: usize,
}

impl GraphStats {
    /// Computes statistics from a parsed [`DotGraph`].
    pub fn from_graph(graph: &DotGraph) -> Self {
        let mut root_count = 0;
        let mut leaf_count = 0;
        let mut labeled_count = 0;

        for idx in graph.vertex_indices() {
            if graph.predecessors(idx).is_empty() {
                root_count += 1;
            }
            if graph.successors(idx).is_empty() {
                leaf_count += 1;
            }
            if graph
                .vertex(idx)
                .is_some_and(|v| v.attrs.contains_key("label"))
            {
                labeled_count += 1;
            }
        }

        GraphStats {
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            root_count,
            leaf_count,
            labeled_count,
        }
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the `inspect` command.
///
/// # Errors
///
/// Returns [`CliError::MalformedInput`] (exit code 2) if the content cannot
/// be parsed.
pub fn run(content: &str, format: &OutputFormat) -> Result<(), CliError> {
    let graph = cmd::parse_graph(content)?;
    let stats = GraphStats::from_graph(&graph);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &stats),
        OutputFormat::Json => print_json(&mut out, &stats),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Writes aligned key/value lines.
fn print_human<W: std::io::Write>(w: &mut W, stats: &GraphStats) -> std::io::Result<()> {
    writeln!(w, "vertices: {}", stats.vertex_count)?;
    writeln!(w, "edges:    {}", stats.edge_count)?;
    writeln!(w, "roots:    {}", stats.root_count)?;
    writeln!(w, "leaves:   {}", stats.leaf_count)?;
    writeln!(w, "labeled:  {}", stats.labeled_count)
}

/// Writes the statistics as a single JSON object.
fn print_json<W: std::io::Write>(w: &mut W, stats: &GraphStats) -> std::io::Result<()> {
    let mut obj = serde_json::Map::new();
    obj.insert(
        "vertices".to_owned(),
        serde_json::Value::Number(stats.vertex_count.into()),
    );
    obj.insert(
        "edges".to_owned(),
        serde_json::Value::Number(stats.edge_count.into()),
    );
    obj.insert(
        "roots".to_owned(),
        serde_json::Value::Number(stats.root_count.into()),
    );
    obj.insert(
        "leaves".to_owned(),
        serde_json::Value::Number(stats.leaf_count.into()),
    );
    obj.insert(
        "labeled".to_owned(),
        serde_json::Value::Number(stats.labeled_count.into()),
    );

    let json = serde_json::to_string_pretty(&serde_json::Value::Object(obj))
        .map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn diamond_stats() {
        let graph =
            cmd::parse_graph("digraph { a -> b; a -> c; b -> d; c -> d }").expect("parses");
        let stats = GraphStats::from_graph(&graph);
        assert_eq!(stats.vertex_count, 4);
        assert_eq!(stats.edge_count, 4);
        assert_eq!(stats.root_count, 1);
        assert_eq!(stats.leaf_count, 1);
        assert_eq!(stats.labeled_count, 0);
    }

    #[test]
    fn isolated_vertices_are_both_root_and_leaf() {
        let graph = cmd::parse_graph("digraph { a; b }").expect("parses");
        let stats = GraphStats::from_graph(&graph);
        assert_eq!(stats.root_count, 2);
        assert_eq!(stats.leaf_count, 2);
    }

    #[test]
    fn labeled_vertices_are_counted() {
        let graph = cmd::parse_graph(r#"digraph { a [label="Alpha"]; a -> b }"#).expect("parses");
        let stats = GraphStats::from_graph(&graph);
        assert_eq!(stats.labeled_count, 1);
    }

    #[test]
    fn cyclic_graphs_are_still_inspectable() {
        let result = run("digraph { a -> b -> a }", &OutputFormat::Human);
        assert!(result.is_ok());
    }

    #[test]
    fn malformed_input_is_exit_2() {
        let err = run("digraph { a -> }", &OutputFormat::Human).expect_err("must fail");
        assert_eq!(err.exit_code(), 2);
    }
}
