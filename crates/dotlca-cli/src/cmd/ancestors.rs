//! Implementation of `dotlca ancestors <file> <id>`.
//!
//! Parses a DOT file, rejects cyclic graphs, and lists every proper
//! ancestor of one vertex: everything with a directed path to it, the
//! vertex itself excluded.
//!
//! Output (human mode): one display string per ancestor, sorted; a vertex
//! with no ancestors produces no output.
//! Output (JSON mode): `{"ancestors": [...], "count": N}` with full vertex
//! objects.
//!
//! Exit codes: 0 = success, 1 = cyclic graph or unknown identifier,
//! 2 = read/parse failure.
use std::collections::HashSet;

use dotlca_core::{DotGraph, QueryError, ancestors_of};
use petgraph::stable_graph::NodeIndex;

use crate::OutputFormat;
use crate::cmd;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the `ancestors` command.
///
/// # Errors
///
/// - [`CliError::MalformedInput`] (exit code 2) if the content cannot be
///   parsed.
/// - [`CliError::CyclicGraph`] (exit code 1) if the graph has a cycle.
/// - [`CliError::VertexNotFound`] (exit code 1) if `id` does not resolve.
pub fn run(content: &str, id: &str, format: &OutputFormat, verbose: bool) -> Result<(), CliError> {
    let graph = cmd::parse_graph(content)?;
    if verbose {
        eprintln!(
            "parsed {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
    }

    cmd::ensure_acyclic(&graph)?;

    let mut ancestors = ancestors_of(&graph, id).map_err(|e| match e {
        QueryError::VertexNotFound(missing) => CliError::VertexNotFound { id: missing },
    })?;

    // The core set includes the vertex itself (zero-length paths count for
    // LCA purposes); the listing wants proper ancestors only.
    if let Some(self_idx) = graph.vertex_index(id) {
        ancestors.remove(&self_idx);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &graph, &ancestors),
        OutputFormat::Json => print_json(&mut out, &graph, &ancestors),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Writes one display string per ancestor; an empty set writes nothing.
fn print_human<W: std::io::Write>(
    w: &mut W,
    graph: &DotGraph,
    ancestors: &HashSet<NodeIndex>,
) -> std::io::Result<()> {
    for name in cmd::sorted_display_names(graph, ancestors) {
        writeln!(w, "{name}")?;
    }
    Ok(())
}

/// Writes the ancestor set as a JSON object.
fn print_json<W: std::io::Write>(
    w: &mut W,
    graph: &DotGraph,
    ancestors: &HashSet<NodeIndex>,
) -> std::io::Result<()> {
    let values = cmd::vertices_json(graph, ancestors).map_err(std::io::Error::other)?;

    let mut obj = serde_json::Map::new();
    obj.insert("ancestors".to_owned(), values);
    obj.insert(
        "count".to_owned(),
        serde_json::Value::Number(ancestors.len().into()),
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

    const DIAMOND: &str = "digraph { a -> b; a -> c; b -> d; c -> d }";

    #[test]
    fn run_succeeds_for_an_inner_vertex() {
        let result = run(DIAMOND, "d", &OutputFormat::Human, false);
        assert!(result.is_ok());
    }

    #[test]
    fn run_succeeds_for_a_root_with_no_ancestors() {
        let result = run(DIAMOND, "a", &OutputFormat::Json, false);
        assert!(result.is_ok());
    }

    #[test]
    fn run_rejects_an_unknown_identifier() {
        let err = run(DIAMOND, "ghost", &OutputFormat::Human, false)
            .expect_err("unknown id must be rejected");
        assert_eq!(err.exit_code(), 1);
        assert!(err.message().contains("ghost"), "message: {}", err.message());
    }

    #[test]
    fn run_rejects_a_cyclic_graph() {
        let err = run("digraph { x -> y -> x }", "x", &OutputFormat::Human, false)
            .expect_err("cycle must be rejected");
        assert_eq!(err.exit_code(), 1);
    }
}
