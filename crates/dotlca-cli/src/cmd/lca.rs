//! Implementation of `dotlca lca <file> <id-a> <id-b>`.
//!
//! Parses a DOT file, rejects cyclic graphs, resolves both identifiers, and
//! prints the complete set of lowest common ancestors. Because the input is
//! a DAG rather than a tree, the set may hold zero, one, or several
//! pairwise-incomparable vertices.
//!
//! Output (human mode): one display string per ancestor (label if present,
//! else identifier), sorted for determinism; an empty set prints a single
//! informational line naming both query identifiers instead.
//! Output (JSON mode): `{"ancestors": [...], "count": N}` with full vertex
//! objects.
//!
//! Exit codes: 0 = success (an empty set is not an error), 1 = cyclic graph
//! or unknown identifier, 2 = read/parse failure.
use dotlca_core::{QueryError, find_lcas};

use crate::OutputFormat;
use crate::cmd;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the `lca` command.
///
/// # Errors
///
/// - [`CliError::MalformedInput`] (exit code 2) if the content cannot be
///   parsed.
/// - [`CliError::CyclicGraph`] (exit code 1) if the graph has a cycle; the
///   message carries the witness.
/// - [`CliError::VertexNotFound`] (exit code 1) if either identifier does
///   not resolve.
pub fn run(
    content: &str,
    a: &str,
    b: &str,
    format: &OutputFormat,
    verbose: bool,
) -> Result<(), CliError> {
    let graph = cmd::parse_graph(content)?;
    if verbose {
        eprintln!(
            "parsed {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
    }

    cmd::ensure_acyclic(&graph)?;

    let lcas = find_lcas(&graph, a, b).map_err(|e| match e {
        QueryError::VertexNotFound(id) => CliError::VertexNotFound { id },
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &graph, &lcas, a, b),
        OutputFormat::Json => print_json(&mut out, &graph, &lcas),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Writes one display string per ancestor; an empty set becomes an
/// informational line rather than an error.
fn print_human<W: std::io::Write>(
    w: &mut W,
    graph: &dotlca_core::DotGraph,
    lcas: &std::collections::HashSet<petgraph::stable_graph::NodeIndex>,
    a: &str,
    b: &str,
) -> std::io::Result<()> {
    if lcas.is_empty() {
        writeln!(w, "no lowest common ancestor found for {a} and {b}")?;
        return Ok(());
    }
    for name in cmd::sorted_display_names(graph, lcas) {
        writeln!(w, "{name}")?;
    }
    Ok(())
}

/// Writes the ancestor set as a JSON object.
fn print_json<W: std::io::Write>(
    w: &mut W,
    graph: &dotlca_core::DotGraph,
    lcas: &std::collections::HashSet<petgraph::stable_graph::NodeIndex>,
) -> std::io::Result<()> {
    let ancestors = cmd::vertices_json(graph, lcas).map_err(std::io::Error::other)?;

    let mut obj = serde_json::Map::new();
    obj.insert("ancestors".to_owned(), ancestors);
    obj.insert(
        "count".to_owned(),
        serde_json::Value::Number(lcas.len().into()),
    );

    let json = serde_json::to_string_pretty(&serde_json::Value::Object(obj))
        .map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
