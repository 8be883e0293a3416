//! Implementation of `dotlca check <file>`.
//!
//! Parses a DOT file and verifies that its edge relation is acyclic, the
//! precondition every ancestry query relies on. A clean graph reports its
//! size; a cyclic graph fails with one concrete witness cycle.
//!
//! Output (human mode): `acyclic: N vertices, M edges`.
//! Output (JSON mode): `{"acyclic": true, "vertices": N, "edges": M}`.
//!
//! Exit codes: 0 = acyclic, 1 = cycle found (witness on stderr),
//! 2 = read/parse failure.
use std::io::Write as _;

use crate::OutputFormat;
use crate::cmd;
use crate::error::CliError;

/// Runs the `check` command.
///
/// # Errors
///
/// - [`CliError::MalformedInput`] (exit code 2) if the content cannot be
///   parsed.
/// - [`CliError::CyclicGraph`] (exit code 1) if a cycle exists; the message
///   carries the witness.
pub fn run(content: &str, format: &OutputFormat, verbose: bool) -> Result<(), CliError> {
    let graph = cmd::parse_graph(content)?;
    if verbose {
        eprintln!(
            "parsed {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
    }

    cmd::ensure_acyclic(&graph)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match format {
        OutputFormat::Human => writeln!(
            out,
            "acyclic: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        ),
        OutputFormat::Json => print_json(&mut out, graph.vertex_count(), graph.edge_count()),
    };

    result.map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

/// Writes the acyclicity report as a JSON object.
fn print_json<W: std::io::Write>(w: &mut W, vertices: usize, edges: usize) -> std::io::Result<()> {
    let mut obj = serde_json::Map::new();
    obj.insert("acyclic".to_owned(), serde_json::Value::Bool(true));
    obj.insert(
        "vertices".to_owned(),
        serde_json::Value::Number(vertices.into()),
    );
    obj.insert("edges".to_owned(), serde_json::Value::Number(edges.into()));

    let json = serde_json::to_string_pretty(&serde_json::Value::Object(obj))
        .map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
