/// Command module for the `dotlca` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the input document content plus the parsed arguments and
/// returns `Ok(())` on success or a [`crate::error::CliError`] on failure.
///
/// Shared pipeline steps live here: parsing the document, enforcing
/// acyclicity, and rendering vertex sets.
use std::collections::HashSet;

use dotlca_core::{DotGraph, Vertex, detect_cycle, parse_dot};
use petgraph::stable_graph::NodeIndex;

use crate::error::CliError;

pub mod ancestors;
pub mod check;
pub mod inspect;
pub mod lca;

/// Parses `content` into a [`DotGraph`], mapping parse failures to the
/// malformed-input CLI error (exit code 2).
pub(crate) fn parse_graph(content: &str) -> Result<DotGraph, CliError> {
    parse_dot(content).map_err(|e| CliError::MalformedInput {
        detail: e.to_string(),
    })
}

/// Rejects cyclic graphs with a rendered witness (exit code 1).
///
/// Ancestry queries assume reachability is a partial order; every query
/// subcommand calls this before traversing.
pub(crate) fn ensure_acyclic(graph: &DotGraph) -> Result<(), CliError> {
    match detect_cycle(graph) {
        None => Ok(()),
        Some(witness) => Err(CliError::CyclicGraph {
            witness: render_cycle(graph, &witness),
        }),
    }
}

/// Renders a witness cycle using vertex identifiers: `a -> b -> a`.
///
/// Identifiers, not labels: diagnostics should name vertices the way the
/// document declares them.
pub(crate) fn render_cycle(graph: &DotGraph, witness: &[NodeIndex]) -> String {
    witness
        .iter()
        .filter_map(|&idx| graph.vertex(idx).map(|v| v.id.as_str()))
        .collect::<Vec<&str>>()
        .join(" -> ")
}

/// Returns the display strings (label if present, else id) of a vertex set,
/// sorted for deterministic output.
pub(crate) fn sorted_display_names(graph: &DotGraph, indices: &HashSet<NodeIndex>) -> Vec<String> {
    let mut names: Vec<String> = indices
        .iter()
        .filter_map(|&idx| graph.vertex(idx).map(|v| v.display_name().to_owned()))
        .collect();
    names.sort();
    names
}

/// Serializes a vertex set as a JSON array of vertex objects, sorted by
/// display string (ties broken by identifier) for deterministic output.
pub(crate) fn vertices_json(
    graph: &DotGraph,
    indices: &HashSet<NodeIndex>,
) -> Result<serde_json::Value, serde_json::Error> {
    let mut vertices: Vec<&Vertex> = indices
        .iter()
        .filter_map(|&idx| graph.vertex(idx))
        .collect();
    vertices.sort_by(|x, y| {
        x.display_name()
            .cmp(y.display_name())
            .then_with(|| x.id.cmp(&y.id))
    });

    let values = vertices
        .into_iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<serde_json::Value>, serde_json::Error>>()?;
    Ok(serde_json::Value::Array(values))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
