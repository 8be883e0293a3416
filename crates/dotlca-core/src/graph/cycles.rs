/// Cycle detection for [`DotGraph`] values.
///
/// Lowest-common-ancestor computation assumes the reachability relation is a
/// partial order, which only holds on a DAG. [`detect_cycle`] is the
/// precondition check: a three-color (white/gray/black) depth-first
/// traversal over every vertex, O(V+E). An edge followed into a vertex that
/// is currently gray (on the active DFS path) proves a cycle, and the gray
/// path segment from that vertex is returned as a concrete witness for
/// diagnostics.
///
/// Roots are taken in vertex insertion order so the same document always
/// yields the same witness, which keeps error messages reproducible in
/// tests. Self-loops and parallel edges are handled like any other edge.
use std::collections::HashMap;

use petgraph::stable_graph::NodeIndex;

use crate::graph::DotGraph;

/// DFS vertex state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not yet visited.
    White,
    /// On the active DFS path.
    Gray,
    /// Fully explored.
    Black,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Searches `graph` for a directed cycle.
///
/// Returns `None` when the graph is acyclic. Otherwise returns one witness
/// cycle as a closed vertex sequence: the first and last entries are the
/// same vertex (so a self-loop on `a` yields `[a, a]`). When several cycles
/// exist, which one is reported depends on insertion order, but the choice
/// is deterministic for a given document.
///
/// Every vertex is visited exactly once regardless of connectivity, so a
/// cycle confined to a disconnected component is still found.
pub fn detect_cycle(graph: &DotGraph) -> Option<Vec<NodeIndex>> {
    let g = graph.graph();

    let mut color: HashMap<NodeIndex, Color> =
        g.node_indices().map(|idx| (idx, Color::White)).collect();

    for root in g.node_indices() {
        if color.get(&root).copied() != Some(Color::White) {
            continue;
        }

        // Iterative DFS. Each stack frame holds (vertex, pre-computed
        // successor list, next child index); `path` mirrors the gray chain.
        let mut path: Vec<NodeIndex> = Vec::new();
        let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();

        color.insert(root, Color::Gray);
        path.push(root);
        stack.push((root, successors(graph, root), 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;

            if frame.2 >= frame.1.len() {
                // All successors explored: retire the vertex.
                stack.pop();
                path.pop();
                color.insert(node, Color::Black);
                continue;
            }

            let child = frame.1[frame.2];
            frame.2 += 1;

            match color.get(&child).copied().unwrap_or(Color::White) {
                Color::Gray => {
                    // Back edge: the gray path from `child` onward, closed by
                    // repeating `child`, is the witness.
                    if let Some(start) = path.iter().position(|&n| n == child) {
                        let mut cycle = path[start..].to_vec();
                        cycle.push(child);
                        return Some(cycle);
                    }
                }
                Color::White => {
                    color.insert(child, Color::Gray);
                    path.push(child);
                    stack.push((child, successors(graph, child), 0));
                }
                Color::Black => {}
            }
        }
    }

    None
}

/// Collects the direct successors of `node`, parallel edges included.
///
/// Duplicates are harmless here: a revisit lands on a gray or black vertex
/// and is either a witness or a no-op.
fn successors(graph: &DotGraph, node: NodeIndex) -> Vec<NodeIndex> {
    graph
        .graph()
        .neighbors_directed(node, petgraph::Direction::Outgoing)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
