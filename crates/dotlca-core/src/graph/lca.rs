/// Lowest-common-ancestor computation over an acyclic [`DotGraph`].
///
/// Edges point from ancestor to descendant, so the ancestors of a vertex are
/// everything that reaches it along predecessor edges, including the vertex
/// itself (zero-length paths count, which is what makes a vertex that is an
/// ancestor of the other query vertex a valid candidate).
///
/// A common ancestor X of A and B is **lowest** when no other common
/// ancestor is a strict descendant of X. Because the input is a general DAG
/// rather than a tree, the result is a set: zero, one, or several pairwise
/// incomparable vertices.
///
/// # Algorithm
///
/// 1. `Anc(A)` and `Anc(B)` via reverse BFS (O(V+E) each).
/// 2. `Common = Anc(A) ∩ Anc(B)`.
/// 3. Drop every X from `Common` that forward-reaches another member of
///    `Common` (the domination filter), a per-candidate forward BFS with an
///    early exit, O(k·(V+E)) for k = |Common|. `Common` is typically tiny
///    relative to the graph, so the naive filter is acceptable.
///
/// Callers must have run cycle detection first: on a cyclic graph the
/// domination argument is meaningless and the filter can discard every
/// candidate. Nothing here re-verifies acyclicity.
use std::collections::{HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;

use crate::graph::DotGraph;

// ---------------------------------------------------------------------------
// QueryError
// ---------------------------------------------------------------------------

/// Errors that can occur while resolving query identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A requested identifier does not name a vertex in the graph.
    VertexNotFound(String),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::VertexNotFound(id) => write!(f, "vertex not found: {id:?}"),
        }
    }
}

impl std::error::Error for QueryError {}

// ---------------------------------------------------------------------------
// Ancestor sets
// ---------------------------------------------------------------------------

/// Returns every vertex with a directed path to `id`, including the vertex
/// itself.
///
/// # Errors
///
/// Returns [`QueryError::VertexNotFound`] if `id` does not exist.
pub fn ancestors_of(graph: &DotGraph, id: &str) -> Result<HashSet<NodeIndex>, QueryError> {
    let start = resolve(graph, id)?;
    Ok(reverse_reachable(graph, start))
}

/// Reverse BFS from `start` over predecessor edges. The result contains
/// `start`.
fn reverse_reachable(graph: &DotGraph, start: NodeIndex) -> HashSet<NodeIndex> {
    let g = graph.graph();

    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for pred in g.neighbors_directed(current, petgraph::Direction::Incoming) {
            if visited.insert(pred) {
                queue.push_back(pred);
            }
        }
    }

    visited
}

// ---------------------------------------------------------------------------
// find_lcas
// ---------------------------------------------------------------------------

/// Computes the complete set of lowest common ancestors of `a` and `b`.
///
/// The result may be empty (no shared ancestor at all) or contain several
/// pairwise-incomparable vertices. When `a == b` the result is exactly the
/// vertex itself: it is its own ancestor and dominates every other ancestor
/// of itself.
///
/// Both identifiers are resolved before any traversal runs.
///
/// # Errors
///
/// Returns [`QueryError::VertexNotFound`] if either identifier does not
/// exist in the graph.
pub fn find_lcas(graph: &DotGraph, a: &str, b: &str) -> Result<HashSet<NodeIndex>, QueryError> {
    let a_idx = resolve(graph, a)?;
    let b_idx = resolve(graph, b)?;

    let anc_a = reverse_reachable(graph, a_idx);
    let anc_b = reverse_reachable(graph, b_idx);

    let common: HashSet<NodeIndex> = anc_a.intersection(&anc_b).copied().collect();

    let lowest = common
        .iter()
        .copied()
        .filter(|&candidate| !dominated(graph, candidate, &common))
        .collect();

    Ok(lowest)
}

/// Resolves an identifier to its [`NodeIndex`].
fn resolve(graph: &DotGraph, id: &str) -> Result<NodeIndex, QueryError> {
    graph
        .vertex_index(id)
        .ok_or_else(|| QueryError::VertexNotFound(id.to_owned()))
}

/// Returns `true` when some *other* member of `common` is forward-reachable
/// from `x`, i.e. a strictly lower common ancestor exists.
///
/// Forward BFS from `x` with an early exit on the first hit. On a DAG `x`
/// itself can never be rediscovered, so every newly visited vertex in
/// `common` is a strict descendant.
fn dominated(graph: &DotGraph, x: NodeIndex, common: &HashSet<NodeIndex>) -> bool {
    let g = graph.graph();

    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    visited.insert(x);
    queue.push_back(x);

    while let Some(current) = queue.pop_front() {
        for succ in g.neighbors_directed(current, petgraph::Direction::Outgoing) {
            if visited.insert(succ) {
                if common.contains(&succ) {
                    return true;
                }
                queue.push_back(succ);
            }
        }
    }

    false
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
