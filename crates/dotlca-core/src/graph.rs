/// In-memory graph model for DOT-described ancestry graphs, using `petgraph`.
///
/// A [`DotGraph`] wraps a `StableDiGraph` whose node weights are labeled
/// [`Vertex`] values, plus a `HashMap<String, NodeIndex>` for O(1) lookup of
/// vertices by identifier. Edges point from ancestor to descendant and carry
/// no data.
///
/// # Construction
///
/// The parser populates a graph incrementally: [`DotGraph::add_vertex`] is
/// idempotent by identifier (re-declaring a vertex merges its attributes,
/// later declarations overriding earlier ones key by key), and
/// [`DotGraph::add_edge`] requires both endpoints to exist already. The
/// parser declares edge endpoints implicitly before inserting the edge, so
/// [`GraphError::DanglingEndpoint`] never reaches end users unless the model
/// is driven directly.
///
/// After parsing the graph is never mutated; all queries are read-only.
use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use serde::Serialize;

pub mod cycles;
pub mod lca;

// ---------------------------------------------------------------------------
// Vertex
// ---------------------------------------------------------------------------

/// A labeled vertex parsed from a DOT document.
///
/// The identifier is unique within its graph. Attributes are raw string
/// key/value pairs from the document; only `label` is interpreted (for
/// display), everything else is carried opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vertex {
    /// The vertex identifier, unique within the graph.
    pub id: String,
    /// Attribute map from the document, quoted values already unquoted.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
}

impl Vertex {
    /// Creates a vertex from an identifier and an attribute map.
    pub fn new(id: impl Into<String>, attrs: BTreeMap<String, String>) -> Self {
        Vertex {
            id: id.into(),
            attrs,
        }
    }

    /// Returns the printable representation of this vertex: the value of its
    /// `label` attribute if present, otherwise the identifier.
    pub fn display_name(&self) -> &str {
        self.attrs.get("label").map_or(self.id.as_str(), String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur while populating a [`DotGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge references an endpoint identifier that has not been declared.
    DanglingEndpoint {
        /// Source identifier of the offending edge.
        from: String,
        /// Target identifier of the offending edge.
        to: String,
        /// The endpoint identifier that could not be resolved.
        missing: String,
    },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DanglingEndpoint { from, to, missing } => {
                write!(
                    f,
                    "edge {from:?} -> {to:?} references undeclared vertex {missing:?}"
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}

// ---------------------------------------------------------------------------
// DotGraph
// ---------------------------------------------------------------------------

/// A directed graph of labeled vertices built from one DOT document.
///
/// Parallel edges between the same ordered pair are tolerated (they are
/// duplicate evidence of the same relation); queries treat them as one.
/// Vertex iteration order is insertion order, which keeps diagnostics
/// reproducible.
#[derive(Debug, Default)]
pub struct DotGraph {
    graph: StableDiGraph<Vertex, ()>,
    id_to_index: HashMap<String, NodeIndex>,
}

impl DotGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        DotGraph::default()
    }

    /// Returns the number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph, counting parallel edges
    /// individually.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Looks up the [`NodeIndex`] for a vertex identifier.
    ///
    /// Returns `None` if no vertex with that identifier exists.
    pub fn vertex_index(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    /// Returns the [`Vertex`] stored at `idx`, or `None` for an unknown index.
    pub fn vertex(&self, idx: NodeIndex) -> Option<&Vertex> {
        self.graph.node_weight(idx)
    }

    /// Iterates over all vertex indices in insertion order.
    pub fn vertex_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Returns a reference to the underlying `StableDiGraph` for traversal
    /// algorithms.
    pub fn graph(&self) -> &StableDiGraph<Vertex, ()> {
        &self.graph
    }

    /// Inserts a vertex, or merges attributes into the existing vertex when
    /// the identifier is already present.
    ///
    /// On a re-declaration the incoming attributes override the stored ones
    /// key by key; keys absent from the re-declaration are kept.
    pub fn add_vertex(&mut self, id: &str, attrs: BTreeMap<String, String>) -> NodeIndex {
        if let Some(&idx) = self.id_to_index.get(id) {
            if let Some(existing) = self.graph.node_weight_mut(idx) {
                existing.attrs.extend(attrs);
            }
            return idx;
        }

        let idx = self.graph.add_node(Vertex::new(id, attrs));
        self.id_to_index.insert(id.to_owned(), idx);
        idx
    }

    /// Appends a directed edge between two already-declared vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DanglingEndpoint`] if either identifier has not
    /// been declared.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<EdgeIndex, GraphError> {
        let from_idx = self
            .vertex_index(from)
            .ok_or_else(|| GraphError::DanglingEndpoint {
                from: from.to_owned(),
                to: to.to_owned(),
                missing: from.to_owned(),
            })?;
        let to_idx = self
            .vertex_index(to)
            .ok_or_else(|| GraphError::DanglingEndpoint {
                from: from.to_owned(),
                to: to.to_owned(),
                missing: to.to_owned(),
            })?;

        Ok(self.graph.add_edge(from_idx, to_idx, ()))
    }

    /// Returns the set of vertices with an edge into `idx`.
    ///
    /// Parallel edges collapse to one entry.
    pub fn predecessors(&self, idx: NodeIndex) -> HashSet<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .collect()
    }

    /// Returns the set of vertices with an edge out of `idx`.
    ///
    /// Parallel edges collapse to one entry.
    pub fn successors(&self, idx: NodeIndex) -> HashSet<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
