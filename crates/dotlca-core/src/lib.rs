#![deny(clippy::print_stdout, clippy::print_stderr)]

//! Core library for lowest-common-ancestor queries over DOT-described
//! directed acyclic graphs.
//!
//! The pipeline is parse → validate → query: [`parse_dot`] builds a
//! [`DotGraph`] from a DOT-dialect document, [`detect_cycle`] rejects
//! non-DAG inputs with a concrete witness, and [`find_lcas`] computes the
//! complete set of lowest common ancestors of two vertices under the
//! reachability partial order.

pub mod graph;
pub mod parser;

pub use graph::cycles::detect_cycle;
pub use graph::lca::{QueryError, ancestors_of, find_lcas};
pub use graph::{DotGraph, GraphError, Vertex};
pub use parser::{ParseError, ParseErrorKind, parse_dot};

/// Returns the current version of the dotlca-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }

    /// The full pipeline on a small genealogy: parse, check, query.
    #[test]
    fn parse_check_query_pipeline() {
        let doc = r#"
            digraph family {
                grandparent [label="Granny"]
                grandparent -> mother
                grandparent -> father
                mother -> child
                father -> child
            }
        "#;
        let g = parse_dot(doc).expect("document parses");
        assert_eq!(detect_cycle(&g), None);

        let lcas = find_lcas(&g, "mother", "father").expect("both exist");
        let names: Vec<&str> = lcas
            .iter()
            .filter_map(|&idx| g.vertex(idx).map(Vertex::display_name))
            .collect();
        assert_eq!(names, vec!["Granny"]);
    }
}
