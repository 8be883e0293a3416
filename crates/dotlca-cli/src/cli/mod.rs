//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].  This avoids stringly-typed handling of the stdin
/// sentinel throughout the codebase.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text (default).
    Human,
    /// Structured JSON output.
    Json,
}

/// All top-level subcommands exposed by the `dotlca` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Compute the lowest common ancestor(s) of two vertices.
    Lca {
        /// Path to a DOT file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Identifier of the first vertex.
        #[arg(value_name = "ID_A")]
        a: String,
        /// Identifier of the second vertex.
        #[arg(value_name = "ID_B")]
        b: String,
    },

    /// Parse a DOT file and check that it is acyclic.
    Check {
        /// Path to a DOT file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// List every proper ancestor of one vertex.
    Ancestors {
        /// Path to a DOT file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Identifier of the vertex.
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Print summary statistics for a graph.
    Inspect {
        /// Path to a DOT file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },
}

/// Root CLI struct for the `dotlca` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "dotlca",
    version,
    about = "Lowest-common-ancestor queries over DOT graphs",
    long_about = "Reads a directed graph from a DOT file, rejects cyclic inputs,\n\
                  and computes the full set of lowest common ancestors of two\n\
                  vertices: zero, one, or several, since a vertex in a DAG may\n\
                  have multiple parents."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print graph statistics to stderr while running
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `DOTLCA_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 67108864 (64 MB).
    #[arg(
        long,
        global = true,
        env = "DOTLCA_MAX_FILE_SIZE",
        default_value = "67108864"
    )]
    pub max_file_size: u64,
}
