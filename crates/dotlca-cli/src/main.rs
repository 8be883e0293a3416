//! Entry point for the `dotlca` binary.
//!
//! All real work happens in `cmd::*`; this file parses the CLI, reads the
//! input document, dispatches, and maps [`CliError`] values to their exit
//! codes with the message on stderr.
use clap::Parser as _;

mod cli;
mod cmd;
mod error;
mod io;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};

use crate::error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("{}", err.message());
        std::process::exit(err.exit_code());
    }
}

/// Reads the input document for the active subcommand and runs it.
fn run(cli: &Cli) -> Result<(), CliError> {
    // --quiet wins over --verbose; clap rejects the combination anyway.
    let verbose = cli.verbose && !cli.quiet;

    match &cli.command {
        Command::Lca { file, a, b } => {
            let content = io::read_input(file, cli.max_file_size)?;
            cmd::lca::run(&content, a, b, &cli.format, verbose)
        }
        Command::Check { file } => {
            let content = io::read_input(file, cli.max_file_size)?;
            cmd::check::run(&content, &cli.format, verbose)
        }
        Command::Ancestors { file, id } => {
            let content = io::read_input(file, cli.max_file_size)?;
            cmd::ancestors::run(&content, id, &cli.format, verbose)
        }
        Command::Inspect { file } => {
            let content = io::read_input(file, cli.max_file_size)?;
            cmd::inspect::run(&content, &cli.format)
        }
    }
}
