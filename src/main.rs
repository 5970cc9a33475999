//! PheWAS Server Worker main executable

pub mod catalog;
pub mod common;
pub mod err;
pub mod graph;

use clap::{Args, Parser, Subcommand};
use console::{Emoji, Term};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "HLA PheWAS catalog heavy lifting",
    long_about = "This tool performs the heavy lifting for the HLA PheWAS catalog browser"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Graph related commands.
    Graph(Graph),
}

/// Parsing of "graph *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Graph {
    /// The sub command to run
    #[command(subcommand)]
    command: GraphCommands,
}

/// Enum supporting the parsing of "graph *" sub commands.
#[derive(Debug, Subcommand)]
enum GraphCommands {
    Query(graph::query::Args),
    Export(graph::export::Args),
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    // Install collector and go into sub commands.
    let term = Term::stderr();
    tracing::subscriber::with_default(collector, || {
        match &cli.command {
            Commands::Graph(graph) => match &graph.command {
                GraphCommands::Query(args) => graph::query::run(&cli.common, args)?,
                GraphCommands::Export(args) => graph::export::run(&cli.common, args)?,
            },
        }

        Ok::<(), anyhow::Error>(())
    })?;
    term.write_line(&format!("All done. Have a nice day!{}", Emoji(" 😃", "")))?;

    Ok(())
}
