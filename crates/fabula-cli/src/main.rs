//! CLI frontend for checking and visualising Fabula stories.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(
    name = "fabula",
    about = "Fabula — explore every path through an interactive story",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a story and report rules that can never fire
    Check {
        /// Story file (JSON)
        story: PathBuf,

        /// Stop after this many distinct states (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_states: usize,

        /// Fail on lint warnings, unreachable rules or a truncated search
        #[arg(long)]
        strict: bool,
    },

    /// Print the graph of rules and endings
    Graph {
        /// Story file (JSON)
        story: PathBuf,

        /// Output format: dot, json
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List every distinct path to an ending
    Paths {
        /// Story file (JSON)
        story: PathBuf,
    },

    /// Play a sequence of interactions from the start of the story
    Resolve {
        /// Story file (JSON)
        story: PathBuf,

        /// Entity ids to interact with, in order
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("FABULA_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            story,
            max_states,
            strict,
        } => commands::check::run(&story, max_states, strict),
        Commands::Graph {
            story,
            format,
            output,
        } => commands::graph::run(&story, &format, output.as_deref()),
        Commands::Paths { story } => commands::paths::run(&story),
        Commands::Resolve { story, ids } => commands::resolve::run(&story, &ids),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
