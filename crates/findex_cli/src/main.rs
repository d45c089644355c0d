//! findex CLI
//!
//! Command-line tools for building, saving and querying findex indexes.
//!
//! # Commands
//!
//! - `query` - Index a JSON data file and run one query against it
//! - `snapshot` - Index a JSON data file and save the snapshot
//! - `inspect` - Display the declarations and index sizes of a snapshot
//! - `find` - Run one query against a saved snapshot

mod commands;

use clap::{Parser, Subcommand};
use findex_core::IndexDeclaration;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// findex command-line tools.
#[derive(Parser)]
#[command(name = "findex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a JSON array of records and run a query against it
    Query {
        /// JSON file holding an array of records
        #[arg(short, long)]
        data: PathBuf,

        /// Index declaration as <path>:<TYPE>, repeatable
        #[arg(short, long = "index", required = true)]
        indexes: Vec<IndexDeclaration>,

        /// Query JSON, or @<file> to read it from a file
        #[arg(short, long)]
        query: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Index a JSON array of records and save the snapshot
    Snapshot {
        /// JSON file holding an array of records
        #[arg(short, long)]
        data: PathBuf,

        /// Index declaration as <path>:<TYPE>, repeatable
        #[arg(short, long = "index", required = true)]
        indexes: Vec<IndexDeclaration>,

        /// Snapshot file to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Display the declarations and index sizes of a snapshot
    Inspect {
        /// Snapshot file
        #[arg(short, long)]
        store: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Run a query against a saved snapshot
    Find {
        /// Snapshot file
        #[arg(short, long)]
        store: PathBuf,

        /// Query JSON, or @<file> to read it from a file
        #[arg(short, long)]
        query: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Query {
            data,
            indexes,
            query,
            format,
        } => {
            commands::query::run(&data, indexes, &query, &format)?;
        }
        Commands::Snapshot {
            data,
            indexes,
            output,
        } => {
            commands::snapshot::run(&data, indexes, &output)?;
        }
        Commands::Inspect { store, format } => {
            commands::inspect::run(&store, &format)?;
        }
        Commands::Find {
            store,
            query,
            format,
        } => {
            commands::find::run(&store, &query, &format)?;
        }
        Commands::Version => {
            println!("findex CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("findex core v{}", findex_core::VERSION);
        }
    }

    Ok(())
}
