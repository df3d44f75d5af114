//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dashsource CLI
#[derive(Parser, Debug)]
#[command(name = "dashsource")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a cURL command into a request descriptor
    Translate {
        /// The cURL command text
        #[arg(long)]
        curl: String,
    },

    /// Discover fields and structure from a JSON payload file
    Fields {
        /// Path to a JSON payload
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Validate a data-source definition file (YAML or JSON)
    Validate {
        /// Path to the data-source definition
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Dry-run a data source to inspect fields, projects, or services
    Test {
        /// Path to the data-source definition
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Fetch and normalize data from a data source
    Fetch {
        /// Path to the data-source definition
        #[arg(short, long)]
        source: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON (one document per line)
    Json,
    /// Indented JSON for human reading
    Pretty,
}
