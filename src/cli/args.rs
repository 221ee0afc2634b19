//! CLI argument definitions using clap
//!
//! Commands:
//! - shapecheck validate --schema <schema.yaml> <doc.yaml>...
//! - shapecheck check <schema.yaml>

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// shapecheck - structural schema validation for YAML documents
#[derive(Parser, Debug)]
#[command(name = "shapecheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate documents against a schema
    Validate {
        /// Path to the schema file
        #[arg(long)]
        schema: PathBuf,

        /// Documents to validate
        #[arg(required = true)]
        documents: Vec<PathBuf>,

        /// Maximum error depth to report (unbounded when omitted)
        #[arg(long)]
        depth: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Log progress events to stderr
        #[arg(long)]
        verbose: bool,
    },

    /// Load a schema and report whether it is well-formed
    Check {
        /// Path to the schema file
        schema: PathBuf,

        /// Log progress events to stderr
        #[arg(long)]
        verbose: bool,
    },
}

/// Report format for `validate`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable error descriptions
    Text,
    /// One JSON report per run
    Json,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
