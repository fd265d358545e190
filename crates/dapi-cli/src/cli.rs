//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dapi_core::ExecutionMode;
use dapi_schema::DEFAULT_TRUSTED_ORIGIN;

/// OpenDAPI - Keep data documentation valid and in sync
#[derive(Parser, Debug)]
#[command(name = "opendapi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Whether stale documents may be rewritten
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Local run: stale documents are rewritten
    Interactive,
    /// CI run: stale documents are an error
    Unattended,
}

impl From<ModeArg> for ExecutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Interactive => ExecutionMode::Interactive,
            ModeArg::Unattended => ExecutionMode::Unattended,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate every OpenDAPI document in the repository
    ///
    /// Examples:
    ///   opendapi validate                      # Check documents
    ///   opendapi validate --autoupdate         # Seed and reconcile, then check
    ///   opendapi validate --dry-run            # Show what autoupdate would change
    Validate {
        /// Repository root (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Manifest file (defaults to <root>/opendapi.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Reconcile documents with their templates before validating
        #[arg(long)]
        autoupdate: bool,

        /// Preview autoupdate changes without writing them
        #[arg(long)]
        dry_run: bool,

        /// Execution mode; defaults to unattended when CI is set
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List the documents found for each entity
    List {
        /// Repository root (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Manifest file (defaults to <root>/opendapi.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the schema URL for an entity
    SchemaUrl {
        /// Entity name, e.g. teams or dapi
        entity: String,

        /// Spec version
        #[arg(long, default_value = "0-0-1")]
        version: String,

        /// Schema origin
        #[arg(long, default_value = DEFAULT_TRUSTED_ORIGIN)]
        origin: String,
    },
}
