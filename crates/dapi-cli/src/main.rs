//! OpenDAPI CLI
//!
//! Validates and autoupdates the OpenDAPI documents of a repository.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} OpenDAPI validator", "opendapi".green().bold());
            println!();
            println!("Run {} for available commands.", "opendapi --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Validate {
            root,
            config,
            autoupdate,
            dry_run,
            mode,
            json,
        } => {
            let ctx = commands::ProjectContext::resolve(root, config)?;
            let mode = commands::resolve_mode(mode, std::env::var("CI").ok().as_deref());
            commands::run_validate(
                &ctx,
                commands::ValidateArgs {
                    autoupdate,
                    dry_run,
                    mode,
                    json,
                },
            )
        }
        Commands::List { root, config, json } => {
            let ctx = commands::ProjectContext::resolve(root, config)?;
            commands::run_list(&ctx, json)
        }
        Commands::SchemaUrl {
            entity,
            version,
            origin,
        } => commands::run_schema_url(&entity, &version, &origin),
    }
}
