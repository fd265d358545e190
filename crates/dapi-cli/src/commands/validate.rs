//! The validate command: autoupdate (optionally) and validate every entity

use colored::Colorize;
use dapi_core::{ExecutionMode, RunOptions, RunSummary, Runner};
use dapi_entities::entity_capabilities;
use dapi_schema::SchemaValidator;
use serde::Serialize;

use super::ProjectContext;
use crate::error::Result;

/// Flags of the validate command
#[derive(Debug, Clone, Copy)]
pub struct ValidateArgs {
    pub autoupdate: bool,
    pub dry_run: bool,
    pub mode: ExecutionMode,
    pub json: bool,
}

impl ValidateArgs {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            enforce_existence: true,
            should_autoupdate: self.autoupdate || self.dry_run,
            dry_run: self.dry_run,
        }
    }
}

#[derive(Debug, Serialize)]
struct EntityReport {
    entity: String,
    documents: usize,
    written: Vec<String>,
    pending: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ValidateReport {
    mode: String,
    valid: bool,
    entities: Vec<EntityReport>,
}

fn report(ctx: &ProjectContext, mode: ExecutionMode, summary: &RunSummary) -> ValidateReport {
    let relative = |p: &dapi_fs::NormalizedPath| {
        p.relative_to(&ctx.root).unwrap_or(p.as_str()).to_string()
    };
    ValidateReport {
        mode: mode.to_string(),
        valid: true,
        entities: summary
            .outcomes
            .iter()
            .map(|o| EntityReport {
                entity: o.entity.clone(),
                documents: o.documents,
                written: o.report.written.iter().map(relative).collect(),
                pending: o.pending.iter().map(|w| relative(w.location())).collect(),
            })
            .collect(),
    }
}

pub fn run_validate(ctx: &ProjectContext, args: ValidateArgs) -> Result<()> {
    let capabilities = entity_capabilities(&ctx.root, &ctx.manifest)?;
    let mut schemas = SchemaValidator::http(ctx.manifest.schema_settings())?;

    let summary = Runner::new(ctx.root.clone(), args.mode)
        .with_options(args.run_options())
        .run(&capabilities, &mut schemas)?;

    if args.json {
        let report = report(ctx, args.mode, &summary);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.dry_run {
        for outcome in &summary.outcomes {
            for write in &outcome.pending {
                print!("{}", write.preview()?);
            }
        }
    }

    for outcome in &summary.outcomes {
        let detail = if args.dry_run {
            format!("{} would change", outcome.pending.len())
        } else {
            format!("{} written", outcome.report.written.len())
        };
        println!(
            "{} {:<12} {} document(s), {}",
            "ok".green().bold(),
            outcome.entity,
            outcome.documents,
            detail.dimmed()
        );
    }
    println!(
        "{} All OpenDAPI documents are valid ({} mode)",
        "Done:".green().bold(),
        args.mode
    );
    Ok(())
}
