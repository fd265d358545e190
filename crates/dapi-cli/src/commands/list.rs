//! The list command: documents found per entity

use std::collections::BTreeMap;

use colored::Colorize;
use dapi_core::FileCollector;
use dapi_entities::entity_capabilities;

use super::ProjectContext;
use crate::error::Result;

pub fn run_list(ctx: &ProjectContext, json: bool) -> Result<()> {
    let capabilities = entity_capabilities(&ctx.root, &ctx.manifest)?;

    let mut found: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut order = Vec::new();
    for capability in &capabilities {
        let collector = FileCollector::new(ctx.root.clone(), capability.policy().suffixes.clone());
        let paths = collector
            .discover()?
            .into_iter()
            .map(|p| p.relative_to(&ctx.root).unwrap_or(p.as_str()).to_string())
            .collect();
        order.push(capability.name().to_string());
        found.insert(capability.name().to_string(), paths);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    for entity in order {
        let paths = &found[&entity];
        println!("{} ({})", entity.cyan().bold(), paths.len());
        for path in paths {
            println!("  {path}");
        }
    }
    Ok(())
}
