//! Command implementations for dapi-cli

pub mod list;
pub mod schema_url;
pub mod validate;

use std::path::PathBuf;

use dapi_core::ExecutionMode;
use dapi_entities::{MANIFEST_FILE, Manifest};
use dapi_fs::NormalizedPath;

use crate::cli::ModeArg;
use crate::error::Result;

pub use list::run_list;
pub use schema_url::run_schema_url;
pub use validate::{ValidateArgs, run_validate};

/// Repository root and its manifest, resolved once per invocation.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub root: NormalizedPath,
    pub manifest: Manifest,
}

impl ProjectContext {
    pub fn resolve(root: Option<PathBuf>, config: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        let root = NormalizedPath::new(root);
        let config = match config {
            Some(path) => NormalizedPath::new(path),
            None => root.join(MANIFEST_FILE),
        };
        let manifest = Manifest::load(&config)?;
        tracing::debug!(root = %root, config = %config, "Resolved project");
        Ok(Self { root, manifest })
    }
}

/// An explicit `--mode` wins; otherwise the CI variable decides.
pub fn resolve_mode(flag: Option<ModeArg>, ci: Option<&str>) -> ExecutionMode {
    match flag {
        Some(mode) => mode.into(),
        None => ExecutionMode::from_ci_flag(ci),
    }
}
