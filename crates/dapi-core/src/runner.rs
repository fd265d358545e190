//! Run every entity validator against one repository

use std::sync::Arc;

use dapi_fs::NormalizedPath;
use dapi_schema::SchemaValidator;

use crate::autoupdate::{DocumentWriter, FsDocumentWriter};
use crate::capability::EntityCapability;
use crate::error::{EntityFailure, Error, Result};
use crate::mode::ExecutionMode;
use crate::validator::{EntityValidator, RunOptions, RunOutcome};

/// Outcomes of a runner invocation, one per entity, in run order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub outcomes: Vec<RunOutcome>,
}

impl RunSummary {
    pub fn written(&self) -> usize {
        self.outcomes.iter().map(|o| o.report.written.len()).sum()
    }

    pub fn pending(&self) -> usize {
        self.outcomes.iter().map(|o| o.pending.len()).sum()
    }
}

/// Drives a list of entity capabilities over one root.
///
/// Every entity runs even when an earlier one fails; failures are
/// reported together. One [`SchemaValidator`] is shared, so a schema is
/// fetched at most once per invocation.
pub struct Runner {
    root: NormalizedPath,
    mode: ExecutionMode,
    options: RunOptions,
    writer: Arc<dyn DocumentWriter>,
}

impl Runner {
    pub fn new(root: NormalizedPath, mode: ExecutionMode) -> Self {
        Self {
            root,
            mode,
            options: RunOptions::full(),
            writer: Arc::new(FsDocumentWriter),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_writer(mut self, writer: Arc<dyn DocumentWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn run(
        &self,
        capabilities: &[Box<dyn EntityCapability>],
        schemas: &mut SchemaValidator,
    ) -> Result<RunSummary> {
        self.options.check()?;
        let mut summary = RunSummary::default();
        let mut failures = Vec::new();

        for capability in capabilities {
            let entity = capability.name().to_string();
            tracing::debug!(entity = %entity, mode = %self.mode, "Running entity validator");
            match self.run_one(capability.as_ref(), schemas) {
                Ok(outcome) => summary.outcomes.push(outcome),
                Err(error) => {
                    tracing::debug!(entity = %entity, "Entity validator failed");
                    failures.push(EntityFailure { entity, error });
                }
            }
        }

        if failures.is_empty() {
            Ok(summary)
        } else {
            Err(Error::RunnerFailed { failures })
        }
    }

    fn run_one(
        &self,
        capability: &dyn EntityCapability,
        schemas: &mut SchemaValidator,
    ) -> Result<RunOutcome> {
        EntityValidator::new(self.root.clone(), capability, self.mode)?
            .with_writer(Arc::clone(&self.writer))
            .run(schemas, self.options)
    }
}
