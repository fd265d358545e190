//! One entity's validator: snapshot, autoupdate and validation composed

use std::sync::Arc;

use dapi_fs::NormalizedPath;
use dapi_schema::SchemaValidator;

use crate::autoupdate::{
    AutoupdatePipeline, AutoupdatePlan, AutoupdateReport, DocumentWriter, FsDocumentWriter,
    PlannedWrite,
};
use crate::capability::EntityCapability;
use crate::collector::{DocumentSet, FileCollector};
use crate::error::{Error, Result};
use crate::mode::ExecutionMode;
use crate::validation::ValidationPipeline;

/// Options for [`EntityValidator::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Fail when no document of the entity exists
    pub enforce_existence: bool,
    /// Reconcile documents with the template before validating
    pub should_autoupdate: bool,
    /// Plan the autoupdate but write nothing
    pub dry_run: bool,
}

impl RunOptions {
    /// Existence enforced and autoupdate on, as a full repository run does.
    pub fn full() -> Self {
        Self {
            enforce_existence: true,
            should_autoupdate: true,
            dry_run: false,
        }
    }

    /// Autoupdate creates missing documents, so it only makes sense when
    /// their existence is required.
    pub fn check(&self) -> Result<()> {
        if self.should_autoupdate && !self.enforce_existence {
            return Err(Error::InvalidRunOptions {
                message: "should_autoupdate cannot be true if enforce_existence is false".into(),
            });
        }
        Ok(())
    }
}

/// What a successful run did
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub entity: String,
    /// Documents present after the run
    pub documents: usize,
    pub report: AutoupdateReport,
    /// Writes a dry run would have made
    pub pending: Vec<PlannedWrite>,
}

/// Validator for a single entity type.
///
/// Holds the entity's current document snapshot. The snapshot is replaced
/// wholesale on every rescan.
pub struct EntityValidator<'a> {
    capability: &'a dyn EntityCapability,
    collector: FileCollector,
    mode: ExecutionMode,
    writer: Arc<dyn DocumentWriter>,
    documents: DocumentSet,
}

impl<'a> EntityValidator<'a> {
    /// Create a validator and take the initial snapshot.
    pub fn new(
        root: NormalizedPath,
        capability: &'a dyn EntityCapability,
        mode: ExecutionMode,
    ) -> Result<Self> {
        let collector = FileCollector::new(root, capability.policy().suffixes.clone());
        let documents = collector.collect()?;
        Ok(Self {
            capability,
            collector,
            mode,
            writer: Arc::new(FsDocumentWriter),
            documents,
        })
    }

    pub fn with_writer(mut self, writer: Arc<dyn DocumentWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn name(&self) -> &str {
        self.capability.name()
    }

    pub fn root(&self) -> &NormalizedPath {
        self.collector.root()
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// The current snapshot.
    pub fn parsed_documents(&self) -> &DocumentSet {
        &self.documents
    }

    pub fn rescan(&mut self) -> Result<()> {
        self.documents = self.collector.collect()?;
        Ok(())
    }

    fn autoupdate_pipeline(&self) -> AutoupdatePipeline<'_> {
        AutoupdatePipeline::new(self.capability, self.collector.root(), self.mode)
    }

    /// What autoupdate would write, without writing.
    pub fn plan_autoupdate(&self) -> Result<AutoupdatePlan> {
        self.autoupdate_pipeline().plan(&self.documents)
    }

    /// Reconcile with the template, write stale documents and rescan.
    pub fn autoupdate(&mut self) -> Result<AutoupdateReport> {
        let pipeline = self.autoupdate_pipeline();
        let plan = pipeline.plan(&self.documents)?;
        let report = pipeline.apply(plan, self.writer.as_ref())?;
        self.rescan()?;
        Ok(report)
    }

    /// Rescan, then run existence, schema and content checks.
    pub fn validate(&mut self, schemas: &mut SchemaValidator, enforce_existence: bool) -> Result<()> {
        self.rescan()?;
        ValidationPipeline::new(self.capability, self.collector.root()).run(
            &self.documents,
            schemas,
            enforce_existence,
        )
    }

    /// Autoupdate when requested, then validate.
    pub fn run(&mut self, schemas: &mut SchemaValidator, options: RunOptions) -> Result<RunOutcome> {
        options.check()?;
        let mut outcome = RunOutcome {
            entity: self.name().to_string(),
            ..Default::default()
        };

        if options.should_autoupdate {
            if options.dry_run {
                outcome.pending = self.plan_autoupdate()?.writes;
            } else {
                outcome.report = self.autoupdate()?;
            }
        }

        self.validate(schemas, options.enforce_existence)?;
        outcome.documents = self.documents.len();
        Ok(outcome)
    }
}
