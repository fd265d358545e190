//! Reconcile documents with their templates and persist the result
//!
//! Autoupdate runs in two phases. [`AutoupdatePipeline::plan`] merges every
//! template pair and keeps only the documents whose content would change.
//! [`AutoupdatePipeline::apply`] checks the execution mode once for the whole
//! plan and then writes. An unattended run with a non-empty plan fails
//! before anything touches the disk. Each write is atomic on its own; a
//! failure part-way through leaves earlier files written.

use dapi_content::{Document, Format, SemanticDiff, unified_diff};
use dapi_fs::NormalizedPath;
use serde_json::Value;

use crate::capability::EntityCapability;
use crate::collector::DocumentSet;
use crate::error::{Error, Result, StaleDocument};
use crate::mode::ExecutionMode;
use crate::reconcile::ReconciliationEngine;

/// Persists reconciled documents.
pub trait DocumentWriter: Send + Sync {
    fn write(&self, document: &Document) -> Result<()>;
}

/// Writes documents in their own format with an atomic replace.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentWriter;

impl DocumentWriter for FsDocumentWriter {
    fn write(&self, document: &Document) -> Result<()> {
        let rendered = document.render()?;
        dapi_fs::io::write_text(document.location(), &rendered)?;
        tracing::info!(location = %document.location(), "Autoupdated document");
        Ok(())
    }
}

/// A document that autoupdate would create or rewrite.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedWrite {
    /// The merge result, in the format it will be written in
    pub document: Document,
    /// Current content, `None` when the file does not exist yet
    pub previous: Option<Value>,
    pub diff: SemanticDiff,
}

impl PlannedWrite {
    pub fn location(&self) -> &NormalizedPath {
        self.document.location()
    }

    pub fn is_new(&self) -> bool {
        self.previous.is_none()
    }

    fn stale(&self) -> StaleDocument {
        StaleDocument {
            location: self.location().clone(),
            summary: if self.is_new() {
                String::new()
            } else {
                self.diff.summary()
            },
        }
    }

    /// Unified text diff between the current and the planned rendering.
    pub fn preview(&self) -> Result<String> {
        let format = self.document.format();
        let before = match &self.previous {
            Some(value) => format.render(value)?,
            None => String::new(),
        };
        let after = self.document.render()?;
        Ok(unified_diff(&before, &after, self.location().as_str()))
    }
}

/// Outcome of planning: what would change and what is already current.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoupdatePlan {
    pub entity: String,
    pub writes: Vec<PlannedWrite>,
    pub unchanged: Vec<NormalizedPath>,
}

impl AutoupdatePlan {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn stale_documents(&self) -> Vec<StaleDocument> {
        self.writes.iter().map(PlannedWrite::stale).collect()
    }
}

/// Report from applying a plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoupdateReport {
    pub written: Vec<NormalizedPath>,
    pub unchanged: Vec<NormalizedPath>,
}

/// Template reconciliation for one entity.
pub struct AutoupdatePipeline<'a> {
    capability: &'a dyn EntityCapability,
    root: &'a NormalizedPath,
    mode: ExecutionMode,
}

impl<'a> AutoupdatePipeline<'a> {
    pub fn new(
        capability: &'a dyn EntityCapability,
        root: &'a NormalizedPath,
        mode: ExecutionMode,
    ) -> Self {
        Self {
            capability,
            root,
            mode,
        }
    }

    /// Merge every template pair against `snapshot` without touching disk.
    pub fn plan(&self, snapshot: &DocumentSet) -> Result<AutoupdatePlan> {
        let entity = self.capability.name();
        let engine = ReconciliationEngine::new(&self.capability.policy().merge);
        let mut plan = AutoupdatePlan {
            entity: entity.to_string(),
            ..Default::default()
        };

        for (location, template) in self.capability.template() {
            if !location.is_under(self.root) {
                return Err(Error::LocationOutsideRoot {
                    entity: entity.to_string(),
                    location,
                    root: self.root.clone(),
                });
            }

            let (format, previous, merged) = match snapshot.get(&location) {
                Some(existing) => {
                    let merged = engine.merge(&template, existing.content());
                    if &merged == existing.content() {
                        tracing::debug!(location = %location, "Document is up to date");
                        plan.unchanged.push(location);
                        continue;
                    }
                    (existing.format(), Some(existing.content().clone()), merged)
                }
                None => (Format::from_path(&location)?, None, template),
            };

            let diff = match &previous {
                Some(previous) => SemanticDiff::compute(previous, &merged),
                None => SemanticDiff::compute(&Value::Null, &merged),
            };
            tracing::debug!(location = %location, changes = %diff.summary(), "Planned autoupdate");

            plan.writes.push(PlannedWrite {
                document: Document::new(location, format, merged),
                previous,
                diff,
            });
        }
        Ok(plan)
    }

    /// Write a plan, refusing any write when the mode forbids it.
    pub fn apply(
        &self,
        plan: AutoupdatePlan,
        writer: &dyn DocumentWriter,
    ) -> Result<AutoupdateReport> {
        if !plan.is_empty() && !self.mode.allows_writes() {
            return Err(Error::AutoupdateNotAllowed {
                entity: plan.entity.clone(),
                stale: plan.stale_documents(),
            });
        }

        let mut report = AutoupdateReport {
            unchanged: plan.unchanged,
            ..Default::default()
        };
        for write in plan.writes {
            writer.write(&write.document)?;
            report.written.push(write.document.location().clone());
        }
        Ok(report)
    }
}
