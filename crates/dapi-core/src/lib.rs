//! Core engine for OpenDAPI metadata documents
//!
//! This crate ties the document layers together:
//!
//! - **Collection**: suffix-based discovery and parsing into a [`DocumentSet`]
//! - **Reconciliation**: merging a desired-state template into human-edited documents
//! - **Autoupdate**: planning and applying template merges behind an [`ExecutionMode`] gate
//! - **Validation**: schema and content checks with every failure aggregated
//!
//! Entity types plug in through [`EntityCapability`]; the engine never
//! branches on which entity it is running.
//!
//! # Architecture
//!
//! ```text
//!             dapi-cli
//!                |
//!          dapi-entities
//!                |
//!            dapi-core
//!                |
//!     +----------+-----------+
//!     |          |           |
//!  dapi-fs  dapi-content  dapi-schema
//! ```
//!
//! # Example
//!
//! ```
//! use dapi_core::{MergePolicy, ReconciliationEngine};
//! use serde_json::json;
//!
//! let policy = MergePolicy::default();
//! let engine = ReconciliationEngine::new(&policy);
//! let merged = engine.merge(
//!     &json!({"teams": [{"urn": "a", "name": "A"}]}),
//!     &json!({"teams": [{"urn": "a", "name": "Alice"}]}),
//! );
//! assert_eq!(merged, json!({"teams": [{"urn": "a", "name": "Alice"}]}));
//! ```

pub mod autoupdate;
pub mod capability;
pub mod collector;
pub mod error;
pub mod mode;
pub mod reconcile;
pub mod runner;
pub mod validation;
pub mod validator;

pub use autoupdate::{
    AutoupdatePipeline, AutoupdatePlan, AutoupdateReport, DocumentWriter, FsDocumentWriter,
    PlannedWrite,
};
pub use capability::{EntityCapability, EntityPolicy, MergePolicy, Template};
pub use collector::{DocumentSet, FileCollector};
pub use error::{AggregateError, EntityFailure, Error, Result, StaleDocument, ValidationError};
pub use mode::ExecutionMode;
pub use reconcile::{ReconciliationEngine, is_truthy};
pub use runner::{RunSummary, Runner};
pub use validation::ValidationPipeline;
pub use validator::{EntityValidator, RunOptions, RunOutcome};
