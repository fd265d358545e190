//! Document parsing, rendering, paths and diffing for the OpenDAPI validator
//!
//! Every document is held as an insertion-ordered `serde_json::Value` plus
//! the [`Format`] it was read from, so a rewrite lands in the same format.

pub mod diff;
pub mod document;
pub mod error;
pub mod format;
pub mod handlers;
pub mod path;

pub use diff::{SemanticChange, SemanticDiff, unified_diff};
pub use document::Document;
pub use error::{Error, Result};
pub use format::{Format, FormatHandler};
pub use path::{FieldPath, PathSegment};
