//! Filesystem layer for the OpenDAPI validator
//!
//! Provides normalized paths, suffix-based document discovery and
//! atomic writes used by the autoupdate pipeline.

pub mod discovery;
pub mod error;
pub mod io;
pub mod path;

pub use discovery::discover;
pub use error::{Error, Result};
pub use path::NormalizedPath;
