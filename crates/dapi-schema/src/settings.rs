//! Schema validation settings

use std::time::Duration;

use crate::reference::DEFAULT_TRUSTED_ORIGIN;

/// Default bound on a single schema fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Where schemas may come from and how long a fetch may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSettings {
    pub trusted_origin: String,
    pub timeout: Duration,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            trusted_origin: DEFAULT_TRUSTED_ORIGIN.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}
