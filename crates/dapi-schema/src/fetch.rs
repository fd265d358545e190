//! Schema body retrieval

use std::time::Duration;

use serde_json::Value;

use crate::error::{Error, Result};

/// Failure to retrieve a schema body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct FetchError(pub String);

/// Retrieves schema bodies by URL.
///
/// Implementations make exactly one attempt per call; caching is the
/// validator's job.
pub trait SchemaFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> std::result::Result<Value, FetchError>;
}

/// Fetches schemas with a blocking HTTP GET bounded by a timeout.
#[derive(Debug, Clone)]
pub struct HttpSchemaFetcher {
    client: reqwest::blocking::Client,
}

impl HttpSchemaFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl SchemaFetcher for HttpSchemaFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<Value, FetchError> {
        tracing::debug!(url, "Fetching schema");
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError(e.to_string()))?;
        response
            .json::<Value>()
            .map_err(|e| FetchError(format!("invalid schema body: {e}")))
    }
}
