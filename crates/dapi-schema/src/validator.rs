//! Cached JSON Schema validation of documents

use std::collections::HashMap;

use dapi_fs::NormalizedPath;
use serde_json::Value;

use crate::error::{Error, MismatchDetail, Result};
use crate::fetch::{HttpSchemaFetcher, SchemaFetcher};
use crate::reference::{SCHEMA_FIELD, SchemaRef};
use crate::settings::SchemaSettings;

/// Validates documents against the schema each one references.
///
/// Schema bodies are cached by URL for the life of the validator, so any
/// number of documents sharing a schema cost a single fetch. The cache is
/// never invalidated and is not synchronized: one validator serves one
/// single-threaded run.
pub struct SchemaValidator {
    settings: SchemaSettings,
    fetcher: Box<dyn SchemaFetcher>,
    bodies: HashMap<String, Value>,
    compiled: HashMap<String, jsonschema::Validator>,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("settings", &self.settings)
            .field("cached", &self.bodies.len())
            .finish()
    }
}

impl SchemaValidator {
    pub fn new(settings: SchemaSettings, fetcher: Box<dyn SchemaFetcher>) -> Self {
        Self {
            settings,
            fetcher,
            bodies: HashMap::new(),
            compiled: HashMap::new(),
        }
    }

    /// A validator that fetches over HTTP with the configured timeout.
    pub fn http(settings: SchemaSettings) -> Result<Self> {
        let fetcher = HttpSchemaFetcher::new(settings.timeout)?;
        Ok(Self::new(settings, Box::new(fetcher)))
    }

    pub fn settings(&self) -> &SchemaSettings {
        &self.settings
    }

    /// Whether a schema body for `url` is already cached.
    pub fn is_cached(&self, url: &str) -> bool {
        self.bodies.contains_key(url)
    }

    /// Check a document's schema reference, fetch the schema if needed and
    /// validate the document against it.
    ///
    /// Steps run in order and stop at the first failure: reference present,
    /// reference trusted, schema fetched, document conforms.
    pub fn validate(&mut self, location: &NormalizedPath, document: &Value) -> Result<()> {
        let reference = self.reference_for(location, document)?;
        let url = reference.as_str();

        self.ensure_compiled(location, url)?;
        let Some(validator) = self.compiled.get(url) else {
            return Err(Error::InvalidSchema {
                url: url.to_string(),
                message: "schema was not compiled".to_string(),
            });
        };

        let details: Vec<MismatchDetail> = validator
            .iter_errors(document)
            .map(|err| MismatchDetail {
                instance_path: err.instance_path.to_string(),
                message: err.to_string(),
            })
            .collect();

        if details.is_empty() {
            tracing::debug!(location = %location, schema = url, "Document matches schema");
            Ok(())
        } else {
            Err(Error::Mismatch {
                location: location.to_string(),
                url: url.to_string(),
                details,
            })
        }
    }

    /// The trusted schema reference declared by `document`.
    pub fn reference_for(&self, location: &NormalizedPath, document: &Value) -> Result<SchemaRef> {
        let reference = document
            .get(SCHEMA_FIELD)
            .and_then(Value::as_str)
            .map(SchemaRef::new)
            .ok_or_else(|| Error::MissingSchema {
                location: location.to_string(),
            })?;

        if !reference.is_under(&self.settings.trusted_origin) {
            return Err(Error::UntrustedSchemaHost {
                location: location.to_string(),
                reference: reference.to_string(),
                origin: self.settings.trusted_origin.clone(),
            });
        }
        Ok(reference)
    }

    /// The schema body for `url`, fetched at most once.
    pub fn schema_body(&mut self, location: &NormalizedPath, url: &str) -> Result<&Value> {
        if !self.bodies.contains_key(url) {
            let body = self.fetcher.fetch(url).map_err(|e| Error::Fetch {
                location: location.to_string(),
                url: url.to_string(),
                message: e.to_string(),
            })?;
            self.bodies.insert(url.to_string(), body);
        } else {
            tracing::debug!(url, "Schema cache hit");
        }
        self.bodies.get(url).ok_or_else(|| Error::Fetch {
            location: location.to_string(),
            url: url.to_string(),
            message: "schema missing from cache".to_string(),
        })
    }

    fn ensure_compiled(&mut self, location: &NormalizedPath, url: &str) -> Result<()> {
        if self.compiled.contains_key(url) {
            return Ok(());
        }
        let body = self.schema_body(location, url)?;
        let validator = jsonschema::validator_for(body).map_err(|e| Error::InvalidSchema {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        self.compiled.insert(url.to_string(), validator);
        Ok(())
    }
}
