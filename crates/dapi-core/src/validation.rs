//! Existence, schema and content checks over a document snapshot

use dapi_schema::SchemaValidator;

use crate::capability::EntityCapability;
use crate::collector::DocumentSet;
use crate::error::{AggregateError, Error, Result, ValidationError};
use dapi_fs::NormalizedPath;

/// Validates every document of one entity and reports all failures at once.
pub struct ValidationPipeline<'a> {
    capability: &'a dyn EntityCapability,
    root: &'a NormalizedPath,
}

impl<'a> ValidationPipeline<'a> {
    pub fn new(capability: &'a dyn EntityCapability, root: &'a NormalizedPath) -> Self {
        Self { capability, root }
    }

    /// Run the checks against a freshly collected `snapshot`.
    ///
    /// With `enforce_existence`, an empty snapshot fails immediately and no
    /// schema is fetched. Otherwise each document is schema-checked, then
    /// content-checked only if the schema passed. No failure stops the loop.
    pub fn run(
        &self,
        snapshot: &DocumentSet,
        schemas: &mut SchemaValidator,
        enforce_existence: bool,
    ) -> Result<()> {
        let entity = self.capability.name();
        if enforce_existence && snapshot.is_empty() {
            return Err(Error::NoFilesFound {
                entity: entity.to_string(),
                root: self.root.clone(),
            });
        }

        let mut errors = Vec::new();
        for (location, document) in snapshot {
            if let Err(e) = schemas.validate(location, document.content()) {
                tracing::debug!(location = %location, error = %e, "Schema validation failed");
                errors.push(ValidationError::from_schema(&e));
                continue;
            }
            if let Err(e) = self
                .capability
                .check_content(location, document.content(), snapshot)
            {
                tracing::debug!(location = %location, error = %e, "Content validation failed");
                errors.push(e);
            }
        }

        if errors.is_empty() {
            tracing::debug!(entity, count = snapshot.len(), "All documents valid");
            return Ok(());
        }
        Err(AggregateError {
            context: format!("OpenDAPI {entity} error"),
            errors,
        }
        .into())
    }
}
