//! In-memory collaborators that record how they were used.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dapi_content::Document;
use dapi_core::{
    DocumentSet, DocumentWriter, EntityCapability, EntityPolicy, FsDocumentWriter, Template,
    ValidationError,
};
use dapi_fs::NormalizedPath;
use dapi_schema::{FetchError, SchemaFetcher, SchemaSettings, SchemaValidator};
use serde_json::{Value, json};

/// A schema accepting any object that declares a string `schema` field.
pub fn permissive_schema() -> Value {
    json!({
        "type": "object",
        "properties": {"schema": {"type": "string"}},
        "required": ["schema"]
    })
}

/// Serves schemas from memory and counts every fetch.
///
/// Clones share the call log, so keep one clone to inspect after handing
/// the other to a [`SchemaValidator`].
#[derive(Clone, Default)]
pub struct RecordingFetcher {
    schemas: HashMap<String, Value>,
    fallback: Option<Value>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every URL with `schema`.
    pub fn serving_all(schema: Value) -> Self {
        Self {
            fallback: Some(schema),
            ..Self::default()
        }
    }

    pub fn with_schema(mut self, url: &str, schema: Value) -> Self {
        self.schemas.insert(url.to_string(), schema);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// A validator with default settings backed by a clone of this fetcher.
    pub fn validator(&self) -> SchemaValidator {
        SchemaValidator::new(SchemaSettings::default(), Box::new(self.clone()))
    }
}

impl SchemaFetcher for RecordingFetcher {
    fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.schemas
            .get(url)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| FetchError(format!("404 Not Found for url ({url})")))
    }
}

/// Records every document handed to it, optionally writing it to disk too.
#[derive(Clone, Default)]
pub struct RecordingWriter {
    written: Arc<Mutex<Vec<Document>>>,
    passthrough: bool,
}

impl RecordingWriter {
    /// Record only; nothing reaches the filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and also write through [`FsDocumentWriter`].
    pub fn passthrough() -> Self {
        Self {
            passthrough: true,
            ..Self::default()
        }
    }

    pub fn write_count(&self) -> usize {
        self.written.lock().unwrap().len()
    }

    pub fn written(&self) -> Vec<Document> {
        self.written.lock().unwrap().clone()
    }

    pub fn locations(&self) -> Vec<NormalizedPath> {
        self.written()
            .iter()
            .map(|d| d.location().clone())
            .collect()
    }
}

impl DocumentWriter for RecordingWriter {
    fn write(&self, document: &Document) -> dapi_core::Result<()> {
        self.written.lock().unwrap().push(document.clone());
        if self.passthrough {
            FsDocumentWriter.write(document)?;
        }
        Ok(())
    }
}

type ContentRule = Box<dyn Fn(&NormalizedPath, &Value) -> Result<(), ValidationError> + Send + Sync>;

/// A capability with a fixed policy and template.
pub struct StaticCapability {
    name: String,
    policy: EntityPolicy,
    template: Template,
    rule: Option<ContentRule>,
}

impl StaticCapability {
    pub fn new(name: &str, policy: EntityPolicy) -> Self {
        Self {
            name: name.to_string(),
            policy,
            template: Template::new(),
            rule: None,
        }
    }

    pub fn with_template_entry(mut self, location: NormalizedPath, content: Value) -> Self {
        self.template.insert(location, content);
        self
    }

    pub fn with_content_rule(
        mut self,
        rule: impl Fn(&NormalizedPath, &Value) -> Result<(), ValidationError> + Send + Sync + 'static,
    ) -> Self {
        self.rule = Some(Box::new(rule));
        self
    }
}

impl EntityCapability for StaticCapability {
    fn name(&self) -> &str {
        &self.name
    }

    fn policy(&self) -> &EntityPolicy {
        &self.policy
    }

    fn template(&self) -> Template {
        self.template.clone()
    }

    fn check_content(
        &self,
        location: &NormalizedPath,
        content: &Value,
        _snapshot: &DocumentSet,
    ) -> Result<(), ValidationError> {
        match &self.rule {
            Some(rule) => rule(location, content),
            None => Ok(()),
        }
    }
}
