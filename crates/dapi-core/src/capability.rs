//! The seam between the engine and entity-specific behavior

use std::collections::BTreeMap;

use dapi_content::FieldPath;
use dapi_fs::NormalizedPath;
use serde_json::Value;

use crate::collector::DocumentSet;
use crate::error::ValidationError;

/// Desired-state documents keyed by location.
pub type Template = BTreeMap<NormalizedPath, Value>;

/// Lookup keys tried, in order, when matching list entries.
pub const DEFAULT_LOOKUP_KEYS: &[&str] = &["urn", "name"];

/// How sequences of mappings are reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePolicy {
    lookup_keys: Vec<String>,
    disallow_new_entries: Vec<FieldPath>,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            lookup_keys: DEFAULT_LOOKUP_KEYS.iter().map(ToString::to_string).collect(),
            disallow_new_entries: Vec::new(),
        }
    }
}

impl MergePolicy {
    pub fn new<S: AsRef<str>>(lookup_keys: &[S], disallow_new_entries: Vec<FieldPath>) -> Self {
        Self {
            lookup_keys: lookup_keys.iter().map(|k| k.as_ref().to_string()).collect(),
            disallow_new_entries,
        }
    }

    /// Add a path at which merging never introduces entries.
    pub fn disallow_new_entries_at(mut self, path: impl Into<FieldPath>) -> Self {
        self.disallow_new_entries.push(path.into());
        self
    }

    pub fn lookup_keys(&self) -> &[String] {
        &self.lookup_keys
    }

    pub fn disallowed_paths(&self) -> &[FieldPath] {
        &self.disallow_new_entries
    }

    pub fn disallows_new_entries(&self, path: &FieldPath) -> bool {
        self.disallow_new_entries.contains(path)
    }
}

/// Immutable per-entity configuration, built once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPolicy {
    /// File-name endings that belong to this entity
    pub suffixes: Vec<String>,
    pub merge: MergePolicy,
}

impl EntityPolicy {
    pub fn new<S: AsRef<str>>(suffixes: &[S]) -> Self {
        Self {
            suffixes: suffixes.iter().map(|s| s.as_ref().to_string()).collect(),
            merge: MergePolicy::default(),
        }
    }

    pub fn with_merge(mut self, merge: MergePolicy) -> Self {
        self.merge = merge;
        self
    }
}

/// Entity-specific behavior consumed by the pipelines.
///
/// Implementations supply what to look for, how to reconcile it and what it
/// should look like. They never see the execution mode or the filesystem
/// writer.
pub trait EntityCapability {
    /// Entity name used in messages, e.g. `teams`
    fn name(&self) -> &str;

    fn policy(&self) -> &EntityPolicy;

    /// Desired-state documents. Every location must lie under the root
    /// the validator scans.
    fn template(&self) -> Template;

    /// Semantic checks beyond the schema, run only on schema-valid documents.
    ///
    /// `snapshot` holds every document of this entity for cross-document rules.
    fn check_content(
        &self,
        _location: &NormalizedPath,
        _content: &Value,
        _snapshot: &DocumentSet,
    ) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Bare(EntityPolicy);

    impl EntityCapability for Bare {
        fn name(&self) -> &str {
            "bare"
        }

        fn policy(&self) -> &EntityPolicy {
            &self.0
        }

        fn template(&self) -> Template {
            Template::new()
        }
    }

    #[test]
    fn default_content_check_accepts_anything() {
        let capability = Bare(EntityPolicy::new(&[".bare.yaml"]));
        let result = capability.check_content(
            &NormalizedPath::new("/repo/x.bare.yaml"),
            &json!({"anything": [1, 2]}),
            &DocumentSet::new(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn disallow_check_compares_whole_paths() {
        let policy = MergePolicy::default().disallow_new_entries_at("fields");
        assert!(policy.disallows_new_entries(&FieldPath::from("fields")));
        assert!(!policy.disallows_new_entries(&FieldPath::from("nested.fields")));
        assert_eq!(policy.lookup_keys(), ["urn", "name"]);
    }
}
