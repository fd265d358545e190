//! Schema references carried by documents

/// Origin every schema reference must live under.
pub const DEFAULT_TRUSTED_ORIGIN: &str = "https://opendapi.org/";

/// Top-level document field holding the schema reference.
pub const SCHEMA_FIELD: &str = "schema";

/// A schema URL of the form `<origin>spec/<version>/<entity>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaRef {
    url: String,
}

impl SchemaRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Build the reference for an entity schema at a spec version.
    ///
    /// ```
    /// use dapi_schema::SchemaRef;
    ///
    /// let r = SchemaRef::for_entity("https://opendapi.org/", "0-0-1", "teams");
    /// assert_eq!(r.as_str(), "https://opendapi.org/spec/0-0-1/teams.json");
    /// assert_eq!(r.version(), Some("0-0-1"));
    /// assert_eq!(r.entity(), Some("teams"));
    /// ```
    pub fn for_entity(origin: &str, version: &str, entity: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self::new(format!("{origin}/spec/{version}/{entity}.json"))
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Whether this reference is hosted under `origin`.
    pub fn is_under(&self, origin: &str) -> bool {
        self.url.starts_with(origin)
    }

    /// Entity name encoded in the final path segment.
    pub fn entity(&self) -> Option<&str> {
        let (_, last) = self.url.rsplit_once('/')?;
        last.strip_suffix(".json").filter(|s| !s.is_empty())
    }

    /// Spec version encoded in the segment before the entity.
    pub fn version(&self) -> Option<&str> {
        let (head, _) = self.url.rsplit_once('/')?;
        let (_, version) = head.rsplit_once('/')?;
        (!version.is_empty()).then_some(version)
    }
}

impl std::fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}
