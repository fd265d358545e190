//! Error types for dapi-schema

/// Result type for dapi-schema operations
pub type Result<T> = std::result::Result<T, Error>;

/// One violation of a schema by a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchDetail {
    /// JSON Pointer to the violating value, empty for the root
    pub instance_path: String,
    pub message: String,
}

impl std::fmt::Display for MismatchDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.instance_path.is_empty() {
            "/"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "at {path}: {}", self.message)
    }
}

fn render_details(details: &[MismatchDetail]) -> String {
    details
        .iter()
        .map(|d| format!("  {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors that can occur while validating a document against its schema
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Schema not found in {location}")]
    MissingSchema { location: String },

    #[error("Unsupported schema found at {reference} for {location} - not hosted on {origin}")]
    UntrustedSchemaHost {
        location: String,
        reference: String,
        origin: String,
    },

    #[error("Error fetching schema {url} for {location}: {message}")]
    Fetch {
        location: String,
        url: String,
        message: String,
    },

    #[error("Schema {url} is not a valid JSON Schema: {message}")]
    InvalidSchema { url: String, message: String },

    #[error("Validation error for {location} against {url}:\n{}", render_details(.details))]
    Mismatch {
        location: String,
        url: String,
        details: Vec<MismatchDetail>,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl Error {
    /// Individual sub-messages, one per schema violation.
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::Mismatch { details, .. } => details.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        }
    }
}
