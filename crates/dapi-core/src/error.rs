//! Error types for dapi-core

use dapi_fs::NormalizedPath;

/// Result type for dapi-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// A single per-document failure: a message plus optional sub-messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", render_validation(.message, .details))]
pub struct ValidationError {
    pub message: String,
    pub details: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Flatten a schema failure, keeping each violation as a sub-message.
    pub fn from_schema(err: &dapi_schema::Error) -> Self {
        match err {
            dapi_schema::Error::Mismatch { location, url, .. } => {
                Self::new(format!("Validation error for {location} against {url}"))
                    .with_details(err.details())
            }
            other => Self::new(other.to_string()),
        }
    }
}

fn render_validation(message: &str, details: &[String]) -> String {
    let mut out = message.to_string();
    for detail in details {
        out.push_str("\n  - ");
        out.push_str(detail);
    }
    out
}

/// Every failure collected during one validation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{context}\n\nFound {} errors:\n\n{}", .errors.len(), render_aggregate(.errors))]
pub struct AggregateError {
    pub context: String,
    pub errors: Vec<ValidationError>,
}

impl AggregateError {
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

fn render_aggregate(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// A document that autoupdate would change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleDocument {
    pub location: NormalizedPath,
    /// Semantic diff summary, empty for a document that does not exist yet
    pub summary: String,
}

impl std::fmt::Display for StaleDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.summary.is_empty() {
            write!(f, "{} (missing)", self.location)
        } else {
            write!(f, "{} ({})", self.location, self.summary)
        }
    }
}

fn render_stale(stale: &[StaleDocument]) -> String {
    stale
        .iter()
        .map(|s| format!("  {s}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One entity's failure inside a runner invocation.
#[derive(Debug)]
pub struct EntityFailure {
    pub entity: String,
    pub error: Error,
}

fn render_failures(failures: &[EntityFailure]) -> String {
    failures
        .iter()
        .map(|f| f.error.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Errors that can occur in dapi-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Existence was enforced and discovery matched nothing
    #[error("OpenDAPI {entity} error: No files found in {root}")]
    NoFilesFound { entity: String, root: NormalizedPath },

    /// Documents are stale but the execution mode forbids writes
    #[error(
        "OpenDAPI {entity} error: {} file(s) not up to date and cannot be autoupdated during CI. \
         Run OpenDAPI validators locally to update them.\n{}",
        .stale.len(),
        render_stale(.stale)
    )]
    AutoupdateNotAllowed {
        entity: String,
        stale: Vec<StaleDocument>,
    },

    /// A template names a location the collector would never discover
    #[error(
        "OpenDAPI {entity} error: {location} must be inside {root}, otherwise the validator cannot find it"
    )]
    LocationOutsideRoot {
        entity: String,
        location: NormalizedPath,
        root: NormalizedPath,
    },

    #[error("Invalid run options: {message}")]
    InvalidRunOptions { message: String },

    /// Aggregated schema and content failures
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("{} of the entity validators failed:\n\n{}", .failures.len(), render_failures(.failures))]
    RunnerFailed { failures: Vec<EntityFailure> },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from dapi-fs
    #[error(transparent)]
    Fs(#[from] dapi_fs::Error),

    /// Document error from dapi-content
    #[error(transparent)]
    Content(#[from] dapi_content::Error),

    /// Schema error from dapi-schema
    #[error(transparent)]
    Schema(#[from] dapi_schema::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_lists_every_message() {
        let err = AggregateError {
            context: "OpenDAPI teams error".into(),
            errors: vec![
                ValidationError::new("Schema not found in a.teams.yaml"),
                ValidationError::new("Validation error for b.teams.yaml")
                    .with_details(vec!["at /teams/0: \"urn\" is a required property".into()]),
            ],
        };
        assert_eq!(
            err.to_string(),
            "OpenDAPI teams error\n\nFound 2 errors:\n\n\
             Schema not found in a.teams.yaml\n\n\
             Validation error for b.teams.yaml\n  - at /teams/0: \"urn\" is a required property"
        );
        assert_eq!(err.count(), 2);
    }

    #[test]
    fn autoupdate_not_allowed_names_each_file() {
        let err = Error::AutoupdateNotAllowed {
            entity: "teams".into(),
            stale: vec![
                StaleDocument {
                    location: NormalizedPath::new("/r/a.teams.yaml"),
                    summary: "+ teams[1]".into(),
                },
                StaleDocument {
                    location: NormalizedPath::new("/r/b.teams.yaml"),
                    summary: String::new(),
                },
            ],
        };
        let text = err.to_string();
        assert!(text.contains("2 file(s) not up to date"), "{text}");
        assert!(text.contains("/r/a.teams.yaml (+ teams[1])"), "{text}");
        assert!(text.contains("/r/b.teams.yaml (missing)"), "{text}");
    }
}
