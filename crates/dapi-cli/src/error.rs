//! Error types for dapi-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from dapi-core
    #[error(transparent)]
    Core(#[from] dapi_core::Error),

    /// Error from dapi-entities
    #[error(transparent)]
    Entities(#[from] dapi_entities::Error),

    /// Error from dapi-schema
    #[error(transparent)]
    Schema(#[from] dapi_schema::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
