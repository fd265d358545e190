//! Error types for dapi-content

use std::path::PathBuf;

/// Result type for dapi-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dapi-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    #[error("Failed to parse {format} document {path}: {message}")]
    DocumentParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported file type for {path}: only YAML and JSON documents are supported")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to render {format} content: {message}")]
    RenderError { format: String, message: String },

    #[error(transparent)]
    Fs(#[from] dapi_fs::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn render(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RenderError {
            format: format.into(),
            message: message.into(),
        }
    }
}
