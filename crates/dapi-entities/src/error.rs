//! Error types for dapi-entities

use std::path::PathBuf;

/// Result type for dapi-entities operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading the manifest and building entities
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("dapis_dir {dapis_dir} must be a subdirectory of the repository root {root}")]
    DapisDirOutsideRoot { dapis_dir: String, root: String },

    /// Filesystem error from dapi-fs
    #[error(transparent)]
    Fs(#[from] dapi_fs::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
