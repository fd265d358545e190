//! Format detection and handler trait

use dapi_fs::NormalizedPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::handlers::{JsonHandler, YamlHandler};

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a document location.
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        path.extension()
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnsupportedFormat {
                path: path.to_native(),
            })
    }

    /// Get default file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Yaml => &["yaml", "yml"],
            Self::Json => &["json"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }

    /// The handler that parses and renders this format
    pub fn handler(&self) -> &'static dyn FormatHandler {
        match self {
            Self::Yaml => &YamlHandler,
            Self::Json => &JsonHandler,
        }
    }

    pub fn parse(&self, source: &str) -> Result<Value> {
        self.handler().parse(source)
    }

    pub fn render(&self, value: &Value) -> Result<String> {
        self.handler().render(value)
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for format-specific handlers
pub trait FormatHandler: Send + Sync {
    /// Format identifier
    fn format(&self) -> Format;

    /// Parse source into the document value model
    fn parse(&self, source: &str) -> Result<Value>;

    /// Render a value back to text in this format
    fn render(&self, value: &Value) -> Result<String>;
}
