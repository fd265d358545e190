//! A parsed metadata document and its on-disk identity

use dapi_fs::{NormalizedPath, io};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::Format;

/// A document read from (or destined for) a location on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    location: NormalizedPath,
    format: Format,
    content: Value,
}

impl Document {
    pub fn new(location: NormalizedPath, format: Format, content: Value) -> Self {
        Self {
            location,
            format,
            content,
        }
    }

    /// Build a document whose format follows the location's extension.
    pub fn at(location: NormalizedPath, content: Value) -> Result<Self> {
        let format = Format::from_path(&location)?;
        Ok(Self::new(location, format, content))
    }

    /// Parse `source` as the format implied by `location`.
    pub fn parse(location: NormalizedPath, source: &str) -> Result<Self> {
        let format = Format::from_path(&location)?;
        let content = format.parse(source).map_err(|e| match e {
            Error::ParseError { format, message } => Error::DocumentParse {
                path: location.to_native(),
                format,
                message,
            },
            other => other,
        })?;
        Ok(Self::new(location, format, content))
    }

    /// Read and parse the document at `location`.
    ///
    /// The extension is checked before the file is read, so an unsupported
    /// file never costs an I/O call.
    pub fn load(location: &NormalizedPath) -> Result<Self> {
        Format::from_path(location)?;
        let source = io::read_text(location)?;
        Self::parse(location.clone(), &source)
    }

    pub fn render(&self) -> Result<String> {
        self.format.render(&self.content)
    }

    pub fn location(&self) -> &NormalizedPath {
        &self.location
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn content(&self) -> &Value {
        &self.content
    }

    pub fn into_content(self) -> Value {
        self.content
    }
}
