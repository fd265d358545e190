//! Structural paths into documents
//!
//! A [`FieldPath`] is the merge engine's notion of "where am I": mapping keys
//! and sequence indices from the document root.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `datastores.producers`
//! - Sequence indexing: `fields[0].name`
//!
//! ```
//! use dapi_content::path::{FieldPath, PathSegment};
//!
//! let path = FieldPath::parse("datastores.producers[0].urn");
//! assert_eq!(path.segments(), &[
//!     PathSegment::Key("datastores".to_string()),
//!     PathSegment::Key("producers".to_string()),
//!     PathSegment::Index(0),
//!     PathSegment::Key("urn".to_string()),
//! ]);
//! assert_eq!(path.to_string(), "datastores.producers[0].urn");
//! ```

use std::fmt;

use serde_json::Value;

/// A segment of a path - either a key or a sequence index
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// A key in a mapping
    Key(String),
    /// An index in a sequence
    Index(usize),
}

/// A location inside a document, from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A path made only of mapping keys.
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Self {
        Self(
            keys.iter()
                .map(|k| PathSegment::Key(k.as_ref().to_string()))
                .collect(),
        )
    }

    /// Parse `a.b[0].c` notation. Malformed indices are skipped.
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        let mut current_key = String::new();
        let mut chars = path.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if !current_key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                    }
                }
                '[' => {
                    if !current_key.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current_key)));
                    }
                    let mut index_str = String::new();
                    for ch in chars.by_ref() {
                        if ch == ']' {
                            break;
                        }
                        index_str.push(ch);
                    }
                    if let Ok(index) = index_str.parse::<usize>() {
                        segments.push(PathSegment::Index(index));
                    }
                }
                _ => current_key.push(ch),
            }
        }

        if !current_key.is_empty() {
            segments.push(PathSegment::Key(current_key));
        }

        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// This path extended by a mapping key.
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self(segments)
    }

    /// This path extended by a sequence index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Resolve this path against a value.
    pub fn get<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        self.0.iter().try_fold(value, |current, segment| match segment {
            PathSegment::Key(key) => current.get(key),
            PathSegment::Index(idx) => current.get(*idx),
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}
