//! Discovery and parsing of an entity's documents

use std::collections::{BTreeMap, BTreeSet};

use dapi_content::Document;
use dapi_fs::NormalizedPath;

use crate::error::Result;

/// Parsed documents keyed by location, in sorted order.
pub type DocumentSet = BTreeMap<NormalizedPath, Document>;

/// Finds files by suffix under a root and parses them.
#[derive(Debug, Clone)]
pub struct FileCollector {
    root: NormalizedPath,
    suffixes: Vec<String>,
}

impl FileCollector {
    pub fn new(root: NormalizedPath, suffixes: Vec<String>) -> Self {
        Self { root, suffixes }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Every matching file under the root. Zero matches is not an error.
    pub fn discover(&self) -> Result<BTreeSet<NormalizedPath>> {
        Ok(dapi_fs::discover(&self.root, &self.suffixes)?)
    }

    /// Read one document; only YAML and JSON are accepted.
    pub fn parse(&self, path: &NormalizedPath) -> Result<Document> {
        Ok(Document::load(path)?)
    }

    /// Discover and parse every matching document.
    pub fn collect(&self) -> Result<DocumentSet> {
        let paths = self.discover()?;
        let mut documents = DocumentSet::new();
        for path in paths {
            let document = self.parse(&path)?;
            documents.insert(path, document);
        }
        tracing::debug!(
            root = %self.root,
            suffixes = ?self.suffixes,
            count = documents.len(),
            "Collected documents"
        );
        Ok(documents)
    }
}
