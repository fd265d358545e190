//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Document locations are compared and sorted through this type, so two
/// spellings of the same location on Windows and Unix collapse to one key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next()
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Check whether the file name ends with any of the given suffixes.
    pub fn has_suffix<S: AsRef<str>>(&self, suffixes: &[S]) -> bool {
        self.file_name()
            .is_some_and(|name| suffixes.iter().any(|s| name.ends_with(s.as_ref())))
    }

    /// Check whether this path lies under `base`, component-wise.
    ///
    /// `/repo/dapis` is under `/repo`, `/repository` is not.
    pub fn is_under(&self, base: &NormalizedPath) -> bool {
        let base = base.inner.trim_end_matches('/');
        if base.is_empty() {
            return self.inner.starts_with('/');
        }
        match self.inner.strip_prefix(base) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// The path relative to `base`, if it lies under it.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<&str> {
        if !self.is_under(base) {
            return None;
        }
        let base = base.inner.trim_end_matches('/');
        Some(self.inner[base.len()..].trim_start_matches('/'))
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backslashes_are_normalized() {
        let path = NormalizedPath::new("C:\\repo\\dapis\\a.teams.yaml");
        assert_eq!(path.as_str(), "C:/repo/dapis/a.teams.yaml");
    }

    #[test]
    fn is_under_respects_component_boundaries() {
        let root = NormalizedPath::new("/repo");
        assert!(NormalizedPath::new("/repo/dapis/x.yaml").is_under(&root));
        assert!(NormalizedPath::new("/repo").is_under(&root));
        assert!(!NormalizedPath::new("/repository/x.yaml").is_under(&root));
        assert!(NormalizedPath::new("/repo/x.yaml").is_under(&NormalizedPath::new("/repo/")));
    }

    #[test]
    fn relative_to_strips_base() {
        let root = NormalizedPath::new("/repo");
        let path = NormalizedPath::new("/repo/dapis/x.dapi.yaml");
        assert_eq!(path.relative_to(&root), Some("dapis/x.dapi.yaml"));
        assert_eq!(NormalizedPath::new("/other/x").relative_to(&root), None);
    }

    #[test]
    fn has_suffix_matches_file_name_only() {
        let path = NormalizedPath::new("/repo/.teams.yaml/readme.md");
        assert!(!path.has_suffix(&[".teams.yaml"]));
        let path = NormalizedPath::new("/repo/acme.teams.yml");
        assert!(path.has_suffix(&[".teams.yaml", ".teams.yml"]));
    }

    #[test]
    fn extension_ignores_dotfiles() {
        assert_eq!(NormalizedPath::new("/a/.hidden").extension(), None);
        assert_eq!(NormalizedPath::new("/a/b.dapi.json").extension(), Some("json"));
    }
}
