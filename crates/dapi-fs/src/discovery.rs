//! Recursive, suffix-based document discovery

use std::collections::BTreeSet;

use walkdir::{DirEntry, WalkDir};

use crate::{Error, NormalizedPath, Result};

/// Find every file under `root` whose name ends with one of `suffixes`.
///
/// Dot-prefixed directories below the root (`.git`, `.venv`) are not entered.
/// Zero matches is not an error. A missing root, an unreadable directory or
/// any other I/O fault during the walk is.
pub fn discover<S: AsRef<str>>(
    root: &NormalizedPath,
    suffixes: &[S],
) -> Result<BTreeSet<NormalizedPath>> {
    let native_root = root.to_native();
    let mut found = BTreeSet::new();

    let walker = WalkDir::new(&native_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden_dir(e));

    for entry in walker {
        let entry = entry.map_err(|e| Error::Discovery {
            root: native_root.clone(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = NormalizedPath::new(entry.path());
        if path.has_suffix(suffixes) {
            found.insert(path);
        }
    }

    tracing::debug!(root = %root, count = found.len(), "Discovered documents");
    Ok(found)
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with('.')
}
