//! Semantic and textual diffs between document versions

use serde_json::Value;
use similar::TextDiff;

use crate::path::FieldPath;

/// Maximum recursion depth for diff operations
const MAX_DIFF_DEPTH: usize = 128;

/// A semantic change between two document values
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticChange {
    /// Path present only in the new value
    Added { path: FieldPath, value: Value },
    /// Path present only in the old value
    Removed { path: FieldPath, value: Value },
    /// Value changed at path
    Modified {
        path: FieldPath,
        old: Value,
        new: Value,
    },
}

impl SemanticChange {
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::Added { path, .. } | Self::Removed { path, .. } | Self::Modified { path, .. } => {
                path
            }
        }
    }
}

impl std::fmt::Display for SemanticChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added { path, .. } => write!(f, "+ {path}"),
            Self::Removed { path, .. } => write!(f, "- {path}"),
            Self::Modified { path, .. } => write!(f, "~ {path}"),
        }
    }
}

/// Result of comparing two document values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemanticDiff {
    pub changes: Vec<SemanticChange>,
}

impl SemanticDiff {
    /// Compute the changes that turn `old` into `new`.
    ///
    /// Mappings are compared key by key and sequences index by index.
    pub fn compute(old: &Value, new: &Value) -> Self {
        let mut changes = Vec::new();
        diff_values(old, new, FieldPath::root(), &mut changes, 0);
        Self { changes }
    }

    pub fn is_equivalent(&self) -> bool {
        self.changes.is_empty()
    }

    /// One-line summary, e.g. `+ teams[1], ~ organization.name`
    pub fn summary(&self) -> String {
        self.changes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn diff_values(
    old: &Value,
    new: &Value,
    path: FieldPath,
    changes: &mut Vec<SemanticChange>,
    depth: usize,
) {
    if old == new {
        return;
    }
    if depth > MAX_DIFF_DEPTH {
        changes.push(SemanticChange::Modified {
            path,
            old: old.clone(),
            new: new.clone(),
        });
        return;
    }

    match (old, new) {
        (Value::Object(old_obj), Value::Object(new_obj)) => {
            for (key, old_value) in old_obj {
                match new_obj.get(key) {
                    Some(new_value) => {
                        diff_values(old_value, new_value, path.key(key), changes, depth + 1)
                    }
                    None => changes.push(SemanticChange::Removed {
                        path: path.key(key),
                        value: old_value.clone(),
                    }),
                }
            }
            for (key, new_value) in new_obj {
                if !old_obj.contains_key(key) {
                    changes.push(SemanticChange::Added {
                        path: path.key(key),
                        value: new_value.clone(),
                    });
                }
            }
        }
        (Value::Array(old_arr), Value::Array(new_arr)) => {
            for (idx, old_value) in old_arr.iter().enumerate() {
                match new_arr.get(idx) {
                    Some(new_value) => {
                        diff_values(old_value, new_value, path.index(idx), changes, depth + 1)
                    }
                    None => changes.push(SemanticChange::Removed {
                        path: path.index(idx),
                        value: old_value.clone(),
                    }),
                }
            }
            for (idx, new_value) in new_arr.iter().enumerate().skip(old_arr.len()) {
                changes.push(SemanticChange::Added {
                    path: path.index(idx),
                    value: new_value.clone(),
                });
            }
        }
        _ => changes.push(SemanticChange::Modified {
            path,
            old: old.clone(),
            new: new.clone(),
        }),
    }
}

/// Render a unified line diff between two texts, labelled with `name`.
pub fn unified_diff(old: &str, new: &str, name: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{name}"), &format!("b/{name}"))
        .to_string()
}
