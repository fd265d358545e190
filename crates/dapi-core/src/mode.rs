//! Execution mode: whether autoupdate may write to disk

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Values of the CI signal that mean "running unattended".
const UNATTENDED_SIGNALS: &[&str] = &["true", "True", "1"];

/// Whether the current invocation may rewrite documents.
///
/// Resolved once at the process boundary and passed down explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// A local run; stale documents are rewritten.
    #[default]
    Interactive,

    /// A CI run; any stale document is an error and nothing is written.
    Unattended,
}

impl ExecutionMode {
    /// Interpret the value of a CI environment variable.
    ///
    /// ```
    /// use dapi_core::ExecutionMode;
    ///
    /// assert_eq!(ExecutionMode::from_ci_flag(Some("1")), ExecutionMode::Unattended);
    /// assert_eq!(ExecutionMode::from_ci_flag(Some("TRUE")), ExecutionMode::Interactive);
    /// assert_eq!(ExecutionMode::from_ci_flag(None), ExecutionMode::Interactive);
    /// ```
    pub fn from_ci_flag(value: Option<&str>) -> Self {
        match value {
            Some(v) if UNATTENDED_SIGNALS.contains(&v) => Self::Unattended,
            _ => Self::Interactive,
        }
    }

    pub fn allows_writes(&self) -> bool {
        matches!(self, Self::Interactive)
    }
}

impl FromStr for ExecutionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "interactive" | "local" => Ok(Self::Interactive),
            "unattended" | "ci" => Ok(Self::Unattended),
            _ => Err(Error::InvalidRunOptions {
                message: format!("unknown execution mode '{s}'"),
            }),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interactive => write!(f, "interactive"),
            Self::Unattended => write!(f, "unattended"),
        }
    }
}
