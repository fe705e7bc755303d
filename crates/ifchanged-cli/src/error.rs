//! Error types for a single invocation.

use std::io;

use ifchanged_core::{KeyError, LocateError, SettingsError};
use ifchanged_persistence::PersistenceError;
use thiserror::Error;

/// The command line was malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("needs a unique key to identify the content (got {0} arguments)")]
    ArgumentCount(usize),

    #[error("key should be non-empty alphanumeric (can contain dash and underscore)")]
    InvalidKey(#[source] KeyError),

    #[error("{0}")]
    Parse(String),
}

/// Everything that can abort an invocation.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Failed reading stdin: {0}")]
    Stdin(#[source] io::Error),
}

impl RunError {
    /// Usage errors are reported with the usage text; everything else is a
    /// runtime failure.
    pub fn is_usage(&self) -> bool {
        matches!(self, RunError::Usage(_))
    }
}

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, RunError>;
