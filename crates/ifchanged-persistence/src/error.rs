//! Error types for persistence operations.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The access that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Write,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Write => "write",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while reading or writing a state file.
///
/// A missing file on read is not an error; the store reports it as absent
/// content.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Access rights prevented opening or writing the file.
    #[error("Permission denied while trying to {operation} ({path})")]
    PermissionDenied {
        operation: Operation,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other filesystem failure.
    #[error("Unexpected error while trying to {operation} ({path}): {source}")]
    Unexpected {
        operation: Operation,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistenceError {
    /// Classifies an I/O failure on `path`.
    pub fn from_io(operation: Operation, path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => PersistenceError::PermissionDenied {
                operation,
                path,
                source,
            },
            _ => PersistenceError::Unexpected {
                operation,
                path,
                source,
            },
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            PersistenceError::PermissionDenied { operation, .. }
            | PersistenceError::Unexpected { operation, .. } => *operation,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            PersistenceError::PermissionDenied { path, .. }
            | PersistenceError::Unexpected { path, .. } => path,
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
