//! Type definitions for change detection.

use std::fmt;

/// Outcome of comparing new content against the persisted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeVerdict {
    /// Content differs, or nothing was persisted before
    Changed,
    /// Content equals the persisted content
    Unchanged,
}

impl ChangeVerdict {
    /// Check if the content changed.
    pub fn is_changed(&self) -> bool {
        matches!(self, ChangeVerdict::Changed)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ChangeVerdict::Changed => "changed",
            ChangeVerdict::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for ChangeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How two payloads are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Comparison {
    /// Byte-for-byte equality
    #[default]
    Exact,
    /// Equality after stripping trailing `\n` and `\r` bytes from both sides
    IgnoreTrailingNewline,
}
