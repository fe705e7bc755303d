//! Change detection between persisted and new content.
//!
//! Detection is whole-buffer equality. There is no diffing: the only
//! question answered is whether the new payload is the same as the last one
//! stored for the key. A missing previous payload always counts as a change,
//! so the first run for a key lets the following command run.

mod types;

use tracing::debug;

pub use self::types::{ChangeVerdict, Comparison};

/// Compares new content against the previously persisted content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDetector {
    comparison: Comparison,
}

impl ChangeDetector {
    /// Create a detector using exact comparison.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with the given comparison mode.
    pub fn with_comparison(comparison: Comparison) -> Self {
        Self { comparison }
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Decide whether `new` differs from `previous`.
    pub fn detect(&self, previous: Option<&[u8]>, new: &[u8]) -> ChangeVerdict {
        let verdict = match previous {
            None => ChangeVerdict::Changed,
            Some(prev) if self.same(prev, new) => ChangeVerdict::Unchanged,
            Some(_) => ChangeVerdict::Changed,
        };

        debug!(
            had_previous = previous.is_some(),
            previous_len = previous.map(<[u8]>::len),
            new_len = new.len(),
            comparison = ?self.comparison,
            verdict = %verdict,
            "Compared content"
        );

        verdict
    }

    fn same(&self, a: &[u8], b: &[u8]) -> bool {
        match self.comparison {
            Comparison::Exact => a == b,
            Comparison::IgnoreTrailingNewline => {
                trim_trailing_newlines(a) == trim_trailing_newlines(b)
            }
        }
    }
}

/// Exact comparison of `previous` and `new`.
pub fn detect(previous: Option<&[u8]>, new: &[u8]) -> ChangeVerdict {
    ChangeDetector::new().detect(previous, new)
}

/// Strip trailing `\n` and `\r` bytes.
pub fn trim_trailing_newlines(content: &[u8]) -> &[u8] {
    let end = content
        .iter()
        .rposition(|b| *b != b'\n' && *b != b'\r')
        .map_or(0, |i| i + 1);
    &content[..end]
}
