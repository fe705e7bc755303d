//! Process exit statuses.
//!
//! The polarity is inverted relative to a plain boolean: a change maps to the
//! shell's "success" status so that `... | if_changed key && next` runs
//! `next` only when the content changed. Scripts depend on this mapping.

use crate::change_detector::ChangeVerdict;

/// Content changed: the following `&&` command runs.
pub const EXIT_CHANGED: u8 = 0;

/// Content unchanged: the following `&&` command is skipped.
pub const EXIT_UNCHANGED: u8 = 1;

/// Usage, configuration or filesystem failure.
pub const EXIT_FAILURE: u8 = 2;

/// Maps a verdict to its exit status.
pub const fn exit_code(verdict: ChangeVerdict) -> u8 {
    match verdict {
        ChangeVerdict::Changed => EXIT_CHANGED,
        ChangeVerdict::Unchanged => EXIT_UNCHANGED,
    }
}
