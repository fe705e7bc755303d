//! if_changed core - the change-detection logic behind the `if_changed` filter.
//!
//! - **key**: validation of the user-supplied identifier
//! - **config**: storage tiers and state path resolution
//! - **settings**: environment-derived options
//! - **change_detector**: comparison of persisted and new content
//! - **exit_code**: mapping of verdicts to process exit statuses

pub mod change_detector;
pub mod config;
pub mod exit_code;
pub mod key;
pub mod settings;

/// Name used for the binary, the state directory and state file prefixes.
pub const PROGRAM_NAME: &str = "if_changed";

pub use change_detector::{ChangeDetector, ChangeVerdict, Comparison};
pub use config::{LocateError, StateLocator, StorageTier};
pub use exit_code::{exit_code, EXIT_CHANGED, EXIT_FAILURE, EXIT_UNCHANGED};
pub use key::{Key, KeyError};
pub use settings::{Settings, SettingsError, WriteMode};
