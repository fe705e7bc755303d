//! Environment-derived options.
//!
//! `if_changed` takes no flags, so everything tunable comes from the
//! environment:
//!
//! - `IF_CHANGED_STORAGE`: `state` (default) or `tmp`
//! - `IF_CHANGED_IGNORE_TRAILING_NEWLINE`: compare without trailing newlines
//! - `IF_CHANGED_ATOMIC_WRITE`: replace the state file via temp file + rename

use std::ffi::OsString;

use thiserror::Error;

use crate::change_detector::Comparison;
use crate::config::StorageTier;

/// Environment variable selecting the storage tier.
pub const STORAGE_ENV: &str = "IF_CHANGED_STORAGE";

/// Environment variable enabling trailing-newline-insensitive comparison.
pub const IGNORE_TRAILING_NEWLINE_ENV: &str = "IF_CHANGED_IGNORE_TRAILING_NEWLINE";

/// Environment variable enabling atomic state file replacement.
pub const ATOMIC_WRITE_ENV: &str = "IF_CHANGED_ATOMIC_WRITE";

/// How new content replaces the state file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WriteMode {
    /// Open the state file with truncation and write in place.
    #[default]
    Truncate,
    /// Write a sibling temp file, then rename it over the state file.
    Atomic,
}

/// Invalid configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Options for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub tier: StorageTier,
    pub comparison: Comparison,
    pub write_mode: WriteMode,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Reads settings through `lookup`, which maps variable names to values.
    ///
    /// Unset and empty variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut settings = Self::default();

        if let Some(value) = read_var(&lookup, STORAGE_ENV)? {
            settings.tier = value.parse().map_err(|reason| SettingsError::InvalidValue {
                var: STORAGE_ENV,
                value: value.clone(),
                reason,
            })?;
        }

        if let Some(value) = read_var(&lookup, IGNORE_TRAILING_NEWLINE_ENV)? {
            if parse_bool(IGNORE_TRAILING_NEWLINE_ENV, &value)? {
                settings.comparison = Comparison::IgnoreTrailingNewline;
            }
        }

        if let Some(value) = read_var(&lookup, ATOMIC_WRITE_ENV)? {
            if parse_bool(ATOMIC_WRITE_ENV, &value)? {
                settings.write_mode = WriteMode::Atomic;
            }
        }

        Ok(settings)
    }
}

fn read_var<F>(lookup: &F, var: &'static str) -> Result<Option<String>, SettingsError>
where
    F: Fn(&str) -> Option<OsString>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => {
            let value = raw.into_string().map_err(|raw| SettingsError::InvalidValue {
                var,
                value: raw.to_string_lossy().into_owned(),
                reason: "not valid UTF-8".to_string(),
            })?;
            if value.trim().is_empty() {
                Ok(None)
            } else {
                Ok(Some(value))
            }
        }
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "expected a boolean (1/0, true/false, yes/no, on/off)".to_string(),
        }),
    }
}
