//! State path resolution for if_changed.
//!
//! Each key maps to exactly one state file. Two storage tiers exist:
//!
//! ```text
//! state (durable):  $HOME/.local/state/if_changed/if_changed_<key>
//! tmp (volatile):   /tmp/if_changed_<key>
//! ```
//!
//! The tier is chosen by configuration (see [`crate::settings`]). A missing
//! home directory is an error for the durable tier; it never degrades to the
//! volatile tier.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::key::Key;
use crate::PROGRAM_NAME;

/// Environment variable holding the user's home directory.
pub const HOME_ENV: &str = "HOME";

/// Root of the volatile tier.
const VOLATILE_ROOT: &str = "/tmp";

// Durable tier layout under the home directory
const LOCAL_SUBDIR: &str = ".local";
const STATE_SUBDIR: &str = "state";

/// Where state files are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageTier {
    /// Per-user state directory; survives reboots.
    #[default]
    Durable,
    /// Shared temporary directory; may be cleared by the OS.
    Volatile,
}

impl StorageTier {
    /// Returns the configuration name of the tier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            StorageTier::Durable => "state",
            StorageTier::Volatile => "tmp",
        }
    }
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StorageTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "state" | "durable" => Ok(StorageTier::Durable),
            "tmp" | "volatile" => Ok(StorageTier::Volatile),
            other => Err(format!("unknown storage tier '{}' (expected 'state' or 'tmp')", other)),
        }
    }
}

/// Errors raised while locating a state file.
#[derive(Error, Debug)]
pub enum LocateError {
    #[error("HOME environment variable is not set")]
    MissingHome,

    #[error("failed to create state directory {path}: {source}")]
    StateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Derives state file paths from keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLocator {
    home: Option<PathBuf>,
}

impl StateLocator {
    /// Creates a locator with an explicit home directory.
    ///
    /// An empty path is treated the same as no home directory.
    pub fn new(home: Option<PathBuf>) -> Self {
        Self {
            home: home.filter(|h| !h.as_os_str().is_empty()),
        }
    }

    /// Creates a locator using `$HOME`.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os(HOME_ENV).map(PathBuf::from))
    }

    /// Returns the durable state directory (`$HOME/.local/state/if_changed`).
    pub fn state_dir(&self) -> Result<PathBuf, LocateError> {
        let home = self.home.as_ref().ok_or(LocateError::MissingHome)?;
        Ok(home.join(LOCAL_SUBDIR).join(STATE_SUBDIR).join(PROGRAM_NAME))
    }

    /// Computes the state file path for `key` without touching the filesystem.
    pub fn path_for(&self, key: &Key, tier: StorageTier) -> Result<PathBuf, LocateError> {
        let file_name = state_file_name(key);
        match tier {
            StorageTier::Durable => Ok(self.state_dir()?.join(file_name)),
            StorageTier::Volatile => Ok(PathBuf::from(VOLATILE_ROOT).join(file_name)),
        }
    }

    /// Computes the state file path for `key` and makes sure its directory exists.
    ///
    /// Only the program directory itself is created; its parent
    /// (`$HOME/.local/state`) must already exist.
    pub fn resolve(&self, key: &Key, tier: StorageTier) -> Result<PathBuf, LocateError> {
        let path = self.path_for(key, tier)?;
        if tier == StorageTier::Durable {
            ensure_state_dir(&self.state_dir()?)?;
        }
        debug!(key = %key, tier = %tier, path = %path.display(), "Resolved state path");
        Ok(path)
    }
}

/// File name of the state file for `key` (`if_changed_<key>`).
fn state_file_name(key: &Key) -> String {
    format!("{}_{}", PROGRAM_NAME, key)
}

fn ensure_state_dir(dir: &Path) -> Result<(), LocateError> {
    match fs::create_dir(dir) {
        Ok(()) => {
            debug!(dir = %dir.display(), "Created state directory");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(LocateError::StateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn key(raw: &str) -> Key {
        Key::parse(raw).unwrap()
    }

    /// Home directory with `.local/state` already present.
    fn prepared_home() -> tempfile::TempDir {
        let home = tempdir().unwrap();
        fs::create_dir_all(home.path().join(".local/state")).unwrap();
        home
    }

    #[test]
    fn test_volatile_path_format() {
        let locator = StateLocator::new(None);
        let path = locator.path_for(&key("mykey"), StorageTier::Volatile).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/if_changed_mykey"));
    }

    #[test]
    fn test_durable_path_format() {
        let locator = StateLocator::new(Some(PathBuf::from("/home/user")));
        let path = locator.path_for(&key("some_key"), StorageTier::Durable).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/state/if_changed/if_changed_some_key")
        );
    }

    #[test]
    fn test_path_derivation_is_deterministic() {
        let locator = StateLocator::new(Some(PathBuf::from("/home/user")));
        for tier in [StorageTier::Durable, StorageTier::Volatile] {
            let first = locator.path_for(&key("build-1"), tier).unwrap();
            let second = locator.path_for(&key("build-1"), tier).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_durable_without_home_is_error() {
        let locator = StateLocator::new(None);
        let result = locator.path_for(&key("k"), StorageTier::Durable);
        assert!(matches!(result, Err(LocateError::MissingHome)));

        let result = locator.resolve(&key("k"), StorageTier::Durable);
        assert!(matches!(result, Err(LocateError::MissingHome)));
    }

    #[test]
    fn test_empty_home_counts_as_missing() {
        let locator = StateLocator::new(Some(PathBuf::new()));
        assert!(matches!(
            locator.state_dir(),
            Err(LocateError::MissingHome)
        ));
    }

    #[test]
    fn test_volatile_does_not_need_home() {
        let locator = StateLocator::new(None);
        assert!(locator.resolve(&key("k"), StorageTier::Volatile).is_ok());
    }

    #[test]
    fn test_resolve_creates_state_dir() {
        let home = prepared_home();
        let locator = StateLocator::new(Some(home.path().to_path_buf()));

        let path = locator.resolve(&key("abc"), StorageTier::Durable).unwrap();

        let dir = home.path().join(".local/state/if_changed");
        assert!(dir.is_dir());
        assert_eq!(path, dir.join("if_changed_abc"));
        assert!(!path.exists());
    }

    #[test]
    fn test_resolve_accepts_existing_state_dir() {
        let home = prepared_home();
        let locator = StateLocator::new(Some(home.path().to_path_buf()));

        let first = locator.resolve(&key("abc"), StorageTier::Durable).unwrap();
        let second = locator.resolve(&key("abc"), StorageTier::Durable).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_does_not_create_parents() {
        let home = tempdir().unwrap();
        let locator = StateLocator::new(Some(home.path().to_path_buf()));

        let result = locator.resolve(&key("abc"), StorageTier::Durable);
        assert!(matches!(result, Err(LocateError::StateDir { .. })));
        assert!(!home.path().join(".local").exists());
    }

    #[test]
    fn test_resolve_rejects_file_in_place_of_dir() {
        let home = prepared_home();
        fs::write(home.path().join(".local/state/if_changed"), "not a dir").unwrap();
        let locator = StateLocator::new(Some(home.path().to_path_buf()));

        let result = locator.resolve(&key("abc"), StorageTier::Durable);
        assert!(matches!(result, Err(LocateError::StateDir { .. })));
    }

    #[test]
    fn test_storage_tier_parse() {
        assert_eq!("state".parse::<StorageTier>(), Ok(StorageTier::Durable));
        assert_eq!("durable".parse::<StorageTier>(), Ok(StorageTier::Durable));
        assert_eq!("TMP".parse::<StorageTier>(), Ok(StorageTier::Volatile));
        assert_eq!(" volatile ".parse::<StorageTier>(), Ok(StorageTier::Volatile));
        assert!("disk".parse::<StorageTier>().is_err());
    }

    #[test]
    fn test_storage_tier_display_roundtrip() {
        for tier in [StorageTier::Durable, StorageTier::Volatile] {
            assert_eq!(tier.to_string().parse::<StorageTier>(), Ok(tier));
        }
    }

    #[test]
    #[serial]
    fn test_from_env_reads_home() {
        temp_env::with_var(HOME_ENV, Some("/home/someone"), || {
            let locator = StateLocator::from_env();
            assert_eq!(
                locator.state_dir().unwrap(),
                PathBuf::from("/home/someone/.local/state/if_changed")
            );
        });
    }

    #[test]
    #[serial]
    fn test_from_env_without_home() {
        temp_env::with_var_unset(HOME_ENV, || {
            let locator = StateLocator::from_env();
            assert!(matches!(
                locator.state_dir(),
                Err(LocateError::MissingHome)
            ));
        });
    }
}
