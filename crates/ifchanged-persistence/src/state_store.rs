//! State store for the last content seen for a key.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use ifchanged_core::WriteMode;
use tracing::debug;

use crate::atomic::atomic_write;
use crate::error::{Operation, PersistenceError, Result};

/// Reads and replaces one state file.
///
/// The file holds the exact bytes of the most recent payload for its key,
/// with no header or metadata. Every write replaces the whole file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    write_mode: WriteMode,
}

impl StateStore {
    /// Creates a store for the state file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_mode: WriteMode::default(),
        }
    }

    /// Sets how writes replace the file.
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Loads the persisted content, returning None if nothing was stored yet.
    pub fn read(&self) -> Result<Option<Vec<u8>>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No previous content");
                return Ok(None);
            }
            Err(e) => return Err(PersistenceError::from_io(Operation::Read, &self.path, e)),
        };

        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| PersistenceError::from_io(Operation::Read, &self.path, e))?;

        debug!(path = %self.path.display(), bytes = content.len(), "Read previous content");
        Ok(Some(content))
    }

    /// Replaces the persisted content with `content`.
    pub fn write(&self, content: &[u8]) -> Result<()> {
        match self.write_mode {
            WriteMode::Truncate => self.write_in_place(content),
            WriteMode::Atomic => atomic_write(&self.path, content),
        }
    }

    fn write_in_place(&self, content: &[u8]) -> Result<()> {
        let write_err = |e| PersistenceError::from_io(Operation::Write, &self.path, e);

        let mut file = File::create(&self.path).map_err(write_err)?;
        file.write_all(content).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        debug!(path = %self.path.display(), bytes = content.len(), "Wrote content");
        Ok(())
    }
}
