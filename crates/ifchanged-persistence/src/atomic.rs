//! Atomic state file replacement.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{Operation, PersistenceError, Result};

/// Writes data to a file atomically.
///
/// The data goes to a temporary file in the target's directory, which is
/// synced and then renamed over the target. Readers see either the old or
/// the new content, never a mix. The target's directory must already exist.
///
/// # Errors
/// Any failure is reported as a [`Operation::Write`] error on `path`.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let write_err = |source| PersistenceError::from_io(Operation::Write, path, source);

    // Same directory, so the rename stays on one filesystem
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    temp_file.write_all(data).map_err(write_err)?;
    temp_file.flush().map_err(write_err)?;
    temp_file.as_file().sync_all().map_err(write_err)?;

    temp_file.persist(path).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), bytes = data.len(), "Atomically replaced state file");
    Ok(())
}
