//! The read-compare-write pipeline behind one invocation.

use std::io::Read;

use ifchanged_core::{ChangeDetector, ChangeVerdict, Key, Settings, StateLocator};
use ifchanged_persistence::StateStore;
use tracing::info;

use crate::error::{Result, RunError};

/// Runs the pipeline for `key` with new content from `input`.
///
/// Steps, in order: resolve the state path, read the previous content, read
/// all of `input`, compare, write the new content. The write happens whatever
/// the verdict. Any failure stops the pipeline where it occurred.
pub fn execute<R: Read>(
    key: &Key,
    settings: &Settings,
    locator: &StateLocator,
    input: R,
) -> Result<ChangeVerdict> {
    let path = locator.resolve(key, settings.tier)?;
    let store = StateStore::new(path).with_write_mode(settings.write_mode);

    let previous = store.read()?;
    let new_content = read_input(input)?;

    let verdict = ChangeDetector::with_comparison(settings.comparison)
        .detect(previous.as_deref(), &new_content);

    store.write(&new_content)?;

    info!(
        key = %key,
        path = %store.path().display(),
        verdict = %verdict,
        "Processed input"
    );

    Ok(verdict)
}

/// Reads `input` to end-of-stream.
pub fn read_input<R: Read>(mut input: R) -> Result<Vec<u8>> {
    let mut content = Vec::new();
    input.read_to_end(&mut content).map_err(RunError::Stdin)?;
    Ok(content)
}
