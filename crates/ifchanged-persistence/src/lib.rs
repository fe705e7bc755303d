//! Persistence layer for if_changed.
//!
//! One state file per key holds the last payload seen for that key. The
//! store reads it (a missing file means "no previous content") and replaces
//! it wholesale, translating OS failures into [`PersistenceError`].
//!
//! # Example
//!
//! ```no_run
//! use ifchanged_persistence::StateStore;
//!
//! let store = StateStore::new("/tmp/if_changed_example");
//! let previous = store.read().unwrap();
//! store.write(b"new content").unwrap();
//! ```

pub mod atomic;
pub mod error;
pub mod state_store;

pub use error::{Operation, PersistenceError, Result};
pub use state_store::StateStore;
