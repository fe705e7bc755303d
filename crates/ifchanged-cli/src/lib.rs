//! if_changed CLI library.
//!
//! Argument handling, the invocation pipeline and the error types the binary
//! maps to exit codes.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{parse_key, usage, Cli};
pub use commands::{execute, read_input};
pub use error::{Result, RunError, UsageError};
