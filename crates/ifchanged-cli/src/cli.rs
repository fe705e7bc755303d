//! Command-line interface definition using clap.
//!
//! The surface is a single positional key and nothing else. Help and version
//! flags are disabled and clap is handed an end-of-options marker ahead of
//! the user's arguments, so every argument is captured verbatim. Keys such
//! as `-`, `-x` and `--` are counted and validated like any other.

use std::ffi::OsString;

use clap::Parser;
use ifchanged_core::settings::{ATOMIC_WRITE_ENV, IGNORE_TRAILING_NEWLINE_ENV, STORAGE_ENV};
use ifchanged_core::{Key, PROGRAM_NAME};

use crate::error::UsageError;

/// if_changed - run the next command only when piped content changed
#[derive(Parser, Debug)]
#[command(name = "if_changed")]
#[command(about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Key identifying the content stream
    #[arg(value_name = "KEY", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parses the process arguments, mapping clap failures to usage errors.
    pub fn from_env() -> Result<Self, UsageError> {
        Self::from_args(std::env::args_os().skip(1))
    }

    /// Parses `args` (without the program name) as given on the command line.
    ///
    /// A leading `--` is inserted before clap sees the arguments, so a `--`
    /// typed by the user is a value rather than an end-of-options marker.
    pub fn from_args<I, T>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv = [OsString::from(PROGRAM_NAME), OsString::from("--")]
            .into_iter()
            .chain(args.into_iter().map(Into::into));
        Self::try_parse_from(argv).map_err(|e| UsageError::Parse(e.to_string()))
    }

    /// Returns the validated key.
    pub fn key(&self) -> Result<Key, UsageError> {
        parse_key(&self.args)
    }
}

/// Checks that exactly one argument was given and that it is a valid key.
pub fn parse_key(args: &[String]) -> Result<Key, UsageError> {
    match args {
        [raw] => Key::parse(raw).map_err(UsageError::InvalidKey),
        _ => Err(UsageError::ArgumentCount(args.len())),
    }
}

/// Usage text printed after a usage error.
pub fn usage() -> String {
    format!(
        "Usage:\n\
         echo \"new content\" | {name} <key> && next_program\n\
         (`next_program` will be executed when the content changes)\n\
         \n\
         Environment:\n\
         \x20 {storage}=state|tmp  where state is kept (default: state, under ~/.local/state)\n\
         \x20 {newline}=1  ignore trailing newlines when comparing\n\
         \x20 {atomic}=1  replace the state file atomically",
        name = PROGRAM_NAME,
        storage = STORAGE_ENV,
        newline = IGNORE_TRAILING_NEWLINE_ENV,
        atomic = ATOMIC_WRITE_ENV,
    )
}
