//! Error types and exit statuses.
//!
//! Two layers, each handled in exactly one place:
//!
//! - [`BuildError`] is what engines, the manifest reader and the linter raise.
//!   The orchestrator matches on it to tell a missing entry (print usage) from
//!   everything else (propagate).
//! - [`CliError`] is what an invocation returns. `main` renders it through
//!   [`cli_error_to_miette`] and exits with [`CliError::exit_code`].

mod miette;

use crate::cli::Format;
use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Exit status for malformed command-line input.
pub const EXIT_USAGE: u8 = 2;

/// Exit status when the entry source cannot be found (`EX_NOINPUT`).
pub const EXIT_NO_INPUT: u8 = 66;

/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Failure of one CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// The argument vector could not be parsed
    #[error("Invalid arguments: {0}")]
    Parse(#[from] clap::Error),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Process-level I/O, such as reading the current directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Parse(_) => EXIT_USAGE,
            CliError::Build(err) if err.is_source_not_found() => EXIT_NO_INPUT,
            CliError::Build(_) | CliError::Io(_) => EXIT_FAILURE,
        }
    }
}

/// Errors raised while building or inspecting a package.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The entry source given on the command line does not exist
    #[error("Entry point not found: {}\n\nHint: Pass an existing file as the first argument", .0.display())]
    SourceNotFound(PathBuf),

    /// No entry was given and none could be discovered in the project
    #[error("No entry point found in {}\n\nHint: Create src/index.ts (or .js) or pass an entry file explicitly", .0.display())]
    NoEntryDiscovered(PathBuf),

    #[error("Output format '{0}' is not supported\n\nHint: Use one of esm, cjs, iife or umd")]
    UnsupportedFormat(Format),

    #[error("Invalid package.json at {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}\n\nHint: Check output directory permissions", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Diagnostics reported by the bundler
    #[error("{0}")]
    Bundler(String),
}

impl BuildError {
    /// Whether this error means there is no entry to build.
    pub fn is_source_not_found(&self) -> bool {
        matches!(
            self,
            BuildError::SourceNotFound(_) | BuildError::NoEntryDiscovered(_)
        )
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
