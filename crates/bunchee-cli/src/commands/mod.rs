//! Command implementations for the bunchee CLI.
//!
//! - [`build`] - Orchestrates one invocation from parsed options to outcome
//! - [`help`] - Usage text and version string
//! - [`lint`] - Package validation after a one-shot build

pub mod build;
pub mod help;
pub mod lint;

pub use build::{execute as build_execute, Outcome};
pub use help::{help_text, print_help, print_version, version};
pub use lint::lint_package;
