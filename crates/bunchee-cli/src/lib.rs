//! bunchee - zero-config bundler for JavaScript and TypeScript packages.
//!
//! This crate holds the command-line layer: it turns raw arguments into a
//! resolved build configuration, drives a one-shot build or a watch loop
//! through a [`engine::BuildEngine`], reports timing, and lints the package
//! manifest after a successful build.
//!
//! # Architecture
//!
//! - [`cli`] - Permissive argument parsing into [`cli::ParsedOptions`]
//! - [`config`] - Defaulting into an execution-ready [`config::BuildConfig`]
//! - [`commands`] - Orchestration, help and package validation
//! - [`engine`] - The build engine trait and its rolldown implementation
//! - [`package`] - `package.json` reading and linting
//! - [`error`] - Error types and exit statuses
//! - [`logger`] - Tracing setup and the injected user-facing [`logger::Logger`]
//! - [`ui`] - Terminal formatting helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use bunchee_cli::{cli, commands, engine::RolldownEngine, logger, package::ManifestLinter};
//! use std::sync::Arc;
//!
//! # async fn run() -> bunchee_cli::Result<()> {
//! let logger: Arc<dyn logger::Logger> = Arc::new(logger::TerminalLogger);
//! let options = cli::parse_args(["src/index.ts", "--format", "cjs"])?;
//! let engine = RolldownEngine::new(logger.clone());
//! let cwd = std::env::current_dir()?;
//!
//! commands::build_execute(
//!     &options,
//!     &cwd,
//!     &engine,
//!     || Box::new(ManifestLinter::new()),
//!     logger.as_ref(),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod logger;
pub mod package;
pub mod ui;

// Re-export commonly used types
pub use error::{BuildError, CliError, Result};
