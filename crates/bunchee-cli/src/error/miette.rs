//! Miette diagnostic conversion for CLI errors.

use crate::error::{BuildError, CliError};
use ::miette::Report;

/// Convert a CliError into a miette report for the top-level handler.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        // clap already renders usage-aware messages
        CliError::Parse(e) => ::miette::miette!("{}", e.to_string().trim_end()),
        _ => ::miette::miette!("{}", err),
    }
}

fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::Manifest { path, source } => ::miette::miette!(
            help = "Fix the JSON syntax of the manifest",
            "Invalid package.json at {}: {}",
            path.display(),
            source
        ),
        BuildError::Bundler(message) => ::miette::miette!("Build failed: {}", message),
        _ => ::miette::miette!("{}", err),
    }
}
