//! Build orchestration.
//!
//! Sequences one invocation: version and help short-circuit, otherwise the
//! configuration is resolved, the engine runs, and the result is reported.
//! A one-shot build finishes with a package lint pass; watch mode returns as
//! soon as the engine is watching.

use std::path::Path;
use std::time::{Duration, Instant};

use super::help::{print_help, print_version};
use super::lint::lint_package;
use crate::cli::ParsedOptions;
use crate::config::BuildConfig;
use crate::engine::{BuildEngine, BuildOutput};
use crate::error::{CliError, Result};
use crate::logger::Logger;
use crate::package::PackageLinter;
use crate::ui;

/// What a successful invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Printed the version
    Version,
    /// Printed the usage block
    Help,
    /// Finished a one-shot build
    Built {
        output: BuildOutput,
        duration: Duration,
        lint_findings: usize,
    },
    /// The engine keeps rebuilding until the process is stopped
    Watching,
}

/// Run one invocation.
///
/// `process_cwd` anchors a relative `--cwd`. `make_linter` is only called for
/// a successful one-shot build in a directory with a `package.json`.
///
/// # Errors
///
/// A missing entry prints the usage block and returns the build error, which
/// maps to a dedicated exit status. Every other engine error is returned as
/// is.
pub async fn execute<F>(
    options: &ParsedOptions,
    process_cwd: &Path,
    engine: &dyn BuildEngine,
    make_linter: F,
    logger: &dyn Logger,
) -> Result<Outcome>
where
    F: FnOnce() -> Box<dyn PackageLinter>,
{
    if options.version {
        print_version(logger);
        return Ok(Outcome::Version);
    }
    if options.help {
        print_help(logger);
        return Ok(Outcome::Help);
    }

    let config = BuildConfig::resolve(options, process_cwd);
    let entry = config.resolve_entry(options.source());
    tracing::debug!(?config, entry = %entry.display(), "Resolved build configuration");

    let started = Instant::now();
    let result = {
        let spinner = (!config.watch).then(|| ui::Spinner::new("Building..."));
        let result = engine.build(&entry, &config).await;
        if let Some(spinner) = spinner {
            spinner.clear();
        }
        result
    };

    let output = match result {
        Ok(output) => output,
        Err(err) if err.is_source_not_found() => {
            print_help(logger);
            return Err(CliError::Build(err));
        }
        Err(err) => return Err(err.into()),
    };
    let duration = started.elapsed();

    if config.watch {
        logger.log(&format!("Watching assets in {}...", config.cwd.display()));
        return Ok(Outcome::Watching);
    }

    for file in &output.files {
        let shown = file.path.strip_prefix(&config.cwd).unwrap_or(&file.path);
        logger.log(&format!("  {} {}", shown.display(), ui::format_size(file.size)));
    }
    logger.info(&format!("Finished in {}", ui::format_duration(duration)));

    let lint_findings = lint_package(&config.cwd, make_linter, logger).await;

    Ok(Outcome::Built {
        output,
        duration,
        lint_findings,
    })
}
