//! bunchee CLI entry point.
//!
//! Parses arguments, installs logging, runs one invocation and maps the
//! result onto the process exit status.

use bunchee_cli::commands::{self, Outcome};
use bunchee_cli::engine::RolldownEngine;
use bunchee_cli::error::{self, CliError};
use bunchee_cli::logger::{self, Logger, TerminalLogger};
use bunchee_cli::package::ManifestLinter;
use bunchee_cli::{cli, ui};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    logger::init_logger(!ui::should_use_color());
    let logger: Arc<dyn Logger> = Arc::new(TerminalLogger);

    let options = match cli::parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            commands::print_help(logger.as_ref());
            return report(err);
        }
    };

    let process_cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => return report(err.into()),
    };

    let engine = RolldownEngine::new(logger.clone());
    let result = commands::build_execute(
        &options,
        &process_cwd,
        &engine,
        || Box::new(ManifestLinter::new()),
        logger.as_ref(),
    )
    .await;

    match result {
        Ok(Outcome::Watching) => {
            if let Err(err) = tokio::signal::ctrl_c().await {
                return report(err.into());
            }
            ExitCode::SUCCESS
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => report(err),
    }
}

/// Print `err` as a diagnostic and pick the exit status for it.
fn report(err: CliError) -> ExitCode {
    let code = err.exit_code();
    eprintln!("{:?}", error::cli_error_to_miette(err));
    ExitCode::from(code)
}
