//! Logging infrastructure for the bunchee CLI.
//!
//! Two channels exist side by side:
//!
//! - **Diagnostics** go through `tracing`. [`init_logger`] installs the
//!   subscriber once in `main`; library code only emits events.
//! - **User-facing output** (help, version, timings, lint findings) goes
//!   through the [`Logger`] trait. Components receive a `&dyn Logger` instead
//!   of printing directly, so tests can swap in a [`MemoryLogger`].
//!
//! # Example
//!
//! ```rust,no_run
//! use bunchee_cli::logger::{init_logger, Logger, TerminalLogger};
//!
//! init_logger(false);
//! TerminalLogger.info("Starting build");
//! ```

use parking_lot::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ui;

/// Environment variable that raises the default filter to debug.
pub const DEBUG_ENV: &str = "BUNCHEE_DEBUG";

/// Initialize the tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `RUST_LOG` environment variable
/// 2. `BUNCHEE_DEBUG` set: debug level for bunchee crates
/// 3. Default: warnings only, so user-facing output stays clean
pub fn init_logger(no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if std::env::var_os(DEBUG_ENV).is_some() {
            EnvFilter::new("bunchee=debug,bunchee_cli=debug")
        } else {
            EnvFilter::new("bunchee=warn,bunchee_cli=warn")
        }
    });

    let fmt_layer = fmt::layer()
        .with_target(false) // Don't show the module path (keeps output clean)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    // A second initialisation (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Sink for user-facing output.
pub trait Logger: Send + Sync {
    /// Plain output on stdout (help text, version, lint findings).
    fn log(&self, message: &str);

    /// Informational status line.
    fn info(&self, message: &str);

    /// Non-fatal problem.
    fn warn(&self, message: &str);

    /// Fatal problem about to end the process.
    fn error(&self, message: &str);
}

/// Logger writing to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalLogger;

impl Logger for TerminalLogger {
    fn log(&self, message: &str) {
        println!("{}", message);
    }

    fn info(&self, message: &str) {
        ui::success(message);
    }

    fn warn(&self, message: &str) {
        ui::warning(message);
    }

    fn error(&self, message: &str) {
        ui::error(message);
    }
}

/// Severity of a recorded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Log,
    Info,
    Warn,
    Error,
}

/// Logger that records every line in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines, oldest first.
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().clone()
    }

    /// Recorded messages at `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Whether any recorded line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|(_, m)| m.contains(needle))
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.lines.lock().push((level, message.to_string()));
    }
}

impl Logger for MemoryLogger {
    fn log(&self, message: &str) {
        self.push(LogLevel::Log, message);
    }

    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}
