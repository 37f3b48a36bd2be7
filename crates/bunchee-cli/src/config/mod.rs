//! Build configuration resolved from parsed command-line options.
//!
//! [`BuildConfig::resolve`] is the only place defaults are applied. Format,
//! target and runtime stay optional because they are purely user-controlled;
//! the engine falls back to their defaults.

mod tests;

use path_clean::PathClean;
use std::path::{Path, PathBuf};

use crate::cli::{ExternalArg, Format, ParsedOptions, Runtime};

/// Environment variable inlined when `--env` is not given.
pub const DEFAULT_ENV: &str = "NODE_ENV";

/// Language target assumed when `--target` is not given.
pub const DEFAULT_TARGET: &str = "es2016";

/// Which imports stay out of the bundle.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum External {
    /// Every dependency declared in package.json stays external
    All,
    /// Only these specifiers stay external; empty means bundle everything
    Only(Vec<String>),
}

impl Default for External {
    fn default() -> Self {
        External::Only(Vec::new())
    }
}

/// Fully resolved, execution-ready build configuration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BuildConfig {
    /// Absolute working directory
    pub cwd: PathBuf,
    /// Absolute output file, resolved against `cwd`
    pub file: Option<PathBuf>,
    pub format: Option<Format>,
    pub target: Option<String>,
    pub runtime: Option<Runtime>,
    pub external: External,
    /// Names of environment variables to inline
    pub env: Vec<String>,
    pub watch: bool,
    pub minify: bool,
    pub sourcemap: bool,
    pub dts: bool,
}

impl BuildConfig {
    /// Resolve parsed options against the process working directory.
    ///
    /// A relative `--cwd` is resolved against `process_cwd`; without `--cwd`
    /// the process directory itself is the working directory.
    pub fn resolve(options: &ParsedOptions, process_cwd: &Path) -> Self {
        let cwd = match &options.cwd {
            Some(dir) => resolve_path(dir, process_cwd),
            None => process_cwd.to_path_buf().clean(),
        };

        let file = options.file.as_deref().map(|file| resolve_path(file, &cwd));

        let external = match &options.external {
            ExternalArg::All => External::All,
            ExternalArg::List(list) => External::Only(split_list(list)),
            ExternalArg::Unset => External::default(),
        };

        let env = match &options.env {
            Some(list) => split_list(list),
            None => vec![DEFAULT_ENV.to_string()],
        };

        Self {
            cwd,
            file,
            format: options.format,
            target: options.target.clone(),
            runtime: options.runtime,
            external,
            env,
            watch: options.watch,
            minify: options.minify,
            sourcemap: options.sourcemap.resolve(true),
            dts: options.dts,
        }
    }

    /// The language target, falling back to [`DEFAULT_TARGET`].
    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(DEFAULT_TARGET)
    }

    /// Resolve the entry source against the working directory.
    ///
    /// Returns an empty path when no source was given, which asks the engine
    /// to discover entries on its own.
    pub fn resolve_entry(&self, source: Option<&str>) -> PathBuf {
        match source {
            Some(source) if !source.is_empty() => resolve_path(Path::new(source), &self.cwd),
            _ => PathBuf::new(),
        }
    }
}

/// Resolve a path relative to a base directory and normalise `.`/`..`.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        base.join(path).clean()
    }
}

/// Split a comma-separated list, dropping empty segments.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
