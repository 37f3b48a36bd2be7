//! Build engines.
//!
//! The orchestrator only knows the [`BuildEngine`] trait. [`RolldownEngine`]
//! is the default implementation; tests substitute their own.

pub mod entry;
pub mod rolldown;
pub mod watcher;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::BuildError;

pub use self::entry::{discover_entry, resolve_entry};
pub use self::rolldown::RolldownEngine;

/// A file written by a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Files written by a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    pub files: Vec<OutputFile>,
}

impl BuildOutput {
    /// Whether `path` is one of the files this build wrote.
    pub fn wrote(&self, path: &Path) -> bool {
        self.files.iter().any(|file| file.path == path)
    }
}

/// Bundles an entry according to a resolved configuration.
///
/// An empty `entry` asks the engine to discover one under `config.cwd`.
/// When `config.watch` is set the engine keeps rebuilding in the background
/// after the initial build returns.
#[async_trait]
pub trait BuildEngine: Send + Sync {
    async fn build(&self, entry: &Path, config: &BuildConfig) -> Result<BuildOutput, BuildError>;
}
