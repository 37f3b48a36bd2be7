//! Entry point resolution.

use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// Extensions tried, in order, when discovering `src/index.*`.
pub const ENTRY_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Find `src/index.<ext>` under `cwd`.
pub fn discover_entry(cwd: &Path) -> Option<PathBuf> {
    let src = cwd.join("src");
    ENTRY_EXTENSIONS
        .iter()
        .map(|ext| src.join(format!("index.{}", ext)))
        .find(|candidate| candidate.is_file())
}

/// Turn the requested entry into an existing file.
///
/// An empty path asks for discovery under `cwd`. Anything else must already
/// exist as a file.
pub fn resolve_entry(entry: &Path, cwd: &Path) -> Result<PathBuf, BuildError> {
    if entry.as_os_str().is_empty() {
        return discover_entry(cwd).ok_or_else(|| BuildError::NoEntryDiscovered(cwd.to_path_buf()));
    }

    if entry.is_file() {
        Ok(entry.to_path_buf())
    } else {
        Err(BuildError::SourceNotFound(entry.to_path_buf()))
    }
}
