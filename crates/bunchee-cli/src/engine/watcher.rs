//! Recursive file watcher driving rebuilds in watch mode.
//!
//! Watches the project directory and forwards relevant changes through a
//! channel, skipping dependencies, build output and hidden files.

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::BuildOutput;
use crate::error::BuildError;

/// Directories never watched, relative to the root.
pub const DEFAULT_IGNORED: &[&str] = &["node_modules", "dist"];

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// Watches a directory tree until dropped.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Start watching `root`.
    ///
    /// `ignored` holds paths relative to `root`; a change at or below one of
    /// them is dropped. Repeated events for the same file within `debounce`
    /// are collapsed.
    pub fn new(
        root: PathBuf,
        ignored: Vec<PathBuf>,
        debounce: Duration,
    ) -> Result<(Self, mpsc::Receiver<FileChange>), BuildError> {
        let (tx, rx) = mpsc::channel(100);

        let mut last_event: Option<(PathBuf, Instant)> = None;
        let callback_root = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!("Watch error: {}", err);
                    return;
                }
            };

            for path in &event.paths {
                if should_ignore(path, &callback_root, &ignored) {
                    continue;
                }

                let now = Instant::now();
                if let Some((last_path, last_time)) = &last_event {
                    if last_path == path && now.duration_since(*last_time) < debounce {
                        continue;
                    }
                }
                last_event = Some((path.clone(), now));

                let change = match event.kind {
                    notify::EventKind::Create(_) => FileChange::Created(path.clone()),
                    notify::EventKind::Modify(_) => FileChange::Modified(path.clone()),
                    notify::EventKind::Remove(_) => FileChange::Removed(path.clone()),
                    _ => continue,
                };

                // Receiver gone means watch mode is over
                let _ = tx.blocking_send(change);
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;
        tracing::debug!(root = %root.display(), "File watcher started");

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Whether a change at `path` should be dropped.
pub(crate) fn should_ignore(path: &Path, root: &Path, ignored: &[PathBuf]) -> bool {
    let rel_path = match path.strip_prefix(root) {
        Ok(p) => p,
        Err(_) => return true,
    };

    if ignored.iter().any(|dir| rel_path.starts_with(dir)) {
        return true;
    }

    // Hidden files and directories, .git included
    rel_path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| name.starts_with('.') && name != "." && name != "..")
    })
}

/// Directories the watcher skips, relative to the root.
///
/// Files written by `--output` can sit anywhere, even next to sources, so
/// they are filtered per event with [`needs_rebuild`] instead.
pub fn ignored_paths() -> Vec<PathBuf> {
    DEFAULT_IGNORED.iter().map(PathBuf::from).collect()
}

/// Whether a burst of changes touches anything besides the last build's own
/// output.
pub fn needs_rebuild<'a>(
    changes: impl IntoIterator<Item = &'a FileChange>,
    last_output: &BuildOutput,
) -> bool {
    changes
        .into_iter()
        .any(|change| !last_output.wrote(change.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OutputFile;

    fn ignored(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_should_ignore_node_modules() {
        let root = PathBuf::from("/project");
        let patterns = ignored(&["node_modules"]);

        let path = PathBuf::from("/project/node_modules/package/index.js");
        assert!(should_ignore(&path, &root, &patterns));

        let path = PathBuf::from("/project/src/index.js");
        assert!(!should_ignore(&path, &root, &patterns));
    }

    #[test]
    fn test_should_ignore_is_component_based() {
        let root = PathBuf::from("/project");
        let patterns = ignored(&["dist"]);

        assert!(should_ignore(Path::new("/project/dist/index.js"), &root, &patterns));
        assert!(!should_ignore(Path::new("/project/distance.ts"), &root, &patterns));
    }

    #[test]
    fn test_should_ignore_hidden_files() {
        let root = PathBuf::from("/project");

        assert!(should_ignore(Path::new("/project/.git/config"), &root, &[]));
        assert!(should_ignore(Path::new("/project/.env"), &root, &[]));
        assert!(should_ignore(Path::new("/project/src/.hidden/file.js"), &root, &[]));
    }

    #[test]
    fn test_should_ignore_outside_root() {
        let root = PathBuf::from("/project");
        assert!(should_ignore(Path::new("/other/file.js"), &root, &[]));
    }

    fn written(paths: &[&str]) -> BuildOutput {
        BuildOutput {
            files: paths
                .iter()
                .map(|path| OutputFile {
                    path: PathBuf::from(path),
                    size: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn test_output_inside_sources_keeps_sources_watched() {
        let root = Path::new("/project");
        let output = written(&["/project/src/bundle.js", "/project/src/bundle.js.map"]);
        let source = FileChange::Modified(PathBuf::from("/project/src/index.ts"));

        assert!(!should_ignore(source.path(), root, &ignored_paths()));
        assert!(needs_rebuild([&source], &output));

        let own = FileChange::Modified(PathBuf::from("/project/src/bundle.js"));
        assert!(!needs_rebuild([&own], &output));
    }

    #[test]
    fn test_extra_chunks_in_root_do_not_retrigger() {
        let output = written(&[
            "/project/bundle.js",
            "/project/bundle.js.map",
            "/project/chunk-a1b2.js",
        ]);
        let burst = [
            FileChange::Modified(PathBuf::from("/project/bundle.js")),
            FileChange::Created(PathBuf::from("/project/chunk-a1b2.js")),
            FileChange::Modified(PathBuf::from("/project/bundle.js.map")),
        ];
        assert!(!needs_rebuild(&burst, &output));

        let mixed = [
            FileChange::Modified(PathBuf::from("/project/chunk-a1b2.js")),
            FileChange::Modified(PathBuf::from("/project/src/util.ts")),
        ];
        assert!(needs_rebuild(&mixed, &output));
    }

    #[test]
    fn test_default_ignores() {
        let root = Path::new("/project");
        let paths = ignored_paths();
        assert!(should_ignore(Path::new("/project/dist/index.js"), root, &paths));
        assert!(should_ignore(Path::new("/project/node_modules/a/b.js"), root, &paths));
        assert!(!should_ignore(Path::new("/project/lib/out.js"), root, &paths));
    }

    #[test]
    fn test_file_change_path() {
        let path = PathBuf::from("/project/src/index.js");

        assert_eq!(FileChange::Modified(path.clone()).path(), path.as_path());
        assert_eq!(FileChange::Created(path.clone()).path(), path.as_path());
        assert_eq!(FileChange::Removed(path.clone()).path(), path.as_path());
    }

    #[tokio::test]
    async fn test_watcher_starts_on_existing_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let (watcher, _rx) = FileWatcher::new(
            temp.path().to_path_buf(),
            ignored_paths(),
            Duration::from_millis(50),
        )
        .unwrap();
        assert_eq!(watcher.root(), temp.path());
    }
}
