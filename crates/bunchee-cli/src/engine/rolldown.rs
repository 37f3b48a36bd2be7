//! Build engine backed by rolldown.

use async_trait::async_trait;
use rolldown::{
    BundlerBuilder, BundlerOptions, InputItem, IsExternal, OutputFormat, Platform,
    RawMinifyOptions, SourceMapType,
};
use rolldown_common::Output;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::fs;

use super::entry::resolve_entry;
use super::watcher::{ignored_paths, needs_rebuild, FileWatcher};
use super::{BuildEngine, BuildOutput, OutputFile};
use crate::cli::{Format, Runtime};
use crate::config::{BuildConfig, External};
use crate::error::BuildError;
use crate::logger::Logger;
use crate::package::{has_package_json, PackageManifest};
use crate::ui::format_duration;

/// Output directory used when `--output` is not given.
pub const DEFAULT_OUT_DIR: &str = "dist";

const WATCH_DEBOUNCE: Duration = Duration::from_millis(100);

/// A file produced by one bundler run, before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub filename: String,
    pub contents: Vec<u8>,
    pub is_entry: bool,
}

/// [`BuildEngine`] that bundles with rolldown and writes the result to disk.
#[derive(Clone)]
pub struct RolldownEngine {
    logger: Arc<dyn Logger>,
}

impl RolldownEngine {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// Bundle `entry` once and write the output.
    async fn bundle(&self, entry: &Path, config: &BuildConfig) -> Result<BuildOutput, BuildError> {
        let options = bundler_options(entry, config)?;

        let mut bundler = BundlerBuilder::default()
            .with_options(options)
            .build()
            .map_err(|e| BuildError::Bundler(format!("{:?}", e)))?;

        let bundle = bundler
            .generate()
            .await
            .map_err(|e| BuildError::Bundler(format!("{:?}", e)))?;

        let emitted = bundle
            .assets
            .iter()
            .map(|item| match item {
                Output::Chunk(chunk) => EmittedFile {
                    filename: chunk.filename.to_string(),
                    contents: chunk.code.as_bytes().to_vec(),
                    is_entry: chunk.is_entry,
                },
                Output::Asset(asset) => EmittedFile {
                    filename: asset.filename.to_string(),
                    contents: asset.source.as_bytes().to_vec(),
                    is_entry: false,
                },
            })
            .collect();

        write_files(plan_outputs(emitted, config)).await
    }

    /// Rebuild on every relevant change under `config.cwd`.
    ///
    /// `last_output` holds the files the initial build wrote; changes to them
    /// alone never trigger a rebuild.
    fn spawn_watch(
        &self,
        entry: PathBuf,
        config: BuildConfig,
        mut last_output: BuildOutput,
    ) -> Result<(), BuildError> {
        let (watcher, mut changes) =
            FileWatcher::new(config.cwd.clone(), ignored_paths(), WATCH_DEBOUNCE)?;
        let engine = self.clone();

        tokio::spawn(async move {
            let _watcher = watcher;
            while let Some(change) = changes.recv().await {
                // Collapse a burst of events into one rebuild
                let mut burst = vec![change];
                while let Ok(next) = changes.try_recv() {
                    burst.push(next);
                }
                if !needs_rebuild(&burst, &last_output) {
                    continue;
                }
                tracing::debug!(path = %burst[0].path().display(), "Change detected");

                let started = Instant::now();
                match engine.bundle(&entry, &config).await {
                    Ok(output) => {
                        engine.logger.info(&format!(
                            "Rebuilt in {}",
                            format_duration(started.elapsed())
                        ));
                        last_output = output;
                    }
                    Err(err) => engine.logger.error(&format!("Rebuild failed: {}", err)),
                }
            }
        });

        Ok(())
    }
}

#[async_trait]
impl BuildEngine for RolldownEngine {
    async fn build(&self, entry: &Path, config: &BuildConfig) -> Result<BuildOutput, BuildError> {
        let entry = resolve_entry(entry, &config.cwd)?;
        tracing::debug!(entry = %entry.display(), target = config.target(), "Starting build");

        if config.dts {
            self.logger
                .warn("Type declarations are not emitted by this build engine; --dts is ignored");
        }

        let output = self.bundle(&entry, config).await?;

        if config.watch {
            self.spawn_watch(entry, config.clone(), output.clone())?;
        }

        Ok(output)
    }
}

/// Map a resolved configuration onto rolldown's options.
pub fn bundler_options(entry: &Path, config: &BuildConfig) -> Result<BundlerOptions, BuildError> {
    let format = match config.format.unwrap_or_default() {
        Format::Esm => OutputFormat::Esm,
        Format::Cjs => OutputFormat::Cjs,
        Format::Iife => OutputFormat::Iife,
        Format::Umd => OutputFormat::Umd,
        unsupported @ (Format::Amd | Format::System) => {
            return Err(BuildError::UnsupportedFormat(unsupported));
        }
    };

    let mut options = BundlerOptions {
        format: Some(format),
        sourcemap: config.sourcemap.then_some(SourceMapType::File),
        ..Default::default()
    };

    options.input = Some(vec![InputItem {
        name: None,
        import: entry.to_string_lossy().into_owned(),
    }]);
    options.cwd = Some(config.cwd.clone());

    options.platform = Some(match config.runtime.unwrap_or_default() {
        Runtime::Browser => Platform::Browser,
        Runtime::Nodejs => Platform::Node,
    });

    options.external = Some(IsExternal::from(external_specifiers(config)?));

    if config.minify {
        options.minify = Some(RawMinifyOptions::from(true));
    }

    let defines = env_defines(&config.env, |name| std::env::var(name).ok());
    if !defines.is_empty() {
        options.define = Some(defines.into_iter().collect());
    }

    Ok(options)
}

/// Specifiers kept out of the bundle.
fn external_specifiers(config: &BuildConfig) -> Result<Vec<String>, BuildError> {
    match &config.external {
        External::Only(list) => Ok(list.clone()),
        External::All if has_package_json(&config.cwd) => {
            Ok(PackageManifest::read(&config.cwd)?.dependency_names())
        }
        External::All => Ok(Vec::new()),
    }
}

/// `process.env.NAME` replacements for every variable `lookup` knows.
pub fn env_defines(
    names: &[String],
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<(String, String)> {
    names
        .iter()
        .filter_map(|name| {
            lookup(name).map(|value| {
                (
                    format!("process.env.{}", name),
                    serde_json::Value::String(value).to_string(),
                )
            })
        })
        .collect()
}

/// Decide where each emitted file goes.
///
/// With `--output`, the entry chunk is written to that file and its map to
/// `<file>.map`; everything else lands beside it. Otherwise files go to
/// `<cwd>/dist`.
pub fn plan_outputs(emitted: Vec<EmittedFile>, config: &BuildConfig) -> Vec<(PathBuf, Vec<u8>)> {
    let Some(file) = &config.file else {
        let out_dir = config.cwd.join(DEFAULT_OUT_DIR);
        return emitted
            .into_iter()
            .map(|item| (out_dir.join(&item.filename), item.contents))
            .collect();
    };

    let out_dir = file.parent().map(Path::to_path_buf).unwrap_or_else(|| config.cwd.clone());
    let entry_name = emitted
        .iter()
        .find(|item| item.is_entry)
        .map(|item| item.filename.clone());
    let entry_map = entry_name.as_ref().map(|name| format!("{}.map", name));
    let file_map = {
        let mut map = file.as_os_str().to_owned();
        map.push(".map");
        PathBuf::from(map)
    };

    emitted
        .into_iter()
        .map(|item| {
            if Some(&item.filename) == entry_name.as_ref() {
                let contents = rewrite_map_url(item.contents, &item.filename, file);
                (file.clone(), contents)
            } else if Some(&item.filename) == entry_map.as_ref() {
                (file_map.clone(), item.contents)
            } else {
                (out_dir.join(&item.filename), item.contents)
            }
        })
        .collect()
}

/// Point the entry's `sourceMappingURL` comment at the renamed map file.
fn rewrite_map_url(contents: Vec<u8>, original: &str, file: &Path) -> Vec<u8> {
    let original_map = format!(
        "sourceMappingURL={}.map",
        Path::new(original)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    );
    let Some(target) = file.file_name() else {
        return contents;
    };
    let renamed_map = format!("sourceMappingURL={}.map", target.to_string_lossy());

    match String::from_utf8(contents) {
        Ok(code) => code.replace(&original_map, &renamed_map).into_bytes(),
        Err(err) => err.into_bytes(),
    }
}

async fn write_files(files: Vec<(PathBuf, Vec<u8>)>) -> Result<BuildOutput, BuildError> {
    let mut written = Vec::with_capacity(files.len());

    for (path, contents) in files {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| BuildError::WriteFailed {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        fs::write(&path, &contents)
            .await
            .map_err(|source| BuildError::WriteFailed {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), size = contents.len(), "Wrote output");
        written.push(OutputFile {
            path,
            size: contents.len() as u64,
        });
    }

    Ok(BuildOutput { files: written })
}
