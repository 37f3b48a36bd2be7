//! Package-shape linting for `package.json`.
//!
//! [`ManifestLinter`] checks that the files a manifest points at exist and
//! that `exports` follows the conventions resolvers rely on. Findings are
//! returned as [`LintMessage`]s and rendered with [`format_message`].

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

use super::manifest::{ManifestPath, PackageManifest};
use crate::error::BuildError;

/// How serious a finding is. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Suggestion,
    Warning,
    Error,
}

/// Rule that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCode {
    FileDoesNotExist,
    ExportsValueInvalid,
    ExportsTypesShouldBeFirst,
    ExportsDefaultShouldBeLast,
    FieldInvalidValueType,
    HasModuleButNoExports,
}

impl LintCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LintCode::FileDoesNotExist => "FILE_DOES_NOT_EXIST",
            LintCode::ExportsValueInvalid => "EXPORTS_VALUE_INVALID",
            LintCode::ExportsTypesShouldBeFirst => "EXPORTS_TYPES_SHOULD_BE_FIRST",
            LintCode::ExportsDefaultShouldBeLast => "EXPORTS_DEFAULT_SHOULD_BE_LAST",
            LintCode::FieldInvalidValueType => "FIELD_INVALID_VALUE_TYPE",
            LintCode::HasModuleButNoExports => "HAS_MODULE_BUT_NO_EXPORTS",
        }
    }
}

impl fmt::Display for LintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding, pointing at the manifest value it is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintMessage {
    pub code: LintCode,
    pub severity: Severity,
    pub path: ManifestPath,
}

impl LintMessage {
    fn new(code: LintCode, severity: Severity, path: ManifestPath) -> Self {
        Self {
            code,
            severity,
            path,
        }
    }
}

/// Checks the shape of a package directory.
#[async_trait]
pub trait PackageLinter: Send + Sync {
    /// Lint the package in `pkg_dir`, keeping findings at `level` or above.
    async fn lint(&self, pkg_dir: &Path, level: Severity) -> Result<Vec<LintMessage>, BuildError>;
}

/// Linter for the fields of `package.json` that point at build output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestLinter;

impl ManifestLinter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PackageLinter for ManifestLinter {
    async fn lint(&self, pkg_dir: &Path, level: Severity) -> Result<Vec<LintMessage>, BuildError> {
        let manifest = PackageManifest::read(pkg_dir)?;
        let json = manifest.json();

        let mut messages = Vec::new();
        // Paths to check on disk, and whether extension probing applies
        let mut files: Vec<(ManifestPath, String, bool)> = Vec::new();

        for field in ["main", "module", "types", "typings"] {
            let path = ManifestPath::root().join(field);
            match json.get(field) {
                None | Some(Value::Null) => {}
                Some(Value::String(target)) => {
                    let probe = matches!(field, "main" | "module");
                    files.push((path, target.clone(), probe));
                }
                Some(_) => messages.push(LintMessage::new(
                    LintCode::FieldInvalidValueType,
                    Severity::Error,
                    path,
                )),
            }
        }

        match json.get("bin") {
            Some(Value::String(target)) => {
                files.push((ManifestPath::root().join("bin"), target.clone(), false));
            }
            Some(Value::Object(bins)) => {
                for (name, target) in bins {
                    if let Value::String(target) = target {
                        let path = ManifestPath::root().join("bin").join(name.as_str());
                        files.push((path, target.clone(), false));
                    }
                }
            }
            _ => {}
        }

        if json.get("module").is_some() && json.get("exports").is_none() {
            messages.push(LintMessage::new(
                LintCode::HasModuleButNoExports,
                Severity::Suggestion,
                ManifestPath::root().join("module"),
            ));
        }

        if let Some(exports) = json.get("exports") {
            let mut targets = Vec::new();
            walk_exports(
                exports,
                &ManifestPath::root().join("exports"),
                &mut messages,
                &mut targets,
            );
            files.extend(targets.into_iter().map(|(path, target)| (path, target, false)));
        }

        for (path, target, probe) in files {
            if !target_exists(pkg_dir, &target, probe).await {
                messages.push(LintMessage::new(
                    LintCode::FileDoesNotExist,
                    Severity::Error,
                    path,
                ));
            }
        }

        messages.retain(|message| message.severity >= level);
        tracing::debug!(
            count = messages.len(),
            package = manifest.name().unwrap_or("<unnamed>"),
            "Package lint finished"
        );
        Ok(messages)
    }
}

/// Collect string targets of an `exports` value and check condition ordering.
fn walk_exports(
    value: &Value,
    path: &ManifestPath,
    messages: &mut Vec<LintMessage>,
    targets: &mut Vec<(ManifestPath, String)>,
) {
    match value {
        Value::String(target) => {
            if !target.starts_with("./") {
                messages.push(LintMessage::new(
                    LintCode::ExportsValueInvalid,
                    Severity::Error,
                    path.clone(),
                ));
            } else if !target.contains('*') {
                targets.push((path.clone(), target.clone()));
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                walk_exports(item, &path.join(index), messages, targets);
            }
        }
        Value::Object(map) => {
            if !is_subpath_map(map) {
                check_condition_order(map, path, messages);
            }
            for (key, nested) in map {
                walk_exports(nested, &path.join(key.as_str()), messages, targets);
            }
        }
        _ => {}
    }
}

fn is_subpath_map(map: &Map<String, Value>) -> bool {
    map.keys().any(|key| key.starts_with('.'))
}

fn check_condition_order(
    map: &Map<String, Value>,
    path: &ManifestPath,
    messages: &mut Vec<LintMessage>,
) {
    let last = map.len().saturating_sub(1);
    for (index, key) in map.keys().enumerate() {
        match key.as_str() {
            "types" if index > 0 => messages.push(LintMessage::new(
                LintCode::ExportsTypesShouldBeFirst,
                Severity::Error,
                path.join("types"),
            )),
            "default" if index < last => messages.push(LintMessage::new(
                LintCode::ExportsDefaultShouldBeLast,
                Severity::Error,
                path.join("default"),
            )),
            _ => {}
        }
    }
}

/// Whether `target` exists relative to `pkg_dir`.
///
/// With `probe`, Node's legacy lookup is followed: the exact path, then
/// `<target>.js`, then `<target>/index.js`.
async fn target_exists(pkg_dir: &Path, target: &str, probe: bool) -> bool {
    let base = pkg_dir.join(target);
    if is_file(&base).await {
        return true;
    }
    if !probe {
        return false;
    }
    let with_ext = pkg_dir.join(format!("{}.js", target));
    is_file(&with_ext).await || is_file(&base.join("index.js")).await
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Render `message` as a sentence, quoting the offending manifest value.
pub fn format_message(message: &LintMessage, manifest: &PackageManifest) -> String {
    let path = &message.path;
    let value = manifest.get(path);

    match message.code {
        LintCode::FileDoesNotExist => {
            format!("{} is {} but the file does not exist.", path, display_value(value))
        }
        LintCode::ExportsValueInvalid => {
            let shown = display_value(value);
            format!(
                "{} is {} but is invalid as it does not start with \"./\". Use ./{} instead.",
                path,
                shown,
                shown.trim_start_matches('/')
            )
        }
        LintCode::ExportsTypesShouldBeFirst => format!(
            "{} should be the first in the object as required by TypeScript.",
            path
        ),
        LintCode::ExportsDefaultShouldBeLast => format!(
            "{} should be the last in the object so it doesn't take precedence over the keys following it.",
            path
        ),
        LintCode::FieldInvalidValueType => format!(
            "{} is {} but the value must be a string.",
            path,
            display_value(value)
        ),
        LintCode::HasModuleButNoExports => format!(
            "{} is used to output ESM, but pkg.exports is not defined. \
             Node.js doesn't read pkg.module, so consider adding pkg.exports to export the ESM output.",
            path
        ),
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "undefined".to_string(),
    }
}
