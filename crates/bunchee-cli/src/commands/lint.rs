//! Post-build package validation.

use std::path::Path;

use crate::logger::Logger;
use crate::package::{format_message, has_package_json, PackageLinter, PackageManifest, Severity};

/// Lint the package in `cwd` and print each finding.
///
/// Does nothing without a `package.json`; `make_linter` is only called once
/// the manifest is known to exist. Findings never fail the build. A linter
/// failure is reported as a warning. Returns the number of findings printed.
pub async fn lint_package<F>(cwd: &Path, make_linter: F, logger: &dyn Logger) -> usize
where
    F: FnOnce() -> Box<dyn PackageLinter>,
{
    if !has_package_json(cwd) {
        tracing::debug!(cwd = %cwd.display(), "No package.json, skipping package lint");
        return 0;
    }

    let linter = make_linter();
    let messages = match linter.lint(cwd, Severity::Error).await {
        Ok(messages) => messages,
        Err(err) => {
            logger.warn(&format!("Package lint skipped: {}", err));
            return 0;
        }
    };

    if messages.is_empty() {
        return 0;
    }

    let manifest = match PackageManifest::read(cwd) {
        Ok(manifest) => manifest,
        Err(err) => {
            logger.warn(&format!("Package lint skipped: {}", err));
            return 0;
        }
    };

    for message in &messages {
        logger.log(&format_message(message, &manifest));
    }
    messages.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::logger::{LogLevel, MemoryLogger};
    use crate::package::ManifestLinter;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct FailingLinter;

    #[async_trait]
    impl PackageLinter for FailingLinter {
        async fn lint(
            &self,
            _pkg_dir: &Path,
            _level: Severity,
        ) -> Result<Vec<crate::package::LintMessage>, BuildError> {
            Err(BuildError::Bundler("linter crashed".to_string()))
        }
    }

    #[tokio::test]
    async fn test_skips_without_manifest() {
        let temp = TempDir::new().unwrap();
        let logger = MemoryLogger::new();

        let count = lint_package(
            temp.path(),
            || -> Box<dyn PackageLinter> { panic!("linter must not be constructed") },
            &logger,
        )
        .await;

        assert_eq!(count, 0);
        assert!(logger.lines().is_empty());
    }

    #[tokio::test]
    async fn test_prints_findings() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{ "exports": { ".": { "import": "./dist/index.mjs" } } }"#,
        )
        .unwrap();
        let logger = MemoryLogger::new();

        let count = lint_package(temp.path(), || Box::new(ManifestLinter::new()), &logger).await;

        assert_eq!(count, 1);
        assert_eq!(
            logger.messages(LogLevel::Log),
            vec![r#"pkg.exports["."].import is ./dist/index.mjs but the file does not exist."#]
        );
    }

    #[tokio::test]
    async fn test_linter_failure_is_a_warning() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("package.json"), "{}").unwrap();
        let logger = MemoryLogger::new();

        let count = lint_package(temp.path(), || Box::new(FailingLinter), &logger).await;

        assert_eq!(count, 0);
        assert_eq!(logger.messages(LogLevel::Warn).len(), 1);
        assert!(logger.contains("linter crashed"));
    }
}
