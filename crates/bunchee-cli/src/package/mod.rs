//! Package manifest reading and linting.

pub mod lint;
pub mod manifest;

pub use lint::{format_message, LintCode, LintMessage, ManifestLinter, PackageLinter, Severity};
pub use manifest::{has_package_json, ManifestPath, PackageManifest, PathSegment, MANIFEST_FILE};
