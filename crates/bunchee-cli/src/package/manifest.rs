//! `package.json` access.

use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// File name of the package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Whether `dir` contains a package manifest.
pub fn has_package_json(dir: &Path) -> bool {
    dir.join(MANIFEST_FILE).is_file()
}

/// One step in a path into the manifest, e.g. `exports` → `"."` → `import`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// A path into the manifest rendered the way users write it: `pkg.exports["."].import`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestPath(pub Vec<PathSegment>);

impl ManifestPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// A new path with `segment` appended.
    pub fn join(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for ManifestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("pkg")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) if is_identifier(key) => write!(f, ".{}", key)?,
                PathSegment::Key(key) => write!(f, "[{:?}]", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Manifest fields whose keys name runtime dependencies.
const DEPENDENCY_FIELDS: &[&str] = &["dependencies", "peerDependencies", "optionalDependencies"];

/// A parsed package manifest.
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    json: Value,
}

impl PackageManifest {
    /// Read `package.json` from `dir`.
    pub fn read(dir: &Path) -> Result<Self, BuildError> {
        let path = dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|source| BuildError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse manifest text that was read from `path`.
    pub fn parse(path: PathBuf, content: &str) -> Result<Self, BuildError> {
        match serde_json::from_str(content) {
            Ok(json) => Ok(Self { path, json }),
            Err(source) => Err(BuildError::Manifest { path, source }),
        }
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn name(&self) -> Option<&str> {
        self.json.get("name").and_then(Value::as_str)
    }

    /// Value at `path`, if present.
    pub fn get(&self, path: &ManifestPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(&self.json, |value, segment| match segment {
                PathSegment::Key(key) => value.get(key.as_str()),
                PathSegment::Index(index) => value.get(*index),
            })
    }

    /// Names from `dependencies`, `peerDependencies` and `optionalDependencies`,
    /// sorted and de-duplicated.
    ///
    /// A field that is not an object contributes nothing and is logged.
    pub fn dependency_names(&self) -> Vec<String> {
        let mut names = Vec::new();

        for field in DEPENDENCY_FIELDS {
            match self.json.get(*field) {
                None => {}
                Some(Value::Object(deps)) => names.extend(deps.keys().cloned()),
                Some(other) => tracing::warn!(
                    path = %self.path.display(),
                    field,
                    found = %other,
                    "Dependency field is not an object; its packages will be bundled"
                ),
            }
        }

        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(json: Value) -> PackageManifest {
        PackageManifest::parse(PathBuf::from("/pkg/package.json"), &json.to_string()).unwrap()
    }

    #[test]
    fn test_manifest_path_display() {
        let path = ManifestPath::root().join("exports").join(".").join("import");
        assert_eq!(path.to_string(), r#"pkg.exports["."].import"#);

        let path = ManifestPath::root().join("exports").join("./utils").join(0);
        assert_eq!(path.to_string(), r#"pkg.exports["./utils"][0]"#);

        assert_eq!(ManifestPath::root().join("main").to_string(), "pkg.main");
    }

    #[test]
    fn test_get_walks_objects_and_arrays() {
        let pkg = manifest(json!({
            "exports": { ".": ["./a.js", { "import": "./b.mjs" }] }
        }));

        let path = ManifestPath::root().join("exports").join(".").join(1).join("import");
        assert_eq!(pkg.get(&path), Some(&json!("./b.mjs")));
        assert_eq!(pkg.get(&ManifestPath::root().join("missing")), None);
    }

    #[test]
    fn test_dependency_names() {
        let pkg = manifest(json!({
            "dependencies": { "react": "^18" },
            "peerDependencies": { "react": "^18", "react-dom": "^18" },
            "optionalDependencies": { "fsevents": "*" },
            "devDependencies": { "typescript": "^5" }
        }));

        assert_eq!(pkg.dependency_names(), vec!["fsevents", "react", "react-dom"]);
    }

    #[test]
    fn test_metadata_accessors() {
        let pkg = manifest(json!({ "name": "my-lib", "version": "1.2.3" }));
        assert_eq!(pkg.name(), Some("my-lib"));
        assert_eq!(manifest(json!({})).name(), None);
    }

    #[test]
    fn test_dependency_names_skip_non_object_fields() {
        let pkg = manifest(json!({
            "dependencies": ["react"],
            "peerDependencies": { "vue": "^3" },
            "optionalDependencies": "fsevents"
        }));

        assert_eq!(pkg.dependency_names(), vec!["vue"]);
    }

    #[test]
    fn test_parse_error() {
        let err = PackageManifest::parse(PathBuf::from("package.json"), "{ nope").unwrap_err();
        assert!(matches!(err, BuildError::Manifest { .. }));
    }

    #[test]
    fn test_has_package_json() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(!has_package_json(temp.path()));
        std::fs::write(temp.path().join(MANIFEST_FILE), "{}").unwrap();
        assert!(has_package_json(temp.path()));
    }
}
