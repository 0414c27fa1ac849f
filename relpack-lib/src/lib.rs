use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Manifest file name, relative to the project root.
pub const MANIFEST_FILE: &str = "module.json";

/// Default destination directory for built archives.
pub const DIST_DIR: &str = "dist";

/// A top-level file packaged without recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootFile {
    pub name: &'static str,
    /// Absent required files produce a warning; absent optional ones are skipped silently.
    pub required: bool,
}

pub const ROOT_FILES: &[RootFile] = &[
    RootFile {
        name: MANIFEST_FILE,
        required: true,
    },
    RootFile {
        name: "README.md",
        required: true,
    },
    RootFile {
        name: "LICENSE",
        required: false,
    },
];

/// Subdirectories whose full recursive contents are packaged, in order.
pub const FOLDERS: &[&str] = &["scripts", "styles", "templates", "languages"];

/// What goes into a release archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub root_files: &'static [RootFile],
    pub folders: &'static [&'static str],
}

impl Layout {
    pub const DEFAULT: Layout = Layout {
        root_files: ROOT_FILES,
        folders: FOLDERS,
    };
}

impl Default for Layout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Identifying metadata read from `module.json`.
///
/// Only `id` and `version` are required; any other keys are ignored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub id: String,
    pub version: String,
}

/// Errors raised while loading a [`Manifest`].
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read manifest {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<id>-<version>.zip`, both fields used verbatim.
    pub fn archive_file_name(&self) -> String {
        format!("{}-{}.zip", self.id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn write_manifest(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(MANIFEST_FILE);
        fs::write(&path, content).expect("write manifest");
        (dir, path)
    }

    #[test]
    fn load_reads_id_and_version() {
        let (_dir, path) = write_manifest(r#"{"id": "foo", "version": "1.2.3"}"#);
        let manifest = Manifest::load(&path).expect("valid manifest");
        assert_eq!(manifest.id, "foo");
        assert_eq!(manifest.version, "1.2.3");
    }

    #[test]
    fn load_ignores_unknown_fields() {
        let (_dir, path) = write_manifest(
            r#"{"id": "foo", "title": "Foo", "version": "2.0.0", "authors": [{"name": "x"}]}"#,
        );
        let manifest = Manifest::load(&path).expect("valid manifest");
        assert_eq!(manifest.archive_file_name(), "foo-2.0.0.zip");
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = Manifest::load(&dir.path().join(MANIFEST_FILE)).expect_err("no file");
        assert!(matches!(err, ManifestError::Read { .. }));
    }

    #[rstest]
    #[case::malformed("{\"id\": \"foo\",")]
    #[case::missing_version(r#"{"id": "foo"}"#)]
    #[case::missing_id(r#"{"version": "1.0.0"}"#)]
    #[case::wrong_type(r#"{"id": "foo", "version": 1}"#)]
    fn load_rejects_bad_content(#[case] content: &str) {
        let (_dir, path) = write_manifest(content);
        let err = Manifest::load(&path).expect_err("bad manifest");
        assert!(matches!(err, ManifestError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn archive_file_name_uses_fields_verbatim() {
        let manifest = Manifest {
            id: "my-module".into(),
            version: "v0.1.0-beta+1".into(),
        };
        assert_eq!(manifest.archive_file_name(), "my-module-v0.1.0-beta+1.zip");
    }

    #[test]
    fn default_layout_only_license_is_optional() {
        let optional: Vec<_> = Layout::default()
            .root_files
            .iter()
            .filter(|f| !f.required)
            .map(|f| f.name)
            .collect();
        assert_eq!(optional, ["LICENSE"]);
        assert_eq!(Layout::DEFAULT.folders, ["scripts", "styles", "templates", "languages"]);
    }
}
