use std::fmt;
use std::path::{Path, PathBuf};

use relpack_lib::Layout;
use tracing::debug;

use crate::error::PackError;
use crate::fs_utils::list_files;
use crate::naming::entry_name;

pub mod zip;

/// Represents a file to include in the ZIP archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub name_in_archive: String,
}

/// A required input that was not found; reported as a warning, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingInput {
    RootFile(&'static str),
    Folder(&'static str),
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingInput::RootFile(name) => write!(f, "Warning: {name} is missing."),
            MissingInput::Folder(name) => write!(f, "Warning: {name} is missing. Skipping."),
        }
    }
}

/// Everything one run will put into the archive, plus what it had to leave out.
#[derive(Debug, Default)]
pub struct PackagePlan {
    pub entries: Vec<ArchiveEntry>,
    pub missing: Vec<MissingInput>,
}

impl PackagePlan {
    /// Drops any entry whose source is `path`, e.g. a previous archive sitting
    /// inside a packaged folder.
    pub fn exclude(&mut self, path: &Path) {
        let Ok(target) = path.canonicalize() else {
            return;
        };
        self.entries
            .retain(|e| !e.path.canonicalize().is_ok_and(|p| p == target));
    }

    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }
}

/// Resolves `layout` against `project_dir`.
///
/// Root files come first in table order, then each folder's files in folder
/// order. Absent optional root files leave no trace.
pub fn plan_entries(project_dir: &Path, layout: &Layout) -> Result<PackagePlan, PackError> {
    let mut plan = PackagePlan::default();

    for root_file in layout.root_files {
        let path = project_dir.join(root_file.name);
        if path.is_file() {
            plan.entries.push(ArchiveEntry {
                path,
                name_in_archive: root_file.name.to_string(),
            });
        } else if root_file.required {
            plan.missing.push(MissingInput::RootFile(root_file.name));
        }
    }

    for &folder in layout.folders {
        let dir = project_dir.join(folder);
        if !dir.is_dir() {
            plan.missing.push(MissingInput::Folder(folder));
            continue;
        }
        for path in list_files(&dir)? {
            let Some(name_in_archive) = entry_name(project_dir, &path) else {
                continue;
            };
            plan.entries.push(ArchiveEntry {
                path,
                name_in_archive,
            });
        }
    }

    debug!(
        entries = plan.entries.len(),
        missing = plan.missing.len(),
        "planned archive contents"
    );
    Ok(plan)
}
