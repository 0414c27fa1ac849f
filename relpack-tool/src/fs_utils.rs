use crate::error::PackError;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;
use walkdir::WalkDir;

/// Makes sure `dir` exists, creating it and any missing parents.
///
/// Returns `true` when something had to be created.
pub fn ensure_dir(dir: &Path) -> Result<bool, PackError> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|source| PackError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!(path = %dir.display(), "created output directory");
    Ok(true)
}

/// Recursively lists every file under `dir`, sorted by name within each directory.
///
/// Symlinks are not followed into directories, but a symlink pointing at a
/// regular file is listed like the file itself.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, PackError> {
    let mut result = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if entry.path().is_file() {
            result.push(entry.into_path());
        }
    }
    Ok(result)
}

/// Sum of file sizes in bytes.
pub fn total_size(files: &[PathBuf]) -> Result<u64, PackError> {
    let mut total: u64 = 0;
    for path in files {
        let meta = fs::metadata(path).map_err(|source| PackError::ReadEntry {
            path: path.clone(),
            source,
        })?;
        total += meta.len();
    }
    Ok(total)
}

/// Convert bytes into a human-friendly string using binary (KiB, MiB, GiB...) units.
pub fn encode_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    // 1.0 MiB prints as 1 MiB
    if (size * 10.0).round() % 10.0 == 0.0 {
        format!("{:.0} {}", size, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
