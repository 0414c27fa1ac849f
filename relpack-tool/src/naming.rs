use relpack_lib::Manifest;
use std::path::{Component, Path, PathBuf};

/// `<dist_dir>/<id>-<version>.zip`
pub fn archive_path(dist_dir: &Path, manifest: &Manifest) -> PathBuf {
    dist_dir.join(manifest.archive_file_name())
}

/// Entry name for `path` inside the archive, relative to `base`.
///
/// Zip entry names always use `/`, whatever the host separator is.
/// Returns `None` when `path` does not live under `base`.
pub fn entry_name(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
