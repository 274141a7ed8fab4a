use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::Result;

/// Name of the directory pruned from every walk, compared case-insensitively
const PRUNED_DIR: &str = "build";

/// Depth-first walk of the scan tree with `build` directories pruned
/// whole, including their own subdirectories. Entries are visited in file
/// name order so first-seen-wins deduplication is deterministic across
/// filesystems. Each scan phase performs its own walk; nothing is cached
/// between phases.
pub fn source_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry))
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_pruned(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.eq_ignore_ascii_case(PRUNED_DIR))
}

/// Path relative to the scan root, `/`-joined for stable report output
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let components: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    components.join("/")
}

/// Lowercased extension, if any
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub fn is_java_file(path: &Path) -> bool {
    extension(path).as_deref() == Some("java")
}

/// Java file whose stem ends in `action`, case-insensitively
pub fn is_action_file(path: &Path) -> bool {
    is_java_file(path)
        && path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.to_lowercase().ends_with("action"))
}

/// Routing config: lowercased file name contains the marker and ends in `.xml`
pub fn is_routing_config(path: &Path, marker: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_lowercase())
        .is_some_and(|name| name.contains(marker) && name.ends_with(".xml"))
}

/// File suffix selection for the frontend scan, lowercase-insensitive in
/// the suffix only
pub fn is_frontend_file(path: &Path, suffixes: &[String]) -> bool {
    extension(path).is_some_and(|ext| suffixes.iter().any(|suffix| suffix == &ext))
}
