//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Render a path with forward slashes, regardless of host platform.
///
/// Manifest output must be byte-identical across runs and hosts, and
/// nuspec consumers accept forward slashes everywhere.
pub fn slash(path: &Path) -> String {
    let s = path.to_string_lossy();
    if s.contains('\\') {
        s.replace('\\', "/")
    } else {
        s.into_owned()
    }
}

/// Join path segments that are already forward-slash strings.
pub fn join_slash(base: &str, rest: &str) -> String {
    let base = base.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');
    if base.is_empty() {
        rest.to_string()
    } else {
        format!("{base}/{rest}")
    }
}

/// Compute `path` relative to `base`, rendered with forward slashes.
/// A path that is not absolute is returned as-is; `path == base` yields
/// the empty string.
pub fn relative_to(path: &Path, base: &Path) -> String {
    if !path.is_absolute() {
        return slash(path);
    }
    match pathdiff::diff_paths(path, base) {
        Some(rel) => slash(&rel),
        None => slash(path),
    }
}

/// Whether a directory exists and holds at least one binary artifact
/// (`.dll` or `.exe`, case-insensitive).
pub fn contains_binaries(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries
        .flatten()
        .any(|e| is_binary_artifact(&e.path()) && e.path().is_file())
}

/// Whether a path names a `.dll` or `.exe` file (case-insensitive).
pub fn is_binary_artifact(path: &Path) -> bool {
    matches!(
        path.extension().map(|e| e.to_string_lossy().to_ascii_lowercase()),
        Some(ext) if ext == "dll" || ext == "exe"
    )
}

/// Sorted file listing of a directory; missing directory yields an empty
/// list.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    files
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}
