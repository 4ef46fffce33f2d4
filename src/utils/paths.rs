//! Path utilities.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::MpjError;

/// Maximum number of parent directories to search.
pub const MAX_SEARCH_DEPTH: usize = 10;

/// Default scripts directory, relative to the project root.
pub const DEFAULT_SCRIPTS_DIR: &str = "package-scripts/scripts";

/// Find the package.json file starting from the given directory.
///
/// Searches the given directory and up to 10 parent directories.
///
/// # Errors
///
/// Returns an error if no package.json is found.
pub fn find_manifest(start_dir: &Path) -> Result<PathBuf> {
    let start = start_dir.canonicalize().with_context(|| {
        format!(
            "Cannot access directory '{}': path does not exist or is not accessible",
            start_dir.display()
        )
    })?;

    let mut current = start.as_path();
    let mut depth = 0;

    while depth < MAX_SEARCH_DEPTH {
        let manifest = current.join("package.json");
        if manifest.exists() {
            return Ok(manifest);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
                depth += 1;
            }
            _ => break,
        }
    }

    Err(MpjError::NoManifest {
        path: start,
        depth: MAX_SEARCH_DEPTH,
    }
    .into())
}

/// Find the project root (directory containing package.json).
///
/// # Errors
///
/// Returns an error if no package.json is found.
pub fn find_project_root(start_dir: &Path) -> Result<PathBuf> {
    let manifest = find_manifest(start_dir)?;
    Ok(manifest
        .parent()
        .expect("package.json should have parent")
        .to_path_buf())
}

/// The scripts directory for a project, honoring an optional override.
pub fn scripts_dir(project_dir: &Path, override_dir: Option<&Path>) -> PathBuf {
    match override_dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => project_dir.join(dir),
        None => project_dir.join(DEFAULT_SCRIPTS_DIR),
    }
}

/// The preview manifest written by `mpj parse`, side by side with
/// package.json.
pub fn preview_file(project_dir: &Path) -> PathBuf {
    project_dir.join("package-preview.json")
}

/// The fixed side file holding the documentation table.
pub fn docs_file(project_dir: &Path) -> PathBuf {
    project_dir.join("package-scripts").join("scripts-docs.json")
}

/// Enumerate script-definition files under `dir`, recursively.
///
/// Yields every file whose name ends in `.script.yaml` or `.yaml`, in
/// sorted path order so compilation is deterministic regardless of the
/// directory iteration order.
///
/// # Errors
///
/// Returns [`MpjError::ScriptsDirMissing`] when `dir` does not exist.
pub fn collect_script_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(MpjError::ScriptsDirMissing {
            path: dir.to_path_buf(),
        }
        .into());
    }

    let mut files = Vec::new();
    collect_into(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_into(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .map_err(MpjError::io_context("read directory", dir.to_path_buf()))?;

    for entry in entries {
        let entry = entry.map_err(MpjError::io_context("read directory", dir.to_path_buf()))?;
        let path = entry.path();

        if path.is_dir() {
            collect_into(&path, files)?;
        } else if is_script_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check whether a path names a script-definition file.
///
/// Both `.script.yaml` and plain `.yaml` suffixes are accepted.
fn is_script_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".script.yaml") || name.ends_with(".yaml"))
}

/// Get the config directory for mpj.
///
/// Returns `~/.config/mpj` on Unix-like systems.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mpj"))
}

/// Get the global config file path.
///
/// Returns `~/.config/mpj/config.toml`.
pub fn global_config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Find the local config file in the project directory.
///
/// Looks for `.mpjrc.toml` in the given directory.
pub fn local_config_file(project_dir: &Path) -> Option<PathBuf> {
    let config_file = project_dir.join(".mpjrc.toml");
    if config_file.exists() {
        Some(config_file)
    } else {
        None
    }
}
