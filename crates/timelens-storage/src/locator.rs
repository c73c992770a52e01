//! Locates the tracker database on disk.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Fixed candidate locations probed before falling back to a scan.
const CANDIDATE_PATHS: &[&str] = &[
    "time-tracker.db",
    "data/tracker.db",
    "user-data/time-tracker.db",
    "storage/time-tracker.db",
];

/// Directories never descended into during the fallback scan.
const PRUNED_DIRS: &[&str] = &[".git", "node_modules", "target"];

/// Find the tracker database relative to the current directory.
#[must_use]
pub fn find_database() -> Option<PathBuf> {
    find_database_in(Path::new("."))
}

/// Find the tracker database under `root`.
///
/// The fixed candidate paths are probed in order; if none exists, a
/// recursive walk returns the first `.db` file it encounters. The walk
/// prunes version-control and dependency directories and visits entries in
/// lexicographic filename order so the fallback is deterministic.
#[must_use]
pub fn find_database_in(root: &Path) -> Option<PathBuf> {
    for candidate in CANDIDATE_PATHS {
        let path = root.join(candidate);
        if path.exists() {
            log::debug!("Database found at candidate path: {}", path.display());
            return Some(path);
        }
    }

    log::debug!(
        "No candidate path matched, scanning {} for .db files",
        root.display()
    );

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !entry.file_type().is_dir()
                || !PRUNED_DIRS
                    .iter()
                    .any(|dir| entry.file_name() == OsStr::new(dir))
        })
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_type().is_file()
                && entry.file_name().to_string_lossy().ends_with(".db")
        })
        .map(walkdir::DirEntry::into_path)
}
