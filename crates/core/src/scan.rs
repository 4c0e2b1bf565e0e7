//! Source tree traversal.

use std::path::{Path, PathBuf};

use log::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanConfig;

/// Collect files under `root` whose names end with one of the configured extensions.
///
/// Excluded directories are pruned, not descended into. A missing root yields
/// an empty list, as some configured sites may not be checked out locally;
/// so does a root that is a plain file.
/// Traversal order is whatever the directory walk yields.
pub fn find_files(root: &Path, config: &ScanConfig) -> Vec<PathBuf> {
    if !root.is_dir() {
        debug!("Scan root {} is not a directory", root.display());
        return Vec::new();
    }

    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, config))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| config.matches_file(&entry.file_name().to_string_lossy()))
        .map(DirEntry::into_path)
        .collect()
}

fn is_excluded(entry: &DirEntry, config: &ScanConfig) -> bool {
    // The root itself is always walked, whatever its name.
    entry.depth() > 0
        && entry.file_type().is_dir()
        && config.is_excluded_dir(&entry.file_name().to_string_lossy())
}
