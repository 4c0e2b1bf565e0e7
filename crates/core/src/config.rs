//! Configuration values for scanning and subsetting.

use std::path::{Path, PathBuf, absolute};

/// Characters every subset carries regardless of scan results.
///
/// Latin letters, digits, ASCII punctuation, and the full-width CJK
/// punctuation and symbols used across the sites.
pub const BASE_CHARS: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
    "0123456789 .,;:!?@#$%^&*()-_=+[]{}|\\/\"'",
    "<>~`©–—·「」『』【】《》、。！？；：（）％＆＋－／＝",
    "…〈〉→←•◇❖",
);

/// File extensions scanned by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".html", ".js", ".jsx", ".tsx"];

/// Directory names never descended into.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "dist", ".next"];

/// Site roots scanned when none are given, relative to the tools repository root.
pub const DEFAULT_SCAN_DIRS: &[&[&str]] =
    &[&["public"], &["..", "helloruru.github.io"], &["..", "happy-exit"]];

/// Which files the scanner collects and which directories it prunes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub extensions: Vec<String>,
    pub excluded_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excluded_dirs: EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl ScanConfig {
    /// Replaces the extension list. A missing leading dot is added.
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| {
                let e = e.as_ref();
                if e.starts_with('.') { e.to_string() } else { format!(".{e}") }
            })
            .collect();
        self
    }

    pub fn matches_file(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    pub fn is_excluded_dir(&self, dir_name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == dir_name)
    }
}

/// A site root to scan, with the name used in the scan report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    pub path: PathBuf,
    pub name: String,
}

impl ScanTarget {
    /// Creates a target named after the base name of its absolute path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

/// Default scan targets resolved against `root`.
pub fn default_scan_targets(root: &Path) -> Vec<ScanTarget> {
    DEFAULT_SCAN_DIRS
        .iter()
        .map(|parts| ScanTarget::new(parts.iter().fold(root.to_path_buf(), |p, part| p.join(part))))
        .collect()
}

fn display_name(path: &Path) -> String {
    // `absolute` keeps `..` components, so prefer the canonical form when the path exists.
    let resolved = path
        .canonicalize()
        .or_else(|_| absolute(path))
        .unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_chars_cover_latin_and_punctuation() {
        for c in ['A', 'z', '0', '9', ' ', '\\', '"', '\'', '`', '。', '「', '❖'] {
            assert!(BASE_CHARS.contains(c), "missing {c:?}");
        }
    }

    #[test]
    fn test_default_scan_config() {
        let config = ScanConfig::default();
        assert!(config.matches_file("index.html"));
        assert!(config.matches_file("App.jsx"));
        assert!(!config.matches_file("style.css"));
        assert!(config.is_excluded_dir("node_modules"));
        assert!(!config.is_excluded_dir("src"));
    }

    #[test]
    fn test_with_extensions_adds_dot() {
        let config = ScanConfig::default().with_extensions(["md", ".vue"]);
        assert_eq!(config.extensions, vec![".md", ".vue"]);
        assert!(config.matches_file("README.md"));
        assert!(!config.matches_file("index.html"));
    }

    #[test]
    fn test_scan_target_name_is_base_name() {
        let target = ScanTarget::new("/srv/sites/lab");
        assert_eq!(target.name, "lab");
    }

    #[test]
    fn test_default_scan_targets() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("tools");
        std::fs::create_dir_all(root.join("public")).unwrap();

        let targets = default_scan_targets(&root);
        let names: Vec<_> = targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["public", "helloruru.github.io", "happy-exit"]);
        assert_eq!(targets[1].path, root.join("..").join("helloruru.github.io"));
    }
}
