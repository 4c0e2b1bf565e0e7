//! CJK character extraction from scanned source files.

use std::{
    collections::{BTreeSet, HashSet},
    fmt,
    fs::read,
    io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::debug;

use crate::{
    config::{BASE_CHARS, ScanConfig, ScanTarget},
    scan::find_files,
};

/// Returns `true` for CJK Unified Ideographs and Extension A.
pub fn is_cjk(c: char) -> bool {
    matches!(c as u32, 0x4E00..=0x9FFF | 0x3400..=0x4DBF)
}

/// Why a scanned file contributed nothing.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("Failed to read '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("'{}' is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },
}

impl SkipReason {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::NotUtf8 { path } => path,
        }
    }
}

/// Result of a best-effort text read.
#[derive(Debug)]
pub enum ReadOutcome {
    Text(String),
    Skipped(SkipReason),
}

/// Read a whole file as UTF-8, turning any failure into a skip.
pub fn read_text(path: &Path) -> ReadOutcome {
    let bytes = match read(path) {
        Ok(bytes) => bytes,
        Err(source) => return ReadOutcome::Skipped(SkipReason::Io { path: path.into(), source }),
    };
    match String::from_utf8(bytes) {
        Ok(text) => ReadOutcome::Text(text),
        Err(_) => ReadOutcome::Skipped(SkipReason::NotUtf8 { path: path.into() }),
    }
}

/// Deduplicated set of characters, iterated in code point order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet(BTreeSet<char>);

impl CharSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// Add every CJK character found in `text`.
    pub fn extend_cjk(&mut self, text: &str) {
        self.0.extend(text.chars().filter(|c| is_cjk(*c)));
    }
}

impl Extend<char> for CharSet {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Per-site scan counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteStats {
    pub files: usize,
    pub chars: usize,
}

/// Site name to counts, in scan order.
pub type ScanStats = IndexMap<String, SiteStats>;

/// Everything learned from one extraction pass.
#[derive(Debug, Default)]
pub struct Extraction {
    pub chars: CharSet,
    pub stats: ScanStats,
    pub skipped: Vec<SkipReason>,
}

impl Extraction {
    /// Report lines for sites that yielded at least one file.
    pub fn report(&self) -> Vec<String> {
        self.stats
            .iter()
            .filter(|(_, stats)| stats.files > 0)
            .map(|(name, stats)| format!("{name}: {} chars ({} files)", stats.chars, stats.files))
            .collect()
    }
}

/// Scan every target and collect the union of CJK characters found.
///
/// Unreadable files are skipped and recorded, never fatal. Targets sharing a
/// display name are reported as one site: file counts add up and the
/// character count is that of their combined set.
pub fn extract_cjk_chars(targets: &[ScanTarget], config: &ScanConfig) -> Extraction {
    let mut extraction = Extraction::default();
    let mut site_sets: IndexMap<&str, CharSet> = IndexMap::new();

    for target in targets {
        let files = find_files(&target.path, config);
        let site_chars = site_sets.entry(target.name.as_str()).or_default();

        for path in &files {
            match read_text(path) {
                ReadOutcome::Text(text) => site_chars.extend_cjk(&text),
                ReadOutcome::Skipped(reason) => {
                    debug!("{reason}");
                    extraction.skipped.push(reason);
                }
            }
        }

        debug!("{}: {} files, {} chars", target.name, files.len(), site_chars.len());
        let stats = extraction.stats.entry(target.name.clone()).or_default();
        stats.files += files.len();
        stats.chars = site_chars.len();
        extraction.chars.extend(site_chars.iter());
    }

    extraction
}

/// Build the text handed to the subsetter.
///
/// Sorted CJK characters first, then [`BASE_CHARS`], then `extra`; later
/// repeats of a character are dropped.
pub fn compose_subset_text(chars: &CharSet, extra: &str) -> String {
    let mut seen = HashSet::new();
    chars
        .iter()
        .chain(BASE_CHARS.chars())
        .chain(extra.chars())
        .filter(|c| seen.insert(*c))
        .collect()
}
