//! One source font to one WOFF2 subset.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use hanzi_font_subsetter::Subsetter;
use hanzi_font_woff2::{convert_to_woff2, is_encodable};
use log::{info, warn};
use read_fonts::{FontRef, TableProvider};

use crate::{io::FontFile, pairs::FontPair};

/// Sizes and glyph count of a finished subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetReport {
    pub source_bytes: usize,
    pub output_bytes: usize,
    pub glyphs: u16,
}

impl SubsetReport {
    pub fn source_mb(&self) -> f64 {
        self.source_bytes as f64 / 1024.0 / 1024.0
    }

    pub fn output_kb(&self) -> f64 {
        self.output_bytes as f64 / 1024.0
    }
}

impl fmt::Display for SubsetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} MB → {:.0} KB", self.source_mb(), self.output_kb())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Subsetted(SubsetReport),
    /// The source font does not exist.
    Skipped(PathBuf),
}

/// Source and destination paths of a pair, resolved against the run directories.
pub fn resolve(pair: &FontPair, source_dir: &Path, output_dir: &Path) -> (FontFile, FontFile) {
    (
        FontFile::new(source_dir.join(&pair.source)),
        FontFile::new(output_dir.join(&pair.destination)),
    )
}

/// Subset `source` to the glyphs needed for `text` and write it to `output` as WOFF2.
///
/// Errors from the font libraries are returned as-is with path context; they
/// mean the wrong file was handed to the job and are not recoverable.
pub fn subset_font(source: &FontFile, output: &FontFile, text: &str) -> Result<SubsetReport> {
    let data = source.read()?;

    let chars: Vec<char> = text.chars().filter(|c| is_encodable(*c)).collect();
    if chars.len() < text.chars().count() {
        warn!("Dropping characters that break WOFF2 validation from {}", source.path().display());
    }

    let subset = Subsetter::web()
        .with_chars(chars)
        .subset(&data)
        .with_context(|| format!("Failed to subset {}", source.path().display()))?;

    let glyphs = FontRef::new(&subset)
        .and_then(|font| font.maxp())
        .map(|maxp| maxp.num_glyphs())
        .with_context(|| format!("Subset of {} is not a readable font", source.path().display()))?;

    let woff2 = convert_to_woff2(&subset)
        .with_context(|| format!("Failed to encode {}", output.path().display()))?;
    output.write(&woff2)?;

    info!("{}: kept {glyphs} glyphs", output.path().display());

    Ok(SubsetReport { source_bytes: data.len(), output_bytes: woff2.len(), glyphs })
}

/// Run one pair, skipping it if the source font is missing.
pub fn run_job(
    pair: &FontPair,
    source_dir: &Path,
    output_dir: &Path,
    text: &str,
) -> Result<JobOutcome> {
    let (source, output) = resolve(pair, source_dir, output_dir);
    if !source.exists() {
        return Ok(JobOutcome::Skipped(source.path().to_path_buf()));
    }
    subset_font(&source, &output, text).map(JobOutcome::Subsetted)
}
