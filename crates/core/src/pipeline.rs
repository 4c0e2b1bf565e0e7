//! Top-level run: scan sites, extract characters, subset every font pair.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use crate::{
    config::{ScanConfig, ScanTarget},
    extract::{SkipReason, compose_subset_text, extract_cjk_chars},
    io::ensure_dir,
    job::{JobOutcome, SubsetReport, resolve, run_job},
    pairs::{FontPair, PairError, parse_font_pairs},
    parallel::try_map_ordered,
};

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding the source fonts.
    pub source_dir: PathBuf,
    /// Directory receiving the WOFF2 files; created if missing.
    pub output_dir: PathBuf,
    /// `SOURCE:DEST` tokens.
    pub fonts: Vec<String>,
    pub scan_targets: Vec<ScanTarget>,
    pub scan: ScanConfig,
    /// Characters included in every subset regardless of scan results.
    pub extra_chars: String,
    /// Turn unreadable files, malformed pair tokens and missing source fonts into errors.
    pub strict: bool,
    /// Run font jobs on the rayon pool.
    pub parallel: bool,
}

impl RunConfig {
    /// A config writing to the current directory and scanning nothing.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        fonts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: PathBuf::from("."),
            fonts: fonts.into_iter().map(Into::into).collect(),
            scan_targets: Vec::new(),
            scan: ScanConfig::default(),
            extra_chars: String::new(),
            strict: false,
            parallel: false,
        }
    }
}

/// What a run did.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub cjk_chars: usize,
    pub total_chars: usize,
    /// The exact text every subset was built from.
    pub subset_text: String,
    pub subsetted: Vec<(FontPair, SubsetReport)>,
    /// Source fonts that did not exist.
    pub skipped_jobs: Vec<PathBuf>,
    pub rejected_pairs: Vec<PairError>,
    pub skipped_files: Vec<SkipReason>,
}

pub fn run(config: &RunConfig) -> Result<RunSummary> {
    println!("Hanzi font subsetting\n");

    println!("Scanning sites...");
    let extraction = extract_cjk_chars(&config.scan_targets, &config.scan);
    println!("  Scan results:");
    for line in extraction.report() {
        println!("    {line}");
    }
    if config.strict && !extraction.skipped.is_empty() {
        let count = extraction.skipped.len();
        bail!("{count} unreadable file(s):\n{}", join_lines(&extraction.skipped));
    }

    let subset_text = compose_subset_text(&extraction.chars, &config.extra_chars);
    let total_chars = subset_text.chars().count();
    println!("\n  CJK characters: {}", extraction.chars.len());
    println!("  Total characters: {total_chars}\n");

    let parsed = parse_font_pairs(&config.fonts);
    for e in &parsed.rejected {
        eprintln!("  {e}");
    }
    if config.strict && !parsed.rejected.is_empty() {
        bail!("{} invalid font pair(s)", parsed.rejected.len());
    }
    if config.strict {
        let missing = missing_sources(&parsed.pairs, &config.source_dir, &config.output_dir);
        if !missing.is_empty() {
            let list: Vec<_> = missing.iter().map(|p| p.display().to_string()).collect();
            bail!("Source font(s) not found:\n{}", list.join("\n"));
        }
    }
    if config.parallel {
        check_distinct_destinations(&parsed.pairs)?;
    }

    ensure_dir(&config.output_dir)?;

    let outcomes = try_map_ordered(&parsed.pairs, config.parallel, |pair| {
        println!("Processing {}...", pair.source);
        let outcome = run_job(pair, &config.source_dir, &config.output_dir, &subset_text)?;
        match &outcome {
            JobOutcome::Subsetted(report) => {
                println!("{} → {}: {report}", pair.source, pair.destination)
            }
            JobOutcome::Skipped(path) => eprintln!("  Not found: {}", path.display()),
        }
        Ok(outcome)
    })?;

    let mut summary = RunSummary {
        cjk_chars: extraction.chars.len(),
        total_chars,
        subset_text,
        rejected_pairs: parsed.rejected,
        skipped_files: extraction.skipped,
        ..Default::default()
    };
    for (pair, outcome) in parsed.pairs.into_iter().zip(outcomes) {
        match outcome {
            JobOutcome::Subsetted(report) => summary.subsetted.push((pair, report)),
            JobOutcome::Skipped(path) => summary.skipped_jobs.push(path),
        }
    }

    println!("\nDone: {} subset(s) written", summary.subsetted.len());
    Ok(summary)
}

fn missing_sources(pairs: &[FontPair], source_dir: &Path, output_dir: &Path) -> Vec<PathBuf> {
    pairs
        .iter()
        .map(|pair| resolve(pair, source_dir, output_dir).0)
        .filter(|source| !source.exists())
        .map(|source| source.path().to_path_buf())
        .collect()
}

/// Concurrent jobs must not write the same file.
fn check_distinct_destinations(pairs: &[FontPair]) -> Result<()> {
    let mut seen = HashSet::new();
    for pair in pairs {
        if !seen.insert(pair.destination.as_str()) {
            bail!("Destination '{}' is used by more than one font pair", pair.destination);
        }
    }
    Ok(())
}

fn join_lines(reasons: &[SkipReason]) -> String {
    reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_destinations_rejected() {
        let pairs = [FontPair::new("R.otf", "Font.woff2"), FontPair::new("B.otf", "Font.woff2")];
        let err = check_distinct_destinations(&pairs).unwrap_err();
        assert!(err.to_string().contains("Font.woff2"));
        assert!(check_distinct_destinations(&pairs[..1]).is_ok());
    }
}
