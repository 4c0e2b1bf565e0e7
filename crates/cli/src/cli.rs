//! CLI definition and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use hanzi_core::{RunConfig, ScanConfig, ScanTarget, default_scan_targets, run};
use log::debug;

#[derive(Debug, Parser)]
#[command(name = "hanzi-subset")]
#[command(about = "Subset CJK fonts to the characters used across site sources and write WOFF2")]
pub struct Cli {
    /// Directory containing the source OTF/TTF fonts
    #[arg(long)]
    pub source: PathBuf,

    /// Output directory for the WOFF2 files
    #[arg(long, default_value = ".")]
    pub output: PathBuf,

    /// Font mappings as SOURCE:DEST (e.g. R.otf:Regular.woff2)
    #[arg(long, required = true, num_args = 1..)]
    pub fonts: Vec<String>,

    /// Site directories to scan; without values nothing is scanned
    /// [default: the tools, lab and newday sites under --root]
    #[arg(long, num_args = 0..)]
    pub scan: Option<Vec<PathBuf>>,

    /// Base directory the default scan targets are resolved against
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Extra characters to include in every subset
    #[arg(long, default_value_t)]
    pub extra_chars: String,

    /// Comma-separated file extensions to scan [default: .html,.js,.jsx,.tsx]
    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Fail on unreadable files, invalid font pairs and missing source fonts
    #[arg(long)]
    pub strict: bool,

    /// Subset fonts concurrently
    #[arg(long)]
    pub parallel: bool,
}

impl Cli {
    pub fn to_config(&self) -> RunConfig {
        let scan_targets = match &self.scan {
            Some(dirs) => dirs.iter().map(ScanTarget::new).collect(),
            None => default_scan_targets(&self.root),
        };
        let scan = if self.extensions.is_empty() {
            ScanConfig::default()
        } else {
            ScanConfig::default().with_extensions(&self.extensions)
        };

        RunConfig {
            source_dir: self.source.clone(),
            output_dir: self.output.clone(),
            fonts: self.fonts.clone(),
            scan_targets,
            scan,
            extra_chars: self.extra_chars.clone(),
            strict: self.strict,
            parallel: self.parallel,
        }
    }

    pub fn run(self) -> Result<()> {
        let config = self.to_config();
        for target in &config.scan_targets {
            debug!("Scan target {} ({})", target.name, target.path.display());
        }
        run(&config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hanzi-subset").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_minimal_args_use_defaults() {
        let cli = parse(&["--source", "/tmp/genwan", "--fonts", "R.otf:Regular.woff2"]);
        assert_eq!(cli.output, PathBuf::from("."));
        assert_eq!(cli.scan, None);
        assert_eq!(cli.extra_chars, "");
        assert!(!cli.strict && !cli.parallel);

        let config = cli.to_config();
        let names: Vec<_> = config.scan_targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["public", "helloruru.github.io", "happy-exit"]);
        assert_eq!(config.scan, ScanConfig::default());
    }

    #[test]
    fn test_multiple_fonts_and_scan_dirs() {
        let cli = parse(&[
            "--source",
            "src",
            "--output",
            "out",
            "--fonts",
            "R.otf:Regular.woff2",
            "SB.otf:SemiBold.woff2",
            "--scan",
            "site-a",
            "site-b",
            "--extra-chars",
            "測試",
        ]);
        assert_eq!(cli.fonts, ["R.otf:Regular.woff2", "SB.otf:SemiBold.woff2"]);
        assert_eq!(cli.scan, Some(vec![PathBuf::from("site-a"), PathBuf::from("site-b")]));
        assert_eq!(cli.extra_chars, "測試");

        let config = cli.to_config();
        assert_eq!(config.scan_targets[0].name, "site-a");
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_scan_without_values_scans_nothing() {
        let cli = parse(&["--source", "s", "--fonts", "a:b", "--scan"]);
        assert_eq!(cli.scan, Some(vec![]));
        assert!(cli.to_config().scan_targets.is_empty());
    }

    #[test]
    fn test_extensions_override() {
        let cli = parse(&["--source", "s", "--fonts", "a:b", "--extensions", "html,vue"]);
        assert_eq!(cli.to_config().scan.extensions, [".html", ".vue"]);
    }

    #[test]
    fn test_fonts_required() {
        assert!(Cli::try_parse_from(["hanzi-subset", "--source", "s"]).is_err());
        assert!(Cli::try_parse_from(["hanzi-subset", "--fonts", "a:b"]).is_err());
    }
}
