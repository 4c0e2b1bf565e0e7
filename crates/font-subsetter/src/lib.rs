//! Text-driven font subsetting wrapper around hb-subset with builder pattern.
//!
//! This crate provides a high-level interface for subsetting fonts using HarfBuzz's
//! hb-subset library. A subset is described by the characters it must be able to
//! render; glyph closure (composites, GSUB/GPOS dependencies) is left to HarfBuzz.
//! It operates purely on byte slices with no file I/O dependencies.
//!
//! # Example
//!
//! ```no_run
//! use hanzi_font_subsetter::Subsetter;
//!
//! let font_data: &[u8] = &[];
//! let subset = Subsetter::web().with_chars("測試 ABC".chars()).subset(font_data);
//! ```

use std::collections::BTreeSet;

use anyhow::{Context, Result, bail};
use hb_subset::{Blob, FontFace, SubsetInput, Tag};

/// Layout features to retain during subsetting.
///
/// Covers the features CJK body text relies on in browsers: contextual
/// composition, localized forms, vertical alternates, proportional and
/// half-width punctuation spacing, kerning and mark positioning.
pub const LAYOUT_FEATURES: &[&[u8; 4]] = &[
    b"ccmp", b"locl", b"liga", b"calt", b"kern", b"mark", b"mkmk", b"vert", b"vrt2", b"halt",
    b"vhal", b"palt", b"vpal", b"fwid", b"hwid", b"pwid",
];

/// Font subsetter with builder pattern.
///
/// Provides a flexible way to configure font subsetting options before
/// performing the subset operation.
#[derive(Debug, Default)]
pub struct Subsetter {
    chars: BTreeSet<char>,
    desubroutinize: bool,
    layout_features: Vec<[u8; 4]>,
}

impl Subsetter {
    /// Creates a new subsetter with default settings.
    ///
    /// Default settings use the standard [`LAYOUT_FEATURES`] and keep CFF
    /// subroutines. Glyph names are dropped.
    pub fn new() -> Self {
        Self {
            layout_features: LAYOUT_FEATURES.iter().map(|f| **f).collect(),
            ..Default::default()
        }
    }

    /// Creates a subsetter pre-configured for web font output.
    ///
    /// Desubroutinizes CFF charstrings, which lets the WOFF2 Brotli pass
    /// compress the outlines better than the subroutinized form.
    pub fn web() -> Self {
        Self { desubroutinize: true, ..Self::new() }
    }

    /// Adds characters to the subset. Repeats are collapsed; order is irrelevant.
    pub fn with_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.chars.extend(chars);
        self
    }

    /// Subsets the font data and returns the result as an sfnt (TTF/OTF).
    ///
    /// Fails when no characters were requested or when HarfBuzz rejects the
    /// font data.
    pub fn subset(&self, data: &[u8]) -> Result<Vec<u8>> {
        if self.chars.is_empty() {
            bail!("No characters requested for subset");
        }

        let mut input = SubsetInput::new()?;

        if self.desubroutinize {
            input.flags().desubroutinize();
        }

        {
            let mut feature_set = input.layout_feature_tag_set();
            for tag in &self.layout_features {
                feature_set.insert(Tag::new(tag));
            }
        }

        {
            let mut unicode_set = input.unicode_set();
            for c in &self.chars {
                unicode_set.insert(*c);
            }
        }

        let blob = Blob::from_bytes(data).context("Failed to load font data")?;
        let font = FontFace::new(blob).context("Failed to parse font face")?;
        let subset_font = input.subset_font(&font).context("HarfBuzz subsetting failed")?;
        Ok(subset_font.underlying_blob().to_vec())
    }
}
