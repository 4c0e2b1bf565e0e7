//! `SOURCE:DEST` font pair tokens.

use std::{fmt, str::FromStr};

/// Separator between source and destination file names.
pub const PAIR_SEPARATOR: char = ':';

/// One subsetting job: a source font file name and a destination file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontPair {
    pub source: String,
    pub destination: String,
}

impl FontPair {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self { source: source.into(), destination: destination.into() }
    }
}

impl fmt::Display for FontPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PAIR_SEPARATOR}{}", self.source, self.destination)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairError {
    #[error("Invalid font pair '{token}': expected SOURCE:DEST, found {parts} part(s)")]
    PartCount { token: String, parts: usize },

    #[error("Invalid font pair '{token}': source and destination must not be empty")]
    EmptyName { token: String },
}

impl FromStr for FontPair {
    type Err = PairError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = token.split(PAIR_SEPARATOR).collect();
        let [source, destination] = parts.as_slice() else {
            return Err(PairError::PartCount { token: token.to_string(), parts: parts.len() });
        };
        if source.is_empty() || destination.is_empty() {
            return Err(PairError::EmptyName { token: token.to_string() });
        }
        Ok(Self::new(*source, *destination))
    }
}

/// Valid pairs in input order, plus the tokens that were rejected.
#[derive(Debug, Default)]
pub struct ParsedPairs {
    pub pairs: Vec<FontPair>,
    pub rejected: Vec<PairError>,
}

/// Parse every token; malformed tokens are collected rather than failing the batch.
pub fn parse_font_pairs(tokens: &[impl AsRef<str>]) -> ParsedPairs {
    let mut parsed = ParsedPairs::default();
    for token in tokens {
        match token.as_ref().parse() {
            Ok(pair) => parsed.pairs.push(pair),
            Err(e) => parsed.rejected.push(e),
        }
    }
    parsed
}
