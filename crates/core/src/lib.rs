//! Hanzi Core - scan site sources for CJK characters and build subset web fonts.

pub mod config;
pub mod extract;
pub mod io;
pub mod job;
pub mod pairs;
pub mod parallel;
pub mod pipeline;
pub mod scan;

pub use config::{BASE_CHARS, ScanConfig, ScanTarget, default_scan_targets};
pub use extract::{CharSet, Extraction, compose_subset_text, extract_cjk_chars, is_cjk};
pub use hanzi_font_subsetter::Subsetter;
pub use hanzi_font_woff2::convert_to_woff2;
pub use pairs::{FontPair, PairError, parse_font_pairs};
pub use pipeline::{RunConfig, RunSummary, run};
