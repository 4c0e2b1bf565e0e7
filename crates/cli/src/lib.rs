//! Hanzi subset CLI library.

pub mod cli;
