use anyhow::Result;
use clap::Parser;
use env_logger::init;
use hanzi_subset_cli::cli::Cli;

fn main() -> Result<()> {
    init();
    Cli::parse().run()
}
