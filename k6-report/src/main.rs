use anyhow::Result;
use clap::Parser;

use k6_report::cli::Cli;

fn main() -> Result<()> {
    k6_report::app::run(Cli::parse())
}
