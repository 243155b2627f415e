//! CLI entry point for the seeded tile mosaic generator

use clap::Parser;
use seedmosaic::io::cli::{Cli, MosaicProcessor};
use seedmosaic::io::logging;

fn main() -> seedmosaic::Result<()> {
    let cli = Cli::parse();
    let mut processor = MosaicProcessor::new(cli)?;
    logging::init(processor.log_level(), processor.progress_handle());
    processor.process()?;
    Ok(())
}
