//! mdtoolkit CLI: batch HTML to Markdown conversion and Markdown merging.
//!
//! `convert` hands each HTML file to a converter backend; `merge` concatenates
//! a directory of Markdown files into fixed-size merged documents.

mod commands;
mod progress;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
