//! CDRKIT CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, build the requested
//! template, and write it out. For programmatic use, prefer the library API
//! (`cdrkit::api`).

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
