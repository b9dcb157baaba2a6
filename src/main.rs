//! gridmet-etl CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the
//! extraction, and exit with the status of the run. For programmatic use,
//! prefer the library API (`gridmet_etl::run`).

use clap::Parser;

mod cli;

fn main() {
    let args = cli::CliArgs::parse();
    std::process::exit(cli::run(args));
}
