//! demandcast CLI entry point
//!
//! A minimal entrypoint that parses CLI arguments, dispatches to the CLI
//! module, prints errors to stderr, and exits non-zero on failure. All
//! startup logic lives in the cli module.

use demandcast::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
