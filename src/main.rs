//! shapecheck CLI entry point
//!
//! main.rs only parses arguments, dispatches to the CLI commands and
//! maps failures to exit codes. It never calls the engine directly.

use std::process;

use shapecheck::cli::{run_command, Cli};

fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = run_command(cli.command) {
        if e.needs_report() {
            eprintln!("error: {}", e);
        }
        process::exit(e.exit_code());
    }
}
