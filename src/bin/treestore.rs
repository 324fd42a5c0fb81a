//! Treestore CLI Binary
//!
//! Loads a JSON record list and answers one hierarchy query.

use clap::Parser;
use std::process;
use treestore::logging::init_logging;
use treestore::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    let mut context = match CliContext::from_cli(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let log_file = context.log_file().map(|p| p.to_path_buf());
    if let Err(e) = init_logging(Some(&context.config().logging), log_file) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    if let Some(input) = &cli.input {
        if let Err(e) = context.load_input(input) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
