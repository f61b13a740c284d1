//! Email Filter - extract unique email addresses from a text file
//!
//! Main entry point for the command-line application.

use anyhow::Context;
use clap::Parser;
use colored::*;
use std::process;

use email_filter::cli::Args;
use email_filter::processor::{run_email_filter, ProcessorConfig};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // A count (even zero) is success; no result means a reported failure
    match run(&args) {
        Ok(Some(_)) => process::exit(0),
        Ok(None) => process::exit(1),
        Err(e) => {
            eprintln!("  {} {}", "✖".red(), format!("{}", e).red());

            // Print chain of errors
            for cause in e.chain().skip(1) {
                eprintln!("  {} {}", "✖".red(), format!("  Caused by: {}", cause).red());
            }

            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<Option<usize>> {
    init_logging(args)?;

    let config = ProcessorConfig::from_args(args);
    Ok(run_email_filter(config))
}

/// Set up logging; RUST_LOG still wins when set
fn init_logging(args: &Args) -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .try_init()
        .context("failed to initialise logging")
}
