//! Command-line interface definition for email-filter
//!
//! Every flag is optional: with no arguments the tool reads
//! `input_files/beforetext.txt` and writes `output_files/aftertext.txt`.

use clap::Parser;
use std::path::PathBuf;

/// Default input path, relative to the working directory
pub const DEFAULT_INPUT: &str = "input_files/beforetext.txt";

/// Default output path, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "output_files/aftertext.txt";

/// Extract unique email addresses from a text file
///
/// Emails are written to the output file as a single comma-separated line,
/// in the order they first appear in the input.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "email-filter",
    author = "m0h1nd4",
    version,
    about = "Extract unique email addresses from a text file",
    long_about = r#"
Scan a UTF-8 text file for email addresses and save the unique ones, in
first-seen order, as a single ", "-separated line.

If no emails are found the output file is left untouched.

EXAMPLES:
    # Use the default paths
    email-filter

    # Pick the files explicitly
    email-filter -i contacts.txt -o cleaned/emails.txt

EXIT STATUS:
    0  the file was scanned (including when no emails were found)
    1  the run failed; the reason is printed above
"#
)]
pub struct Args {
    /// Input text file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output file (parent directories are created as needed)
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Quiet mode - only print errors
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Log level implied by the quiet/verbose flags
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Warn
        }
    }
}
