//! # Email Filter
//!
//! Pull email addresses out of messy text files.
//!
//! ## Features
//!
//! - **Extraction**: finds `local@domain.tld`-shaped substrings with a fixed pattern
//! - **Deduplication**: keeps the first occurrence of each address (case-sensitive)
//! - **Output**: one `", "`-joined line, parent directories created as needed
//! - **Diagnostics**: every failure ends in a message and a hint, never a crash
//!
//! ## Usage
//!
//! ```bash
//! # Read input_files/beforetext.txt, write output_files/aftertext.txt
//! email-filter
//!
//! # Explicit paths
//! email-filter -i contacts.txt -o cleaned/emails.txt
//! ```
//!
//! ## Example
//!
//! ```rust
//! use email_filter::extract::extract_emails;
//!
//! let emails = extract_emails("mail alice@example.com, cc alice@example.com and bob@example.org");
//! assert_eq!(emails, vec!["alice@example.com", "bob@example.org"]);
//! ```
//!
//! ```rust,no_run
//! use email_filter::processor::{Processor, ProcessorConfig};
//!
//! let config = ProcessorConfig::new("input_files/beforetext.txt", "output_files/aftertext.txt");
//! let count = Processor::new(config).run();
//! ```

pub mod cli;
pub mod dedup;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod output;
pub mod processor;
pub mod progress;

pub use cli::Args;
pub use error::{ErrorKind, FilterError};
pub use processor::{filter_emails_from_file, run_email_filter, Processor, ProcessorConfig};
