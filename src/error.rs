//! Error types for email filtering
//!
//! Every failure the filter can hit is classified into one of four kinds and
//! carries enough context to print a two-line diagnostic: what happened and
//! what to do about it.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    PermissionDenied,
    DecodingError,
    Unclassified,
}

/// Which side of the run an I/O failure happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => f.write_str("read"),
            Access::Write => f.write_str("write"),
        }
    }
}

/// Errors that can occur while filtering emails out of a file
#[derive(Error, Debug)]
pub enum FilterError {
    /// The input file does not exist
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The process may not read the input or write the output
    #[error("permission denied ({access}): {}", path.display())]
    PermissionDenied {
        path: PathBuf,
        access: Access,
        #[source]
        source: io::Error,
    },

    /// The input is not valid UTF-8 text
    #[error("invalid UTF-8 in {} at byte {offset}", path.display())]
    Decoding {
        path: PathBuf,
        /// Byte offset of the first invalid sequence
        offset: usize,
        /// Best guess at what the file actually is, if detection found one
        guess: Option<&'static str>,
    },

    /// Anything else
    #[error("{message}")]
    Unclassified {
        message: String,
        #[source]
        source: io::Error,
    },
}

impl FilterError {
    /// Classify an I/O error raised while touching `path`
    pub fn from_io(err: io::Error, path: &Path, access: Access) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound if access == Access::Read => FilterError::FileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => FilterError::PermissionDenied {
                path: path.to_path_buf(),
                access,
                source: err,
            },
            _ => FilterError::Unclassified {
                message: format!("can't {} '{}': {}", access, path.display(), err),
                source: err,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::FileNotFound { .. } => ErrorKind::FileNotFound,
            FilterError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            FilterError::Decoding { .. } => ErrorKind::DecodingError,
            FilterError::Unclassified { .. } => ErrorKind::Unclassified,
        }
    }

    /// Primary line of the diagnostic block
    pub fn user_message(&self) -> String {
        match self {
            FilterError::FileNotFound { path } => {
                format!("Error: can't find '{}'", path.display())
            }
            FilterError::PermissionDenied { path, access: Access::Read, .. } => {
                format!("permission error - can't read '{}'", path.display())
            }
            FilterError::PermissionDenied { path, access: Access::Write, .. } => {
                format!("permission error - can't write to '{}'", path.display())
            }
            FilterError::Decoding { path, .. } => {
                format!(
                    "encoding problem with '{}' - might not be a text file",
                    path.display()
                )
            }
            FilterError::Unclassified { message, .. } => {
                format!("something broke: {}", message)
            }
        }
    }

    /// Remediation line of the diagnostic block
    pub fn hint(&self) -> String {
        match self {
            FilterError::FileNotFound { .. } => {
                "check if the file exists and path is right".to_string()
            }
            FilterError::PermissionDenied { .. } => "check file permissions".to_string(),
            FilterError::Decoding { offset, guess: Some(name), .. } => format!(
                "make sure it's a plain UTF-8 text file (bad byte at offset {}, looks like {})",
                offset, name
            ),
            FilterError::Decoding { offset, guess: None, .. } => format!(
                "make sure it's a plain UTF-8 text file (bad byte at offset {})",
                offset
            ),
            FilterError::Unclassified { .. } => "check the file and try again".to_string(),
        }
    }
}

/// Result type for filter operations
pub type Result<T> = std::result::Result<T, FilterError>;
