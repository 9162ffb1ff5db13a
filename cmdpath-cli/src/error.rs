//! CLI-specific error types with exit codes.
//!
//! This module wraps library errors and maps every failure mode to a
//! distinct exit code, so callers can script against the binary.

use std::fmt;

use cmdpath::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// One or more names could not be resolved.
    NotFound(Vec<String>),

    /// Fatal library error (path too long, no working directory, symlink
    /// limit exceeded).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: One or more names not found
    /// - 2: Fatal environment error from the library
    /// - 4: Invalid arguments
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound(_) => 1,
            CliError::Library(_) => 2,
            CliError::InvalidArguments(_) => 4,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound(names) => {
                write!(f, "not found: {}", names.join(", "))
            }
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::NotFound(_) | CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}
