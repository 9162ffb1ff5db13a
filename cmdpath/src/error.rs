//! Error types for the cmdpath library.
//!
//! This module provides the error hierarchy for search and canonicalization
//! operations, using `thiserror` for ergonomic error handling.
//!
//! Only unrecoverable conditions are errors. A command that cannot be found
//! is not an error: both [`crate::find_path`] and [`crate::qualify`] express
//! that outcome as `Ok(None)`. A metadata query that fails for a transient
//! reason (permission denied on an intermediate directory, for example) is
//! logged as a warning and degrades to a skipped candidate or an absent
//! result, never to an `Err`.

use std::io;

use thiserror::Error;

/// Result type alias for operations that may fail with a cmdpath error.
///
/// # Examples
///
/// ```
/// use cmdpath::{Error, Result};
///
/// fn example_operation() -> Result<Option<std::path::PathBuf>> {
///     Ok(None)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the cmdpath library.
///
/// Each variant represents a condition under which no further progress is
/// possible for the whole operation. The original design terminated the
/// process on these conditions; here they are surfaced as typed errors so
/// the top-level caller decides whether to terminate.
#[derive(Debug, Error)]
pub enum Error {
    /// A path exceeds the maximum supported length.
    ///
    /// Raised for over-long inputs, for a `dir/name` candidate built during
    /// search, and for a working path rebuilt during symlink expansion.
    #[error("path too long ({} bytes, limit {limit}): {path}", path.len())]
    PathTooLong {
        /// The offending path.
        path: String,
        /// The maximum length that was exceeded.
        limit: usize,
    },

    /// The current working directory could not be determined.
    ///
    /// Canonicalizing a relative path requires the working directory as the
    /// starting point; without it the operation cannot proceed.
    #[error("cannot determine working directory: {source}")]
    NoWorkingDirectory {
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Symlink expansion restarted more times than the configured limit.
    ///
    /// Almost always indicates a symlink cycle somewhere in the path.
    #[error("too many levels of symbolic links (limit {limit}): {path}")]
    TooManyLinks {
        /// The working path at the point the limit was hit.
        path: String,
        /// The maximum number of expansions allowed.
        limit: usize,
    },
}

impl Error {
    /// Check if the error is the long-path condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdpath::Error;
    ///
    /// let err = Error::PathTooLong { path: "/a".repeat(3000), limit: 4096 };
    /// assert!(err.is_path_too_long());
    /// ```
    #[must_use]
    pub fn is_path_too_long(&self) -> bool {
        matches!(self, Self::PathTooLong { .. })
    }

    /// Check if the error indicates a suspected symlink cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdpath::Error;
    ///
    /// let err = Error::TooManyLinks { path: "/loop".to_string(), limit: 40 };
    /// assert!(err.is_too_many_links());
    /// ```
    #[must_use]
    pub fn is_too_many_links(&self) -> bool {
        matches!(self, Self::TooManyLinks { .. })
    }
}
