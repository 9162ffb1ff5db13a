#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # cmdpath
//!
//! A library for resolving a command name into an absolute, canonicalized,
//! symlink-free filesystem path.
//!
//! When the name is a bare command (no `/`), the colon-separated `PATH`
//! environment value is searched left to right for an executable candidate.
//! When the name already contains a separator it is canonicalized directly.
//! Either way the result is an absolute path with no `.`, `..`, or symbolic
//! link components.
//!
//! This crate targets Unix path semantics only.
//!
//! ## Core Types
//!
//! - [`PathSearcher`] and [`find_path`]: search-path lookup
//! - [`qualify`]: standalone path canonicalization
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use cmdpath::PathSearcher;
//!
//! let searcher = PathSearcher::new();
//! if let Some(path) = searcher.find_path("ls")? {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), cmdpath::Error>(())
//! ```

pub mod error;
pub mod logging;
pub mod qualify;
pub mod search;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use qualify::{qualify, MAX_SYMLINK_EXPANSIONS};
pub use search::{find_path, PathSearcher};

/// Maximum length, in bytes, accepted for any input path or produced for any
/// resolved path.
///
/// Inputs longer than this limit do not fail silently or truncate: both
/// [`find_path`] and [`qualify`] report [`Error::PathTooLong`]
/// deterministically. The same limit applies to intermediate results built
/// during canonicalization, such as a symlink target spliced together with
/// the unresolved remainder of a path.
pub const MAX_PATH_LEN: usize = 4096;
