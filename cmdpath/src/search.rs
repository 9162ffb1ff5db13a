//! Executable lookup on the search path.
//!
//! Given a bare command name, [`PathSearcher`] walks the colon-separated
//! search-path value left to right, builds `dir/name` candidates, and tests
//! each for existence and any execute permission bit. The first executable
//! candidate wins and is handed to [`qualify`] for canonicalization. A name
//! that already contains a separator bypasses the search entirely.
//!
//! An empty token or a lone `.` in the search path means the current
//! directory. It is deliberately checked *last*, after every other token,
//! regardless of where it appears. (Sneakier spellings such as `./` or
//! `.//` are not recognized as the current directory and are probed in
//! place like any other token.)

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::qualify::qualify;
use crate::MAX_PATH_LEN;

/// Searches the search-path value for executable commands.
///
/// The searcher owns a private copy of the search-path string, taken once
/// at construction. Concurrent mutation of the process environment cannot
/// corrupt a search in progress.
///
/// # Examples
///
/// ```no_run
/// use cmdpath::PathSearcher;
///
/// let searcher = PathSearcher::new();
/// match searcher.find_path("ls")? {
///     Some(path) => println!("{}", path.display()),
///     None => eprintln!("not found"),
/// }
/// # Ok::<(), cmdpath::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PathSearcher {
    search_path: Option<String>,
}

impl PathSearcher {
    /// Creates a searcher over the process's `PATH` environment value.
    ///
    /// An absent (or non-Unicode) `PATH` is remembered as "no search path":
    /// every bare-name lookup then reports not found without probing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            search_path: env::var("PATH").ok(),
        }
    }

    /// Creates a searcher over an explicit search-path string.
    ///
    /// This is the injection seam for callers that want lookup semantics
    /// independent of the process environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdpath::PathSearcher;
    ///
    /// let searcher = PathSearcher::with_search_path("/usr/bin:/bin");
    /// ```
    pub fn with_search_path(search_path: impl Into<String>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    /// Finds the full canonical pathname for a command.
    ///
    /// A `command` containing `/` is treated as already qualified and goes
    /// straight to [`qualify`]; otherwise each search-path token is probed
    /// in order and the first candidate that exists with any execute bit
    /// set (owner, group, or other) is canonicalized and returned.
    ///
    /// Returns `Ok(None)` when nothing matches. Candidates that do not
    /// exist are skipped silently; a metadata query failing for any other
    /// reason is logged as a warning and the search continues.
    ///
    /// The returned path existed and was executable at the moment of the
    /// check. The filesystem may change afterwards; guarding that race is
    /// the caller's concern.
    ///
    /// # Errors
    ///
    /// - [`Error::PathTooLong`] if `command` or a `dir/name` candidate
    ///   exceeds [`MAX_PATH_LEN`]
    /// - any error of [`qualify`] for the matched candidate
    pub fn find_path(&self, command: &str) -> Result<Option<PathBuf>> {
        if command.len() > MAX_PATH_LEN {
            return Err(Error::PathTooLong {
                path: command.to_string(),
                limit: MAX_PATH_LEN,
            });
        }

        if command.contains('/') {
            return qualify(command);
        }

        let Some(search_path) = &self.search_path else {
            return Ok(None);
        };

        let mut check_dot = false;
        for dir in search_path.split(':') {
            if dir.is_empty() || dir == "." {
                check_dot = true;
                continue;
            }

            let candidate = format!("{dir}/{command}");
            if candidate.len() > MAX_PATH_LEN {
                return Err(Error::PathTooLong {
                    path: candidate,
                    limit: MAX_PATH_LEN,
                });
            }

            log::debug!("probing candidate {candidate}");
            match probe(&candidate) {
                Probe::Executable => return qualify(&candidate),
                Probe::Missing => {}
                Probe::Failed(e) => {
                    log::warn!("cannot stat {candidate}: {e}");
                }
            }
        }

        // The current directory, if it appeared anywhere in the search
        // path, is checked only after everything else failed.
        if check_dot {
            let candidate = format!("./{command}");
            log::debug!("probing candidate {candidate}");
            match probe(&candidate) {
                Probe::Executable => return qualify(&candidate),
                Probe::Missing => {}
                Probe::Failed(e) => {
                    log::warn!("cannot stat {candidate}: {e}");
                    return Ok(None);
                }
            }
        }

        Ok(None)
    }
}

impl Default for PathSearcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of probing a single candidate path.
enum Probe {
    /// Exists with at least one execute bit set.
    Executable,
    /// Does not exist, is not executable, or sits under a non-directory
    /// component; the search moves on silently.
    Missing,
    /// The metadata query failed for an unexpected reason.
    Failed(std::io::Error),
}

fn probe(candidate: &str) -> Probe {
    match fs::metadata(candidate) {
        Ok(meta) if meta.permissions().mode() & 0o111 != 0 => Probe::Executable,
        Ok(_) => Probe::Missing,
        Err(e) => match e.kind() {
            ErrorKind::NotFound | ErrorKind::NotADirectory | ErrorKind::InvalidInput => {
                Probe::Missing
            }
            _ => Probe::Failed(e),
        },
    }
}

/// Finds the full canonical pathname for a command using the process's
/// current `PATH` value.
///
/// The search-path value is re-read on every call. See
/// [`PathSearcher::find_path`] for semantics.
///
/// # Errors
///
/// See [`PathSearcher::find_path`].
///
/// # Examples
///
/// ```no_run
/// use cmdpath::find_path;
///
/// if let Some(path) = find_path("ls")? {
///     println!("{}", path.display());
/// }
/// # Ok::<(), cmdpath::Error>(())
/// ```
pub fn find_path(command: &str) -> Result<Option<PathBuf>> {
    PathSearcher::new().find_path(command)
}
