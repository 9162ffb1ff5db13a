//! Manual path canonicalization.
//!
//! This module resolves a path (absolute or relative) to an absolute,
//! symlink-free canonical form without delegating to `fs::canonicalize`.
//! The algorithm walks the path component by component, maintaining a
//! resolved-so-far buffer:
//!
//! - `.` and empty components contribute nothing
//! - `..` removes the last resolved component (a no-op at the root)
//! - any other component is appended and then checked with a non-following
//!   metadata query; if it names a symlink, the link target is spliced
//!   together with the still-unresolved remainder of the path and the walk
//!   restarts from the beginning of that new working path
//!
//! The result therefore contains no `.`, `..`, or symlink in *any*
//! component, equivalent to a realpath-style canonicalization.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::MAX_PATH_LEN;

/// Maximum number of symlink expansions before resolution gives up.
///
/// The historical algorithm restarted the component walk unboundedly and a
/// symlink cycle never terminated. Expansion is bounded here instead;
/// exceeding the limit reports [`Error::TooManyLinks`].
pub const MAX_SYMLINK_EXPANSIONS: usize = 40;

/// Resolve `path` to an absolute canonical form with all symlinks expanded.
///
/// Relative paths are resolved against the current working directory. The
/// result contains no `.` or `..` components and no symbolic link in any
/// position, so `qualify` is idempotent on its own output.
///
/// Returns `Ok(None)` when `path` does not exist. A metadata query that
/// fails for any other reason is logged as a warning and also yields
/// `Ok(None)`: the single resolution attempt is abandoned, not the process.
///
/// # Errors
///
/// - [`Error::PathTooLong`] if `path`, the resolved result, or a spliced
///   symlink expansion exceeds [`MAX_PATH_LEN`]
/// - [`Error::NoWorkingDirectory`] if `path` is relative and the working
///   directory cannot be determined
/// - [`Error::TooManyLinks`] if expansion restarts more than
///   [`MAX_SYMLINK_EXPANSIONS`] times
///
/// # Examples
///
/// ```
/// use cmdpath::qualify;
///
/// assert_eq!(qualify("/")?.unwrap(), std::path::PathBuf::from("/"));
/// assert_eq!(qualify("/no/such/path/anywhere")?, None);
/// # Ok::<(), cmdpath::Error>(())
/// ```
pub fn qualify(path: &str) -> Result<Option<PathBuf>> {
    if path.len() > MAX_PATH_LEN {
        return Err(Error::PathTooLong {
            path: path.to_string(),
            limit: MAX_PATH_LEN,
        });
    }

    // Bogus paths are rejected up front, before any component work.
    match fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            log::warn!("cannot stat {path}: {e}");
            return Ok(None);
        }
    }

    // Relative paths resolve against the working directory; absolute paths
    // start from an empty buffer and gain their leading separator when the
    // first component is appended. A root working directory also seeds the
    // empty buffer: its bare separator would otherwise double up on the
    // first append.
    let mut resolved = if path.starts_with('/') {
        String::new()
    } else {
        match current_dir_string()? {
            cwd if cwd == "/" => String::new(),
            cwd => cwd,
        }
    };

    let mut working = path.to_string();
    let mut cursor = 0;
    let mut expansions = 0;

    while cursor <= working.len() {
        let rest = &working[cursor..];
        let (component, next) = match rest.find('/') {
            Some(i) => (&rest[..i], cursor + i + 1),
            None => (rest, working.len() + 1),
        };

        let advanced = match component {
            "" | "." => false,
            ".." => {
                // Cannot go above the root: with no separator left this is
                // a no-op.
                if let Some(i) = resolved.rfind('/') {
                    resolved.truncate(i);
                }
                true
            }
            name => {
                resolved.push('/');
                resolved.push_str(name);
                if resolved.len() > MAX_PATH_LEN {
                    return Err(Error::PathTooLong {
                        path: resolved,
                        limit: MAX_PATH_LEN,
                    });
                }
                true
            }
        };
        cursor = next;

        // `..` past the root leaves the buffer empty; nothing to check yet.
        if !advanced || resolved.is_empty() {
            continue;
        }

        let meta = match fs::symlink_metadata(&resolved) {
            Ok(meta) => meta,
            Err(e) => {
                log::warn!("cannot query link status of {resolved}: {e}");
                return Ok(None);
            }
        };

        if meta.file_type().is_symlink() {
            expansions += 1;
            if expansions > MAX_SYMLINK_EXPANSIONS {
                return Err(Error::TooManyLinks {
                    path: working,
                    limit: MAX_SYMLINK_EXPANSIONS,
                });
            }

            let target = match fs::read_link(&resolved) {
                Ok(target) => target,
                Err(e) => {
                    log::warn!("cannot read symlink {resolved}: {e}");
                    return Ok(None);
                }
            };
            let Ok(target) = target.into_os_string().into_string() else {
                log::warn!("symlink target of {resolved} is not valid UTF-8");
                return Ok(None);
            };

            // Splice the target together with the unresolved remainder of
            // the working path, then restart the walk from its beginning.
            let remainder = working.get(cursor..).unwrap_or("");
            let mut spliced = target;
            if !remainder.is_empty() {
                spliced.push('/');
                spliced.push_str(remainder);
            }
            if spliced.len() > MAX_PATH_LEN {
                return Err(Error::PathTooLong {
                    path: spliced,
                    limit: MAX_PATH_LEN,
                });
            }

            if spliced.starts_with('/') {
                // Absolute target: resolution starts over from the root.
                resolved.clear();
            } else if let Some(i) = resolved.rfind('/') {
                // Relative target: resolution continues from the symlink's
                // containing directory.
                resolved.truncate(i);
            }

            working = spliced;
            cursor = 0;
        }
    }

    // An empty buffer means everything collapsed into the root.
    if resolved.is_empty() {
        resolved.push('/');
    }
    Ok(Some(PathBuf::from(resolved)))
}

/// The current working directory as an owned string.
fn current_dir_string() -> Result<String> {
    let cwd = env::current_dir().map_err(|source| Error::NoWorkingDirectory { source })?;
    cwd.into_os_string()
        .into_string()
        .map_err(|_| Error::NoWorkingDirectory {
            source: std::io::Error::new(
                ErrorKind::InvalidData,
                "working directory is not valid UTF-8",
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::Path;
    use tempfile::tempdir;

    fn canonical_str(path: &Path) -> String {
        fs::canonicalize(path)
            .unwrap()
            .into_os_string()
            .into_string()
            .unwrap()
    }

    #[test]
    fn test_qualify_root() {
        assert_eq!(qualify("/").unwrap().unwrap(), PathBuf::from("/"));
    }

    #[test]
    fn test_qualify_nonexistent() {
        assert_eq!(qualify("/no/such/path/xyz").unwrap(), None);
    }

    #[test]
    fn test_qualify_existing_directory() {
        let dir = tempdir().unwrap();
        let canonical = canonical_str(dir.path());

        let result = qualify(&canonical).unwrap().unwrap();
        assert_eq!(result, PathBuf::from(&canonical));
    }

    #[test]
    fn test_qualify_collapses_dot_components() {
        let dir = tempdir().unwrap();
        let base = canonical_str(dir.path());
        fs::create_dir(dir.path().join("a")).unwrap();

        let result = qualify(&format!("{base}/./a/.")).unwrap().unwrap();
        assert_eq!(result, PathBuf::from(format!("{base}/a")));
    }

    #[test]
    fn test_qualify_collapses_parent_components() {
        let dir = tempdir().unwrap();
        let base = canonical_str(dir.path());
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("a").join("b")).unwrap();
        fs::create_dir(dir.path().join("c")).unwrap();

        let result = qualify(&format!("{base}/a/b/../../c")).unwrap().unwrap();
        assert_eq!(result, PathBuf::from(format!("{base}/c")));
    }

    #[test]
    fn test_qualify_parent_of_root_is_root() {
        assert_eq!(qualify("/..").unwrap().unwrap(), PathBuf::from("/"));
        assert_eq!(qualify("/../..").unwrap().unwrap(), PathBuf::from("/"));
    }

    #[test]
    fn test_qualify_adjacent_separators() {
        let dir = tempdir().unwrap();
        let base = canonical_str(dir.path());
        fs::create_dir(dir.path().join("a")).unwrap();

        let result = qualify(&format!("{base}//a//")).unwrap().unwrap();
        assert_eq!(result, PathBuf::from(format!("{base}/a")));
    }

    #[test]
    fn test_qualify_idempotent() {
        let dir = tempdir().unwrap();
        let base = canonical_str(dir.path());
        fs::create_dir(dir.path().join("a")).unwrap();

        let once = qualify(&format!("{base}/./a")).unwrap().unwrap();
        let twice = qualify(once.to_str().unwrap()).unwrap().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_qualify_rejects_long_input() {
        let long = format!("/{}", "x".repeat(MAX_PATH_LEN + 1));
        let err = qualify(&long).unwrap_err();
        assert!(err.is_path_too_long());
    }

    #[test]
    #[serial]
    fn test_qualify_relative_path_uses_working_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let original = env::current_dir().unwrap();
        env::set_current_dir(dir.path()).unwrap();
        let result = qualify("sub");
        env::set_current_dir(original).unwrap();

        let base = canonical_str(dir.path());
        assert_eq!(result.unwrap().unwrap(), PathBuf::from(format!("{base}/sub")));
    }

    #[test]
    #[serial]
    fn test_qualify_relative_path_from_root_directory() {
        // Seeding with a root working directory must not produce a double
        // separator like "//tmp".
        let original = env::current_dir().unwrap();
        env::set_current_dir("/").unwrap();
        let result = qualify("tmp");
        env::set_current_dir(original).unwrap();

        let resolved = result.unwrap().unwrap();
        assert!(!resolved.to_str().unwrap().contains("//"));
        assert_eq!(resolved, fs::canonicalize("/tmp").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_qualify_follows_absolute_symlink() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let base = canonical_str(dir.path());
        let target = dir.path().join("target");
        fs::create_dir(&target).unwrap();
        symlink(format!("{base}/target"), dir.path().join("link")).unwrap();

        let result = qualify(&format!("{base}/link")).unwrap().unwrap();
        assert_eq!(result, PathBuf::from(format!("{base}/target")));
    }

    #[cfg(unix)]
    #[test]
    fn test_qualify_follows_relative_symlink() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let base = canonical_str(dir.path());
        fs::create_dir(dir.path().join("target")).unwrap();
        symlink("target", dir.path().join("link")).unwrap();

        let result = qualify(&format!("{base}/link")).unwrap().unwrap();
        assert_eq!(result, PathBuf::from(format!("{base}/target")));
    }

    #[cfg(unix)]
    #[test]
    fn test_qualify_resolves_symlink_in_intermediate_component() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let base = canonical_str(dir.path());
        fs::create_dir_all(dir.path().join("real").join("sub")).unwrap();
        symlink("real", dir.path().join("alias")).unwrap();

        let result = qualify(&format!("{base}/alias/sub")).unwrap().unwrap();
        assert_eq!(result, PathBuf::from(format!("{base}/real/sub")));
    }

    #[cfg(unix)]
    #[test]
    fn test_qualify_symlink_chain_fully_recanonicalized() {
        use std::os::unix::fs::symlink;

        // outer -> inner -> target: the final result must contain neither
        // link, even though the first target is itself a symlink.
        let dir = tempdir().unwrap();
        let base = canonical_str(dir.path());
        fs::create_dir(dir.path().join("target")).unwrap();
        symlink(format!("{base}/target"), dir.path().join("inner")).unwrap();
        symlink(format!("{base}/inner"), dir.path().join("outer")).unwrap();

        let result = qualify(&format!("{base}/outer")).unwrap().unwrap();
        assert_eq!(result, PathBuf::from(format!("{base}/target")));
    }

    #[cfg(unix)]
    #[test]
    fn test_qualify_symlink_with_parent_component_after_it() {
        use std::os::unix::fs::symlink;

        // alias/../c: the lexical `..` applies after the symlink has been
        // expanded, so it cancels the expanded component.
        let dir = tempdir().unwrap();
        let base = canonical_str(dir.path());
        fs::create_dir(dir.path().join("real")).unwrap();
        fs::create_dir(dir.path().join("c")).unwrap();
        symlink("real", dir.path().join("alias")).unwrap();

        let result = qualify(&format!("{base}/alias/../c")).unwrap().unwrap();
        assert_eq!(result, PathBuf::from(format!("{base}/c")));
    }

    #[cfg(unix)]
    #[test]
    fn test_qualify_detects_symlink_cycle() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let base = canonical_str(dir.path());
        symlink(format!("{base}/link2"), dir.path().join("link1")).unwrap();
        symlink(format!("{base}/link1"), dir.path().join("link2")).unwrap();

        // The entry stat itself fails with ELOOP, which is not ENOENT, so
        // the attempt is abandoned without a crash.
        let result = qualify(&format!("{base}/link1")).unwrap();
        assert_eq!(result, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_qualify_expansion_count_within_bounds() {
        use std::os::unix::fs::symlink;

        // A path traversing many distinct symlinks stays within the
        // expansion limit and resolves normally.
        let dir = tempdir().unwrap();
        let base = canonical_str(dir.path());
        fs::create_dir(dir.path().join("d0")).unwrap();
        for i in 1..=10 {
            let dir_name = format!("d{i}");
            fs::create_dir(dir.path().join(&dir_name)).unwrap();
            symlink(format!("{base}/{dir_name}"), dir.path().join(format!("l{i}"))).unwrap();
        }

        let mut joined = base.clone();
        for i in 1..=10 {
            joined.push_str(&format!("/l{i}/.."));
        }
        joined.push_str("/d0");

        let result = qualify(&joined).unwrap().unwrap();
        assert_eq!(result, PathBuf::from(format!("{base}/d0")));
    }

    #[test]
    fn test_qualify_empty_string_not_found() {
        assert_eq!(qualify("").unwrap(), None);
    }
}
