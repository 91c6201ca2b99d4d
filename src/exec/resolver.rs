// src/exec/resolver.rs

//! Executable lookup.
//!
//! Resolution is an injected capability: the runner never consults the
//! process `PATH` directly, it asks a [`PathResolver`]. Production code uses
//! [`SearchPathResolver`]; tests can substitute a table-driven fake.

use std::ffi::OsString;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, trace};

/// Turns a bare program name into a filesystem path.
pub trait PathResolver: Send + Sync + Debug {
    /// Return the path of `program`, or `None` if it cannot be found.
    fn resolve(&self, program: &str) -> Option<PathBuf>;
}

impl<T: PathResolver + ?Sized> PathResolver for Arc<T> {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        (**self).resolve(program)
    }
}

/// Resolver backed by the `which` crate.
///
/// Without an explicit search path this consults the process `PATH`. Names
/// that contain a path separator are checked directly (relative to the
/// working directory) rather than searched for.
#[derive(Debug, Clone, Default)]
pub struct SearchPathResolver {
    search_path: Option<OsString>,
    cwd: Option<PathBuf>,
}

impl SearchPathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `paths` (a `PATH`-style list) instead of the process `PATH`.
    pub fn with_search_path(mut self, paths: impl Into<OsString>) -> Self {
        self.search_path = Some(paths.into());
        self
    }

    /// Directory used to anchor names such as `./script.sh`.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

impl PathResolver for SearchPathResolver {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        if program.is_empty() {
            return None;
        }

        let found = match (&self.search_path, &self.cwd) {
            (None, None) => which::which(program),
            (paths, cwd) => {
                let cwd = match cwd {
                    Some(cwd) => cwd.clone(),
                    None => std::env::current_dir().ok()?,
                };
                let paths = paths.clone().or_else(|| std::env::var_os("PATH"));
                which::which_in(program, paths, cwd)
            }
        };

        match found {
            Ok(path) => {
                trace!(program, path = %path.display(), "resolved executable");
                Some(path)
            }
            Err(err) => {
                debug!(program, error = %err, "executable lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_never_resolves() {
        assert!(SearchPathResolver::new().resolve("").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn resolves_sh_to_an_absolute_path() {
        let path = SearchPathResolver::new().resolve("sh").expect("sh on PATH");
        assert!(path.is_absolute());
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("sh"));
    }

    #[test]
    fn explicit_search_path_limits_lookup() {
        let dir = std::env::temp_dir().join("cmdrun-empty-search-path");
        let resolver = SearchPathResolver::new().with_search_path(dir.into_os_string());
        assert!(resolver.resolve("sh").is_none());
    }
}
