// src/discover/loader.rs

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use globset::Glob;
use tracing::{debug, info, warn};

use crate::discover::suite::{TestSuite, suite_name};
use crate::errors::{CmdrunError, Result};
use crate::fs::{FileSystem, walk_files};

/// A discovered suite file: parsed, or the reason it could not be.
#[derive(Debug, Clone)]
pub enum LoadedSuite {
    Loaded(TestSuite),
    Broken { name: String, path: PathBuf, error: String },
}

impl LoadedSuite {
    pub fn path(&self) -> &Path {
        match self {
            LoadedSuite::Loaded(suite) => &suite.path,
            LoadedSuite::Broken { path, .. } => path,
        }
    }
}

/// Find every file under `start_dir` whose *file name* matches `pattern`
/// and parse it as a test suite. Suites are returned sorted by path.
///
/// A file that fails to read or parse is returned as
/// [`LoadedSuite::Broken`] rather than aborting discovery.
pub fn discover_suites(
    fs: &dyn FileSystem,
    start_dir: &Path,
    pattern: &str,
) -> Result<Vec<LoadedSuite>> {
    if !fs.is_dir(start_dir) {
        return Err(CmdrunError::Other(anyhow!(
            "start directory {:?} is not a directory",
            start_dir
        )));
    }

    let matcher = Glob::new(pattern)
        .map_err(|e| CmdrunError::ConfigError(format!("invalid pattern '{pattern}': {e}")))?
        .compile_matcher();

    let files = walk_files(fs, start_dir, |path| {
        path.file_name().is_some_and(|name| matcher.is_match(name))
    })?;

    info!(
        start_dir = %start_dir.display(),
        pattern,
        files = files.len(),
        "discovered suite files"
    );

    Ok(files.into_iter().map(|path| load_suite(fs, path)).collect())
}

fn load_suite(fs: &dyn FileSystem, path: PathBuf) -> LoadedSuite {
    let parsed = fs
        .read_to_string(&path)
        .map_err(CmdrunError::from)
        .and_then(|contents| TestSuite::parse(&path, &contents));

    match parsed {
        Ok(suite) => {
            debug!(path = %path.display(), cases = suite.cases.len(), "loaded suite");
            LoadedSuite::Loaded(suite)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to load suite");
            LoadedSuite::Broken {
                name: suite_name(&path),
                path,
                error: err.to_string(),
            }
        }
    }
}
