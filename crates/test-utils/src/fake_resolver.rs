use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use cmdrun::exec::{PathResolver, SearchPathResolver};

/// A resolver driven by a fixed table instead of `PATH`.
///
/// Every lookup is recorded so tests can assert on what the runner asked for.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    table: HashMap<String, PathBuf>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, program: &str, path: impl AsRef<Path>) -> Self {
        self.table
            .insert(program.to_string(), path.as_ref().to_path_buf());
        self
    }

    /// Map `alias` to wherever `real` lives on the host `PATH`.
    ///
    /// Panics if `real` is not installed.
    pub fn alias(self, alias: &str, real: &str) -> Self {
        let path = SearchPathResolver::new()
            .resolve(real)
            .unwrap_or_else(|| panic!("'{real}' not found on PATH"));
        self.with(alias, path)
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl PathResolver for StaticResolver {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        self.lookups.lock().unwrap().push(program.to_string());
        self.table.get(program).cloned()
    }
}
