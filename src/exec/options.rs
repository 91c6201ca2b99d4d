// src/exec/options.rs

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use crate::config::ExecSection;

/// Pass-through process configuration.
///
/// The runner does not interpret these; they are applied verbatim to every
/// child it creates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    pub current_dir: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
    pub clear_env: bool,
}

impl ExecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn clear_env(mut self, clear: bool) -> Self {
        self.clear_env = clear;
        self
    }

    pub fn apply(&self, cmd: &mut Command) {
        if self.clear_env {
            cmd.env_clear();
        }
        cmd.envs(&self.env);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
    }
}

impl From<&ExecSection> for ExecOptions {
    fn from(section: &ExecSection) -> Self {
        Self {
            current_dir: section.current_dir.clone(),
            env: section.env.clone(),
            clear_env: section.clear_env,
        }
    }
}
