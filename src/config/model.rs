// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::types::ExecutionStyle;

/// Configuration as read from `Cmdrun.toml`, before validation.
///
/// ```toml
/// [exec]
/// style = "checked"
/// current_dir = "."
/// search_path = "/usr/local/bin:/usr/bin:/bin"
///
/// [exec.env]
/// LANG = "C"
///
/// [discover]
/// start_dir = "test"
/// pattern = "*_test.toml"
///
/// [demo]
/// command = "cargo test --quiet"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub exec: ExecSection,

    #[serde(default)]
    pub discover: DiscoverSection,

    #[serde(default)]
    pub demo: DemoSection,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    exec: ExecSection,
    discover: DiscoverSection,
    demo: DemoSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        exec: ExecSection,
        discover: DiscoverSection,
        demo: DemoSection,
    ) -> Self {
        Self {
            exec,
            discover,
            demo,
        }
    }

    pub fn exec(&self) -> &ExecSection {
        &self.exec
    }

    pub fn discover(&self) -> &DiscoverSection {
        &self.discover
    }

    pub fn demo(&self) -> &DemoSection {
        &self.demo
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let raw = RawConfigFile::default();
        Self::new_unchecked(raw.exec, raw.discover, raw.demo)
    }
}

/// `[exec]` section: pass-through process configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecSection {
    /// Style used by `cmdrun exec` when `--style` is not given.
    #[serde(default)]
    pub style: Option<ExecutionStyle>,

    /// Working directory for every child.
    #[serde(default)]
    pub current_dir: Option<PathBuf>,

    /// Extra environment variables for every child.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Start children from an empty environment (plus `env`).
    #[serde(default)]
    pub clear_env: bool,

    /// `PATH`-style list searched instead of the process `PATH`.
    #[serde(default)]
    pub search_path: Option<String>,
}

/// `[discover]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverSection {
    #[serde(default = "default_start_dir")]
    pub start_dir: PathBuf,

    /// Glob matched against file names, e.g. `*_test.toml`.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Stop at the first failing or erroring case.
    #[serde(default = "default_true")]
    pub failfast: bool,

    /// Hold case output and only show it for cases that did not pass.
    #[serde(default = "default_true")]
    pub buffer: bool,
}

fn default_start_dir() -> PathBuf {
    PathBuf::from("test")
}

fn default_pattern() -> String {
    "*_test.toml".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DiscoverSection {
    fn default() -> Self {
        Self {
            start_dir: default_start_dir(),
            pattern: default_pattern(),
            failfast: true,
            buffer: true,
        }
    }
}

/// `[demo]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemoSection {
    /// Command run once per execution style by `cmdrun demo`.
    #[serde(default = "default_demo_command")]
    pub command: String,
}

fn default_demo_command() -> String {
    "cargo test --quiet".to_string()
}

impl Default for DemoSection {
    fn default() -> Self {
        Self {
            command: default_demo_command(),
        }
    }
}
