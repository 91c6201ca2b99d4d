// src/exec/runner.rs

//! The command runner: one parse-and-resolve routine shared by three
//! execution styles.
//!
//! | style         | model                      | non-zero exit              |
//! |---------------|----------------------------|----------------------------|
//! | `cooperative` | tokio child, awaited       | returned as the exit code  |
//! | `scoped`      | blocking, [`ScopedChild`]  | returned as the exit code  |
//! | `checked`     | blocking, [`ScopedChild`]  | [`CmdrunError::NonZeroExit`] |
//!
//! Every style prints the selected output (stdout if non-empty, else stderr)
//! before returning or failing. The `*_to` variants write it to a caller
//! supplied writer instead of stdout.
//!
//! [`ScopedChild`]: crate::exec::scoped::ScopedChild

use std::io::{self, Write};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ExecSection;
use crate::errors::{CmdrunError, Result};
use crate::exec::command::ParsedCommand;
use crate::exec::options::ExecOptions;
use crate::exec::output::ExecutionResult;
use crate::exec::resolver::{PathResolver, SearchPathResolver};
use crate::exec::{cooperative, scoped};
use crate::types::{ExecutionStyle, ExitPolicy};

#[derive(Debug, Clone)]
pub struct CommandRunner {
    resolver: Arc<dyn PathResolver>,
    options: ExecOptions,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(SearchPathResolver::new())
    }
}

impl CommandRunner {
    pub fn new(resolver: impl PathResolver + 'static) -> Self {
        Self {
            resolver: Arc::new(resolver),
            options: ExecOptions::default(),
        }
    }

    /// Runner wired from an `[exec]` section: its search path (if any)
    /// drives resolution and the rest becomes the pass-through options.
    pub fn from_config(section: &ExecSection) -> Result<Self> {
        let mut resolver = SearchPathResolver::new();
        if let Some(ref paths) = section.search_path {
            resolver = resolver.with_search_path(paths);
        }
        if let Some(ref dir) = section.current_dir {
            resolver = resolver.with_cwd(std::env::current_dir()?.join(dir));
        }
        Ok(Self::new(resolver).with_options(ExecOptions::from(section)))
    }

    pub fn with_options(mut self, options: ExecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn parse(&self, cmd: &str) -> Result<ParsedCommand> {
        ParsedCommand::parse(cmd, self.resolver.as_ref())
    }

    /// Run `cmd` to completion in the scoped style without printing anything.
    pub fn capture(&self, cmd: &str) -> Result<ExecutionResult> {
        let parsed = self.parse(cmd)?;
        scoped::capture(&parsed, &self.options)
    }

    /// Cooperative counterpart of [`CommandRunner::capture`].
    pub async fn capture_async(&self, cmd: &str) -> Result<ExecutionResult> {
        let parsed = self.parse(cmd)?;
        cooperative::capture(&parsed, &self.options).await
    }

    /// Cooperative style. Returns the exit code, zero or not.
    pub async fn exec_async(&self, cmd: &str) -> Result<i32> {
        let result = self.capture_async(cmd).await?;
        finish(cmd, ExecutionStyle::Cooperative, &result, &mut io::stdout())
    }

    pub async fn exec_async_to<W: Write>(&self, cmd: &str, out: &mut W) -> Result<i32> {
        let result = self.capture_async(cmd).await?;
        finish(cmd, ExecutionStyle::Cooperative, &result, out)
    }

    /// Blocking scoped style. Returns the exit code, zero or not.
    pub fn exec_scoped(&self, cmd: &str) -> Result<i32> {
        self.exec_scoped_to(cmd, &mut io::stdout())
    }

    pub fn exec_scoped_to<W: Write>(&self, cmd: &str, out: &mut W) -> Result<i32> {
        let result = self.capture(cmd)?;
        finish(cmd, ExecutionStyle::Scoped, &result, out)
    }

    /// Blocking fail-fast style. A non-zero exit is an error.
    pub fn exec_checked(&self, cmd: &str) -> Result<i32> {
        self.exec_checked_to(cmd, &mut io::stdout())
    }

    /// Like [`CommandRunner::exec_checked`]; the output reaches `out` even
    /// when the call fails with [`CmdrunError::NonZeroExit`].
    pub fn exec_checked_to<W: Write>(&self, cmd: &str, out: &mut W) -> Result<i32> {
        let result = self.capture(cmd)?;
        finish(cmd, ExecutionStyle::Checked, &result, out)
    }

    /// Run `cmd` in the given style from async code.
    ///
    /// The blocking styles are moved onto tokio's blocking pool.
    pub async fn execute(&self, style: ExecutionStyle, cmd: &str) -> Result<i32> {
        match style {
            ExecutionStyle::Cooperative => self.exec_async(cmd).await,
            ExecutionStyle::Scoped | ExecutionStyle::Checked => {
                let runner = self.clone();
                let cmd = cmd.to_string();
                tokio::task::spawn_blocking(move || match style {
                    ExecutionStyle::Checked => runner.exec_checked(&cmd),
                    _ => runner.exec_scoped(&cmd),
                })
                .await
                .map_err(anyhow::Error::from)?
            }
        }
    }
}

fn finish<W: Write>(
    cmd: &str,
    style: ExecutionStyle,
    result: &ExecutionResult,
    out: &mut W,
) -> Result<i32> {
    result.write_to(out)?;

    info!(cmd, %style, exit_code = result.code, "command finished");

    match style.exit_policy() {
        ExitPolicy::FailFast if !result.success() => {
            warn!(cmd, exit_code = result.code, "non-zero exit under fail-fast policy");
            Err(CmdrunError::NonZeroExit {
                cmd: cmd.to_string(),
                code: result.code,
            })
        }
        _ => Ok(result.code),
    }
}

/// [`CommandRunner::exec_async`] with the default search-path resolver.
pub async fn exec_async(cmd: &str) -> Result<i32> {
    CommandRunner::default().exec_async(cmd).await
}

/// [`CommandRunner::exec_scoped`] with the default search-path resolver.
pub fn exec_scoped(cmd: &str) -> Result<i32> {
    CommandRunner::default().exec_scoped(cmd)
}

/// [`CommandRunner::exec_checked`] with the default search-path resolver.
pub fn exec_checked(cmd: &str) -> Result<i32> {
    CommandRunner::default().exec_checked(cmd)
}
