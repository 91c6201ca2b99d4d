// src/lib.rs

pub mod cli;
pub mod config;
pub mod discover;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, DiscoverSection, ExecSection, load_or_default};
use crate::discover::{TestResult, discover_and_run};
use crate::errors::CmdrunError;
use crate::exec::CommandRunner;
use crate::fs::RealFileSystem;
use crate::types::ExecutionStyle;

/// High-level entry point used by `main.rs`.
///
/// Returns the process exit code: the child's code for `exec`, and 0/1 for
/// discovery success/failure.
pub async fn run(args: CliArgs) -> Result<i32> {
    let cfg = load_or_default(&args.config)
        .with_context(|| format!("loading config from {}", args.config))?;
    debug!(?cfg, "configuration loaded");

    match args.command {
        Command::Exec { cmd, style, cwd } => {
            let (style, section) = exec_settings(cfg.exec(), style, cwd);
            let runner = CommandRunner::from_config(&section)?;
            Ok(runner.execute(style, &cmd).await?)
        }

        Command::Discover {
            start_dir,
            pattern,
            no_failfast,
            no_buffer,
        } => {
            let overrides = DiscoverOverrides {
                start_dir,
                pattern,
                no_failfast,
                no_buffer,
            };
            let section = overrides.apply(cfg.discover());

            let runner = CommandRunner::from_config(cfg.exec())?;
            let result = run_discovery(section, runner).await?;
            Ok(discovery_exit_code(&result))
        }

        Command::Demo => run_demo(&cfg).await,
    }
}

/// Exit code for an error escaping [`run`]: the child's own code when a
/// checked run failed, 1 otherwise.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CmdrunError>() {
        Some(CmdrunError::NonZeroExit { code, .. }) => *code,
        _ => 1,
    }
}

/// `--style` wins over `[exec].style`; `--cwd` over `[exec].current_dir`.
fn exec_settings(
    section: &ExecSection,
    style: Option<ExecutionStyle>,
    cwd: Option<PathBuf>,
) -> (ExecutionStyle, ExecSection) {
    let mut section = section.clone();
    if cwd.is_some() {
        section.current_dir = cwd;
    }
    let style = style.or(section.style).unwrap_or_default();
    (style, section)
}

/// `cmdrun discover` flags layered over `[discover]`.
///
/// The `--no-*` flags can only switch a setting off.
#[derive(Debug, Default)]
struct DiscoverOverrides {
    start_dir: Option<PathBuf>,
    pattern: Option<String>,
    no_failfast: bool,
    no_buffer: bool,
}

impl DiscoverOverrides {
    fn apply(self, section: &DiscoverSection) -> DiscoverSection {
        let mut section = section.clone();
        if let Some(dir) = self.start_dir {
            section.start_dir = dir;
        }
        if let Some(pattern) = self.pattern {
            section.pattern = pattern;
        }
        section.failfast &= !self.no_failfast;
        section.buffer &= !self.no_buffer;
        section
    }
}

/// Run the demo command under every execution style, then discovery.
///
/// A non-zero exit under the checked style aborts the demo before discovery.
async fn run_demo(cfg: &ConfigFile) -> Result<i32> {
    let runner = CommandRunner::from_config(cfg.exec())?;
    let cmd = &cfg.demo().command;

    for style in ExecutionStyle::ALL {
        println!("\nRunning `{cmd}` ({style})...\n");
        let code = runner.execute(style, cmd).await?;
        info!(%style, exit_code = code, "demo step finished");
    }

    println!("\nRunning test discovery...\n");
    let result = run_discovery(cfg.discover().clone(), runner).await?;
    Ok(discovery_exit_code(&result))
}

async fn run_discovery(section: DiscoverSection, runner: CommandRunner) -> Result<TestResult> {
    let result = tokio::task::spawn_blocking(move || {
        discover_and_run(&RealFileSystem, &section, runner)
    })
    .await??;
    Ok(result)
}

fn discovery_exit_code(result: &TestResult) -> i32 {
    if result.was_successful() { 0 } else { 1 }
}
