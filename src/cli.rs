// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::ExecutionStyle;

/// Command-line arguments for `cmdrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cmdrun",
    version,
    about = "Run commands without a shell and capture their output; discover and run test suites.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Cmdrun.toml` in the current working directory. A missing
    /// default file means built-in defaults.
    #[arg(long, value_name = "PATH", default_value = "Cmdrun.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CMDRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run one command and exit with its exit code.
    Exec {
        /// Space-delimited command; no quoting or shell syntax.
        #[arg(value_name = "CMD")]
        cmd: String,

        /// Overrides `[exec].style`; `scoped` if neither is set.
        #[arg(long, value_enum)]
        style: Option<ExecutionStyle>,

        /// Working directory for the child (overrides `[exec].current_dir`).
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,
    },

    /// Discover test suites and run them.
    Discover {
        /// Overrides `[discover].start_dir`.
        #[arg(long, value_name = "DIR")]
        start_dir: Option<PathBuf>,

        /// Overrides `[discover].pattern`.
        #[arg(long, value_name = "GLOB")]
        pattern: Option<String>,

        /// Keep going after the first failing case.
        #[arg(long)]
        no_failfast: bool,

        /// Show case output as it is produced instead of only for failures.
        #[arg(long)]
        no_buffer: bool,
    },

    /// Run `[demo].command` once per execution style, then discovery.
    Demo,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
