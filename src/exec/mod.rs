// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] splits a command string and resolves its executable.
//! - [`resolver`] provides the `PathResolver` seam and the `which`-backed
//!   production resolver.
//! - [`options`] carries pass-through process configuration.
//! - [`output`] holds the captured result and the output-selection rule.
//! - [`cooperative`] and [`scoped`] create and collect the child process on
//!   tokio or on the calling thread.
//! - [`runner`] ties these together into the three execution styles.

pub mod command;
pub mod cooperative;
pub mod options;
pub mod output;
pub mod resolver;
pub mod runner;
pub mod scoped;

pub use command::{ParsedCommand, split_command};
pub use options::ExecOptions;
pub use output::ExecutionResult;
pub use resolver::{PathResolver, SearchPathResolver};
pub use runner::{CommandRunner, exec_async, exec_checked, exec_scoped};
pub use scoped::ScopedChild;
