use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

/// Concurrency model used to run a single command.
///
/// - `Cooperative`: the caller suspends on a tokio child process while other
///   work on the runtime keeps running.
/// - `Scoped`: blocking call; the child handle is released on every exit path.
/// - `Checked`: like `Scoped`, but a non-zero exit code is an error.
///
/// Chosen by `--style` on the command line, else `[exec].style`, else
/// `Scoped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStyle {
    Cooperative,
    #[default]
    Scoped,
    Checked,
}

impl ExecutionStyle {
    pub const ALL: [ExecutionStyle; 3] = [
        ExecutionStyle::Cooperative,
        ExecutionStyle::Scoped,
        ExecutionStyle::Checked,
    ];

    pub fn exit_policy(self) -> ExitPolicy {
        match self {
            ExecutionStyle::Cooperative | ExecutionStyle::Scoped => ExitPolicy::ReturnCode,
            ExecutionStyle::Checked => ExitPolicy::FailFast,
        }
    }
}

impl fmt::Display for ExecutionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionStyle::Cooperative => "cooperative",
            ExecutionStyle::Scoped => "scoped",
            ExecutionStyle::Checked => "checked",
        };
        f.write_str(s)
    }
}

/// What to do with a non-zero exit code once the child has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Hand the code back to the caller, who must check it.
    ReturnCode,
    /// Turn any non-zero code into [`crate::errors::CmdrunError::NonZeroExit`].
    FailFast,
}
