// src/exec/output.rs

use std::io::{self, Write};
use std::process::{ExitStatus, Output};

/// Outcome of one finished child: exit code and both captured streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn new(status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            code: exit_code(status),
            stdout: String::from_utf8_lossy(stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Trimmed stdout if the child wrote anything there, otherwise trimmed
    /// stderr. Stderr is dropped whenever stdout is non-empty.
    pub fn selected_output(&self) -> &str {
        if self.stdout.is_empty() {
            self.stderr.trim()
        } else {
            self.stdout.trim()
        }
    }

    /// Write the selected output to `out`, followed by a newline.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.selected_output())
    }
}

impl From<Output> for ExecutionResult {
    fn from(output: Output) -> Self {
        Self::new(output.status, &output.stdout, &output.stderr)
    }
}

/// Processes killed by a signal have no exit code; report them as `-1`.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
