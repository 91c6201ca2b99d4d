// src/exec/cooperative.rs

//! Cooperative execution on the tokio runtime.
//!
//! The caller yields while the child runs and while its pipes are drained, so
//! other tasks on the same runtime keep making progress.

use tokio::process::Command;
use tracing::debug;

use crate::errors::{CmdrunError, Result};
use crate::exec::command::ParsedCommand;
use crate::exec::options::ExecOptions;
use crate::exec::output::ExecutionResult;

pub async fn capture(parsed: &ParsedCommand, options: &ExecOptions) -> Result<ExecutionResult> {
    let mut cmd = Command::from(parsed.to_command(options));
    cmd.kill_on_drop(true);

    let child = cmd.spawn().map_err(|source| CmdrunError::Spawn {
        path: parsed.program().to_path_buf(),
        source,
    })?;

    debug!(pid = ?child.id(), path = %parsed.program().display(), "spawned child");

    let output = child.wait_with_output().await?;

    debug!(path = %parsed.program().display(), status = ?output.status, "child exited");
    Ok(ExecutionResult::from(output))
}
