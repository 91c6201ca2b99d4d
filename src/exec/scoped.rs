// src/exec/scoped.rs

//! Blocking execution with a scoped child handle.
//!
//! [`ScopedChild`] owns the OS process for as long as it lives. Whatever path
//! control takes out of a call (normal return, `?`, panic), dropping the guard
//! closes the pipes and, if the child is still around, kills and reaps it.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::Child;

use tracing::{debug, warn};

use crate::errors::{CmdrunError, Result};
use crate::exec::command::ParsedCommand;
use crate::exec::options::ExecOptions;
use crate::exec::output::ExecutionResult;

#[derive(Debug)]
pub struct ScopedChild {
    child: Child,
    path: PathBuf,
    reaped: bool,
}

impl ScopedChild {
    pub fn spawn(parsed: &ParsedCommand, options: &ExecOptions) -> Result<Self> {
        let path = parsed.program().to_path_buf();
        let child = parsed
            .to_command(options)
            .spawn()
            .map_err(|source| CmdrunError::Spawn {
                path: path.clone(),
                source,
            })?;

        debug!(pid = child.id(), path = %path.display(), "spawned child");

        Ok(Self {
            child,
            path,
            reaped: false,
        })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Read both pipes to EOF, then wait for the child to exit.
    ///
    /// Stderr is drained on a scoped thread while stdout is read here, so a
    /// child filling one pipe can't block on the other.
    pub fn communicate(mut self) -> Result<ExecutionResult> {
        let stdout = self.child.stdout.take();
        let stderr = self.child.stderr.take();

        let (out, err) = std::thread::scope(|s| {
            let stderr_reader = s.spawn(move || read_pipe(stderr));
            let out = read_pipe(stdout);
            let err = stderr_reader
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stderr reader panicked")));
            (out, err)
        });

        let out = out?;
        let err = err?;
        let status = self.child.wait()?;
        self.reaped = true;

        debug!(path = %self.path.display(), ?status, "child exited");
        Ok(ExecutionResult::new(status, &out, &err))
    }
}

impl Drop for ScopedChild {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }
        if let Ok(Some(_)) = self.child.try_wait() {
            return;
        }

        warn!(
            pid = self.child.id(),
            path = %self.path.display(),
            "child still running when its handle was released; killing"
        );
        if let Err(e) = self.child.kill() {
            debug!(error = %e, "kill failed; child may have exited already");
        }
        let _ = self.child.wait();
    }
}

fn read_pipe<R: Read>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

/// Spawn `parsed`, collect its output and release the child before returning.
pub fn capture(parsed: &ParsedCommand, options: &ExecOptions) -> Result<ExecutionResult> {
    ScopedChild::spawn(parsed, options)?.communicate()
}
