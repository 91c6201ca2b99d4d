// src/exec/command.rs

//! Command-string parsing.
//!
//! A command string is a plain space-delimited list of tokens. There is no
//! quoting, escaping or expansion: `"echo  a"` yields the arguments `["", "a"]`.
//! The first token is resolved to an absolute path up front so the child can
//! be created directly, without a shell in between.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::errors::{CmdrunError, Result};
use crate::exec::options::ExecOptions;
use crate::exec::resolver::PathResolver;

/// Split a command string into `(executable, args)` on single spaces.
///
/// A string without any space is taken whole as the executable.
pub fn split_command(cmd: &str) -> (&str, Vec<&str>) {
    match cmd.split_once(' ') {
        Some((program, rest)) => (program, rest.split(' ').collect()),
        None => (cmd, Vec::new()),
    }
}

/// A command ready for direct process creation: resolved executable plus
/// verbatim arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl ParsedCommand {
    /// Parse `cmd` and resolve its executable with `resolver`.
    ///
    /// Fails with [`CmdrunError::Resolution`] if the resolver finds nothing
    /// or hands back a path that is not absolute.
    pub fn parse(cmd: &str, resolver: &dyn PathResolver) -> Result<Self> {
        let (program, args) = split_command(cmd);

        let resolved = resolver
            .resolve(program)
            .filter(|path| path.is_absolute())
            .ok_or_else(|| CmdrunError::Resolution {
                program: program.to_string(),
            })?;

        debug!(program, path = %resolved.display(), args = args.len(), "parsed command");

        Ok(Self {
            program: resolved,
            args: args.into_iter().map(str::to_string).collect(),
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The full argument vector, executable first.
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.program.clone().into_os_string())
            .chain(self.args.iter().map(OsString::from))
            .collect()
    }

    /// Build a `std::process::Command` with stdin closed and both output
    /// streams piped.
    pub fn to_command(&self, options: &ExecOptions) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        options.apply(&mut cmd);
        cmd
    }
}
