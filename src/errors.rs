// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmdrunError {
    /// The executable could not be found on the search path. Raised before
    /// any process is spawned.
    #[error("could not resolve executable '{program}' on the search path")]
    Resolution { program: String },

    /// The executable was found but the OS refused to start it.
    #[error("could not start '{}': {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The child ran to completion with a non-zero exit code and the caller
    /// asked for fail-fast behaviour.
    #[error("command '{cmd}' exited with non-zero code {code}")]
    NonZeroExit { cmd: String, code: i32 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CmdrunError>;
