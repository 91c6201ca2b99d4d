// src/config/validate.rs

use globset::Glob;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{CmdrunError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = CmdrunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.exec, raw.discover, raw.demo))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_demo(cfg)?;
    validate_discover(cfg)?;
    validate_exec(cfg)?;
    Ok(())
}

fn validate_demo(cfg: &RawConfigFile) -> Result<()> {
    if cfg.demo.command.trim().is_empty() {
        return Err(CmdrunError::ConfigError(
            "[demo].command must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_discover(cfg: &RawConfigFile) -> Result<()> {
    let pattern = &cfg.discover.pattern;
    if pattern.is_empty() {
        return Err(CmdrunError::ConfigError(
            "[discover].pattern must not be empty".to_string(),
        ));
    }
    if pattern.contains('/') {
        return Err(CmdrunError::ConfigError(format!(
            "[discover].pattern '{pattern}' is matched against file names and must not contain '/'"
        )));
    }
    Glob::new(pattern).map_err(|e| {
        CmdrunError::ConfigError(format!("[discover].pattern '{pattern}' is invalid: {e}"))
    })?;
    Ok(())
}

fn validate_exec(cfg: &RawConfigFile) -> Result<()> {
    if let Some(ref paths) = cfg.exec.search_path {
        if paths.trim().is_empty() {
            return Err(CmdrunError::ConfigError(
                "[exec].search_path is set but empty; remove it to use PATH".to_string(),
            ));
        }
    }
    Ok(())
}
