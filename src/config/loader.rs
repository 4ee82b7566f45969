// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Parse `Pgclone.toml` at `path` without checking its values.
///
/// Unknown keys are rejected here; shell and env checks happen in
/// [`load_and_validate`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;
    debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Parse and validate `path`.
///
/// Missing sections fall back to their defaults. An empty shell program or a
/// malformed env variable name is a [`ConfigError`](crate::ShellError::ConfigError).
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}
