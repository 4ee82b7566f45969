// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! None of the variants carry the text of a shell command: commands routinely
//! embed connection strings and passwords, so they must not leak into error
//! output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Error running command.")]
    CommandFailed { exit_code: i32 },

    #[error("failed to spawn shell process: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_message_is_generic() {
        let err = ShellError::CommandFailed { exit_code: 2 };
        assert_eq!(err.to_string(), "Error running command.");
    }

    #[test]
    fn unknown_command_names_the_command() {
        let err = ShellError::UnknownCommand("migrate".into());
        assert_eq!(err.to_string(), "Unknown command: migrate");
    }
}
