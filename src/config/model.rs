// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::LogLevel;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [shell]
/// program = "/bin/bash"
/// pipefail = true
///
/// [shell.env]
/// PGCONNECT_TIMEOUT = "10"
///
/// [logging]
/// level = "debug"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub shell: ShellSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// `[shell]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellSection {
    /// Shell used for commands and for the pipefail probe.
    ///
    /// When unset, `$SHELL` is used, falling back to `/bin/sh`.
    #[serde(default)]
    pub program: Option<String>,

    /// Default for `ShellCommand::pipefail` when commands are built from
    /// this config.
    #[serde(default)]
    pub pipefail: bool,

    /// Environment overlay applied to every command before its own overlay.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Overrides `PGCLONE_LOG` when set.
    #[serde(default)]
    pub level: Option<LogLevel>,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// `Default`, so holders can rely on the invariants checked there.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub shell: ShellSection,
    pub logging: LoggingSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(shell: ShellSection, logging: LoggingSection) -> Self {
        Self { shell, logging }
    }
}
