// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, ShellError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ShellError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.shell, raw.logging))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_shell_program(cfg)?;
    validate_env_names(cfg)?;
    Ok(())
}

fn validate_shell_program(cfg: &RawConfigFile) -> Result<()> {
    if let Some(program) = &cfg.shell.program {
        if program.trim().is_empty() {
            return Err(ShellError::ConfigError(
                "[shell].program must not be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

// Values are not checked: they may be secrets and must not end up in
// error messages.
fn validate_env_names(cfg: &RawConfigFile) -> Result<()> {
    for name in cfg.shell.env.keys() {
        if name.is_empty() {
            return Err(ShellError::ConfigError(
                "[shell.env] contains an empty variable name".to_string(),
            ));
        }
        if name.contains('=') || name.contains('\0') {
            return Err(ShellError::ConfigError(format!(
                "[shell.env] variable name '{}' must not contain '=' or NUL",
                name.escape_debug()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(toml_src: &str) -> RawConfigFile {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn empty_config_is_valid() {
        let cfg = ConfigFile::try_from(raw("")).unwrap();
        assert!(cfg.shell.program.is_none());
        assert!(!cfg.shell.pipefail);
        assert!(cfg.shell.env.is_empty());
    }

    #[test]
    fn blank_program_is_rejected() {
        let err = ConfigFile::try_from(raw("[shell]\nprogram = \"  \"\n")).unwrap_err();
        assert!(matches!(err, ShellError::ConfigError(msg) if msg.contains("program")));
    }

    #[test]
    fn env_name_with_equals_is_rejected() {
        let err = ConfigFile::try_from(raw("[shell.env]\n\"A=B\" = \"x\"\n")).unwrap_err();
        assert!(matches!(err, ShellError::ConfigError(msg) if msg.contains("A=B")));
    }
}
