//! Name checks applied while a command tree is built.
//!
//! Flag and argument names are written after `--`/`-` and before an optional
//! `=value`, so some names could never be matched by any token. Subcommand
//! names are bare words and only need to avoid the dash prefix.

use crate::error::ConfigError;

/// Checks a full or short name of a flag or argument.
pub(crate) fn check_option_name(command: &str, name: &str) -> Result<(), ConfigError> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name.starts_with('-') {
        Some("name cannot start with `-`")
    } else if name.contains('=') {
        Some("name cannot contain `=`")
    } else if name.chars().any(char::is_whitespace) {
        Some("name cannot contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(invalid(command, name, reason)),
        None => Ok(()),
    }
}

/// Checks the name of a subcommand.
pub(crate) fn check_subcommand_name(command: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(invalid(command, name, "name cannot be empty"));
    }
    if name.starts_with('-') {
        return Err(invalid(command, name, "name cannot start with `-`"));
    }
    Ok(())
}

fn invalid(command: &str, name: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidName {
        command: command.to_string(),
        name: name.to_string(),
        reason,
    }
}
