//! Error types for building command trees and parsing tokens.
//!
//! Two classes of failure exist:
//!
//! - [`ConfigError`] is raised while a command tree is being built. It means
//!   the caller's configuration is wrong; the offending builder call leaves
//!   the command untouched, and the configuration must be fixed.
//! - [`ParseError`] is raised by the parser for a bad token list. It is
//!   recoverable by the caller (typically by printing it and exiting).

use thiserror::Error;

/// Builder-time configuration errors.
///
/// Every variant names the command being built so the offending definition
/// can be located in larger trees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two flags in one command share a full name.
    #[error("command `{command}` has multiple flags named `{name}`")]
    DuplicateFlag { command: String, name: String },

    /// Two flags in one command share a short name.
    #[error("command `{command}` has multiple flags with short name `{short_name}`")]
    DuplicateFlagShortName { command: String, short_name: String },

    /// Two arguments in one command share a full name.
    #[error("command `{command}` has multiple arguments named `{name}`")]
    DuplicateArgument { command: String, name: String },

    /// Two arguments in one command share a short name.
    #[error("command `{command}` has multiple arguments with short name `{short_name}`")]
    DuplicateArgumentShortName { command: String, short_name: String },

    /// Two subcommands of one command share a name.
    #[error("command `{command}` has multiple subcommands named `{name}`")]
    DuplicateSubcommand { command: String, name: String },

    /// A primary argument was added to a command that has subcommands.
    #[error(
        "command `{command}` cannot take primary argument `{name}`: it already has subcommands"
    )]
    PrimaryArgumentWithSubcommands { command: String, name: String },

    /// A subcommand was added to a command that takes a primary argument.
    #[error(
        "command `{command}` cannot have subcommand `{name}`: it already takes a primary argument"
    )]
    SubcommandsWithPrimaryArgument { command: String, name: String },

    /// A second primary argument was added to a command.
    #[error("command `{command}` already takes primary argument `{existing}`")]
    DuplicatePrimaryArgument { command: String, existing: String },

    /// A name can never be matched by the token grammar.
    #[error("command `{command}`: invalid name `{name}`: {reason}")]
    InvalidName {
        command: String,
        name: String,
        reason: &'static str,
    },

    /// A default value is rejected by its argument.
    #[error("argument `{argument}` has an invalid default value `{value}`: {reason}")]
    InvalidDefault {
        argument: String,
        value: String,
        reason: String,
    },
}

/// Parse-time errors.
///
/// The first error aborts parsing; no partial result is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No command on the active stack declares the flag.
    #[error("unknown flag{}: `{name}`", short_suffix(.short))]
    UnknownFlag { name: String, short: bool },

    /// No command on the active stack declares the argument.
    #[error("unknown argument{}: `{name}`", short_suffix(.short))]
    UnknownArgument { name: String, short: bool },

    /// A bare word that is neither a known subcommand nor a primary argument.
    #[error("unknown subcommand: `{0}`")]
    UnknownSubcommand(String),

    /// The same flag appeared twice in one scope (under any of its names).
    #[error("flag `{0}` set multiple times")]
    FlagSetMultipleTimes(String),

    /// The same argument appeared twice in one scope (under any of its names).
    #[error("argument `{0}` set multiple times")]
    ArgumentSetMultipleTimes(String),

    /// The raw value is not a valid literal for the argument's type.
    #[error("invalid value `{value}` for argument `{argument}`: {reason}")]
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },

    /// The raw value is not one of a selector's legal values.
    #[error("`{value}` is not a valid value for argument `{argument}` (expected one of: {expected})")]
    NotAllowedValue {
        argument: String,
        value: String,
        expected: String,
    },

    /// The argument's validator rejected the parsed value.
    #[error("value `{value}` rejected for argument `{argument}`: {reason}")]
    ValidationFailed {
        argument: String,
        value: String,
        reason: String,
    },

    /// The innermost command requires a subcommand but none was given.
    #[error("`{0}` requires a subcommand")]
    MissingSubcommand(String),

    /// More than one bare word was given to a command's primary argument.
    #[error("multiple primary arguments specified for command `{0}`")]
    MultiplePrimaryArguments(String),
}

fn short_suffix(short: &bool) -> &'static str {
    if *short { " by short name" } else { "" }
}
