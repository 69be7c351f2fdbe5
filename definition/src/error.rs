//! Error types for loading and building command definitions.
//!
//! Covers I/O, both serialization formats, definitions that cannot be
//! expressed as a command tree, and builder failures from `olive-core`.

use olive_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while loading, saving or building a definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The definition is well-formed but describes something the command
    /// tree cannot hold (e.g. a string default on an integer argument).
    #[error("invalid definition at `{path}`: {message}")]
    InvalidDefinition { path: String, message: String },

    /// The command tree rejected a flag, argument or subcommand.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience alias for results with [`DefinitionError`].
pub type Result<T> = std::result::Result<T, DefinitionError>;
