//! File-based command definitions for `olive-core`.
//!
//! Describes a command tree as YAML or JSON and builds the matching
//! [`olive_core::Command`]:
//!
//! - [`CommandDefinition`] — a command with its flags, arguments, primary
//!   argument and nested subcommands.
//! - [`DefinitionFormat`] — YAML or JSON, chosen by file extension.
//!
//! # Quick start
//!
//! ```no_run
//! use olive_core::Parser;
//! use olive_definition::CommandDefinition;
//!
//! let cli = CommandDefinition::load("olive.yaml").unwrap().build().unwrap();
//! let result = Parser::new(&cli).parse(std::env::args().skip(1)).unwrap();
//! println!("{:?}", result.subcommand_path());
//! ```

mod definition;
mod error;

pub use definition::{
    ArgumentDefinition, ArgumentType, CommandDefinition, DefaultValue, DefinitionFormat,
    FlagDefinition, PrimaryDefinition,
};
pub use error::{DefinitionError, Result};
