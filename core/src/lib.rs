//! Declarative command-line argument parsing.
//!
//! A program describes its command line once, as a tree of commands, and
//! parses token lists against it:
//!
//! - [`Command`] — a command or subcommand with its flags, typed arguments,
//!   an optional primary (unlabeled) argument and nested subcommands.
//! - [`Flag`] — a boolean switch, optionally carrying an [`Action`].
//! - [`TypedArgument`] — a named `name=value` argument, parsed by a
//!   [`ValueKind`] (integer, float, string or selector), with optional
//!   validator and default value.
//! - [`Parser`] — consumes tokens and returns a nested [`ParseResult`], one
//!   scope per selected subcommand.
//!
//! Building reports mistakes as [`ConfigError`]; parsing reports bad input as
//! [`ParseError`]. Neither ever terminates the process, with the exception of
//! the default help handler ([`print_help_and_exit`]), which can be replaced
//! through [`Parser::with_help_handler`].
//!
//! # Example
//!
//! ```
//! use olive_core::*;
//!
//! let mut cli = Command::new("olive", "A friendly package tool", true);
//! cli.add_flag("verbose", "v", "Print more").unwrap();
//!
//! let build = cli.add_subcommand("build", "Build a package", true).unwrap();
//! build.add_primary_arg("package-name", "Package to build", true).unwrap();
//! build
//!     .add_int_arg("jobs", "j", "Parallel jobs", false)
//!     .unwrap()
//!     .set_default_value(4)
//!     .unwrap();
//!
//! let result = Parser::new(&cli)
//!     .parse(["build", "-v", "pog"])
//!     .unwrap();
//!
//! assert!(result.has_flag("verbose"));
//! let (name, build) = result.subcommand().unwrap();
//! assert_eq!(name, "build");
//! assert_eq!(build.primary_arg(), Some("pog"));
//! assert_eq!(build.int_argument("jobs"), Some(4));
//! ```

mod argument;
mod command;
mod error;
mod flag;
mod help;
mod parser;
mod result;
mod validate;
mod value;

pub use argument::{
    Argument, FloatArgument, IntArgument, PrimaryArgument, SelectorArgument, StringArgument,
    TypedArgument,
};
pub use command::Command;
pub use error::{ConfigError, ParseError};
pub use flag::{Action, Flag, HELP_FLAG_NAME, HELP_FLAG_SHORT_NAME};
pub use help::{HELP_WIDTH, help_message};
pub use parser::{HelpHandler, Parser, parse_args, print_help_and_exit};
pub use result::{ParseResult, SubcommandResult};
pub use value::{
    FloatKind, IntKind, KindError, SelectorKind, StringKind, Validator, Value, ValueKind,
};
