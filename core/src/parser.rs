//! Token-consumption state machine.
//!
//! The parser keeps a stack of active commands (the root at index 0, one
//! entry per selected subcommand) and an index-aligned stack of result
//! scopes. Flags and arguments are resolved against the command stack from
//! the innermost command outwards, so a subcommand's own names shadow its
//! ancestors' while every ancestor name stays reachable.
//!
//! Subcommands may only appear as a leading run of bare words: the first
//! flag, argument or primary argument closes that window.

use tracing::{debug, trace};

use crate::argument::Argument;
use crate::command::Command;
use crate::error::ParseError;
use crate::flag::{Flag, FlagAction};
use crate::result::ParseResult;

/// Receives the command whose help flag was set.
pub type HelpHandler<'a> = Box<dyn Fn(&Command) + 'a>;

/// Default help behavior: print the help text to stdout and exit with
/// status 0.
pub fn print_help_and_exit(command: &Command) {
    command.print_help();
    std::process::exit(0);
}

/// Parses a full argv (program name first) with the default help handler.
///
/// The first token is conventionally the program name and is discarded.
///
/// # Examples
///
/// ```
/// use olive_core::{Command, parse_args};
///
/// let mut cli = Command::new("olive", "", true);
/// cli.add_int_arg("int", "i", "", false).unwrap();
///
/// let result = parse_args(&cli, ["olive", "-i=2"]).unwrap();
/// assert_eq!(result.int_argument("int"), Some(2));
/// ```
pub fn parse_args<I, S>(root: &Command, argv: I) -> Result<ParseResult, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Parser::new(root).parse(argv.into_iter().skip(1))
}

/// Parses token lists against a command tree.
///
/// The tree is only borrowed, so one tree can serve any number of parses.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
///
/// use olive_core::{Command, Parser};
///
/// let cli = Command::new("olive", "Demo", true);
/// let shown = RefCell::new(Vec::new());
///
/// let parser = Parser::new(&cli)
///     .with_help_handler(|command| shown.borrow_mut().push(command.name().to_string()));
/// let result = parser.parse(["--help"]).unwrap();
///
/// assert!(result.has_flag("help"));
/// assert_eq!(*shown.borrow(), vec!["olive"]);
/// ```
pub struct Parser<'a> {
    root: &'a Command,
    help_handler: HelpHandler<'a>,
}

impl<'a> Parser<'a> {
    /// Creates a parser using [`print_help_and_exit`] for help flags.
    pub fn new(root: &'a Command) -> Self {
        Self {
            root,
            help_handler: Box::new(print_help_and_exit),
        }
    }

    /// Replaces what happens when a help flag is set.
    ///
    /// The handler runs synchronously, in token order, with the command on
    /// which the help flag was resolved. If it returns, parsing continues.
    pub fn with_help_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Command) + 'a,
    {
        self.help_handler = Box::new(handler);
        self
    }

    /// Parses `tokens` (without the program name).
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered; no partial result is
    /// returned.
    pub fn parse<I, S>(&self, tokens: I) -> Result<ParseResult, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = ParseState {
            commands: vec![self.root],
            scopes: vec![ParseResult::default()],
            allow_subcommands: true,
            help_handler: self.help_handler.as_ref(),
        };

        for token in tokens {
            state.consume(token.as_ref())?;
        }

        state.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameForm {
    Long,
    Short,
}

impl NameForm {
    fn flag<'c>(self, command: &'c Command, name: &str) -> Option<&'c Flag> {
        match self {
            NameForm::Long => command.flag(name),
            NameForm::Short => command.flag_by_short_name(name),
        }
    }

    fn argument<'c>(self, command: &'c Command, name: &str) -> Option<&'c Argument> {
        match self {
            NameForm::Long => command.argument(name),
            NameForm::Short => command.argument_by_short_name(name),
        }
    }

    fn is_short(self) -> bool {
        self == NameForm::Short
    }
}

/// Transient state of one `parse` call.
struct ParseState<'p> {
    commands: Vec<&'p Command>,
    scopes: Vec<ParseResult>,
    allow_subcommands: bool,
    help_handler: &'p dyn Fn(&Command),
}

impl<'p> ParseState<'p> {
    fn current_command(&self) -> &'p Command {
        self.commands[self.commands.len() - 1]
    }

    fn current_scope_mut(&mut self) -> &mut ParseResult {
        let depth = self.scopes.len() - 1;
        &mut self.scopes[depth]
    }

    fn consume(&mut self, token: &str) -> Result<(), ParseError> {
        if token.starts_with("--") {
            return self.consume_named(token.trim_start_matches('-'), NameForm::Long);
        }
        if let Some(body) = token.strip_prefix('-') {
            return self.consume_named(body, NameForm::Short);
        }

        let command = self.current_command();
        if command.primary_arg().is_some() {
            self.allow_subcommands = false;
            debug!(token, command = command.name(), "primary argument");

            let scope = self.current_scope_mut();
            if scope.primary_arg().is_some() {
                return Err(ParseError::MultiplePrimaryArguments(
                    command.name().to_string(),
                ));
            }
            scope.set_primary_arg(token);
            return Ok(());
        }

        if !self.allow_subcommands {
            return Err(ParseError::UnknownSubcommand(token.to_string()));
        }

        let subcommand = command
            .subcommand(token)
            .ok_or_else(|| ParseError::UnknownSubcommand(token.to_string()))?;
        debug!(
            parent = command.name(),
            subcommand = subcommand.name(),
            depth = self.commands.len(),
            "entering subcommand"
        );
        self.commands.push(subcommand);
        self.scopes.push(ParseResult::default());
        Ok(())
    }

    /// Handles `name` / `name=value` after the dash markers were stripped.
    /// An empty value (`name=`) selects the flag named `name`.
    fn consume_named(&mut self, body: &str, form: NameForm) -> Result<(), ParseError> {
        self.allow_subcommands = false;

        match body.split_once('=') {
            None | Some((_, "")) => {
                let name = body.strip_suffix('=').unwrap_or(body);
                let (depth, flag) = self
                    .resolve(|command| form.flag(command, name))
                    .ok_or_else(|| ParseError::UnknownFlag {
                        name: name.to_string(),
                        short: form.is_short(),
                    })?;
                self.set_flag(depth, flag)
            }
            Some((name, raw)) => {
                let (depth, arg) = self
                    .resolve(|command| form.argument(command, name))
                    .ok_or_else(|| ParseError::UnknownArgument {
                        name: name.to_string(),
                        short: form.is_short(),
                    })?;
                self.set_arg(depth, arg, raw)
            }
        }
    }

    /// Searches the command stack innermost-first; returns the depth of the
    /// first command that knows the name.
    fn resolve<T: ?Sized>(
        &self,
        lookup: impl Fn(&'p Command) -> Option<&'p T>,
    ) -> Option<(usize, &'p T)> {
        self.commands
            .iter()
            .enumerate()
            .rev()
            .find_map(|(depth, command)| lookup(*command).map(|found| (depth, found)))
    }

    fn set_flag(&mut self, depth: usize, flag: &'p Flag) -> Result<(), ParseError> {
        if !self.scopes[depth].insert_flag(flag.name()) {
            return Err(ParseError::FlagSetMultipleTimes(flag.name().to_string()));
        }
        debug!(flag = flag.name(), depth, "flag set");

        match flag.action() {
            FlagAction::None => {}
            FlagAction::Help => (self.help_handler)(self.commands[depth]),
            FlagAction::Custom(action) => action(),
        }
        Ok(())
    }

    fn set_arg(&mut self, depth: usize, arg: &'p Argument, raw: &str) -> Result<(), ParseError> {
        if self.scopes[depth].has_argument(arg.name()) {
            return Err(ParseError::ArgumentSetMultipleTimes(arg.name().to_string()));
        }

        let value = arg.check_value(raw)?;
        debug!(argument = arg.name(), %value, depth, "argument set");
        self.scopes[depth].insert_argument(arg.name(), value);
        Ok(())
    }

    /// Checks the required subcommand, fills in defaults and folds the scope
    /// stack into the nested result chain.
    fn finish(self) -> Result<ParseResult, ParseError> {
        // only the innermost command can be missing its subcommand; every
        // outer one has a selected child on the stack
        let innermost = self.current_command();
        if innermost.has_subcommands() && innermost.requires_subcommand() {
            return Err(ParseError::MissingSubcommand(innermost.name().to_string()));
        }

        let mut scopes = self.scopes;
        for (command, scope) in self.commands.iter().zip(scopes.iter_mut()).rev() {
            for arg in command.arguments() {
                if scope.has_argument(arg.name()) {
                    continue;
                }
                if let Some(default) = arg.default_value() {
                    trace!(command = command.name(), argument = arg.name(), %default, "default applied");
                    scope.insert_argument(arg.name(), default);
                }
            }
        }

        let mut child_names = self.commands[1..].iter().rev().map(|command| command.name());
        let mut scopes = scopes.into_iter().rev();
        let mut result = scopes.next().unwrap_or_default();
        for mut parent in scopes {
            if let Some(name) = child_names.next() {
                parent.set_subcommand(name, result);
            }
            result = parent;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(cli: &Command) -> Parser<'_> {
        Parser::new(cli).with_help_handler(|_| {})
    }

    #[test]
    fn test_value_keeps_extra_equals_signs() {
        let mut cli = Command::new("olive", "", false);
        cli.add_string_arg("expr", "e", "", false).unwrap();

        let result = quiet(&cli).parse(["--expr=a=b=c"]).unwrap();
        assert_eq!(result.string_argument("expr"), Some("a=b=c"));
    }

    #[test]
    fn test_empty_value_after_equals_is_a_flag() {
        let mut cli = Command::new("olive", "", false);
        cli.add_string_arg("output", "o", "", false).unwrap();
        cli.add_flag("output", "o", "").unwrap();
        cli.add_flag("verbose", "v", "").unwrap();

        let result = quiet(&cli).parse(["-o=", "--verbose="]).unwrap();
        assert!(result.has_flag("output"));
        assert!(result.has_flag("verbose"));
        assert_eq!(result.argument("output"), None);
    }

    #[test]
    fn test_empty_value_without_matching_flag_fails() {
        let mut cli = Command::new("olive", "", false);
        cli.add_string_arg("output", "o", "", false).unwrap();

        assert_eq!(
            quiet(&cli).parse(["--output="]).unwrap_err(),
            ParseError::UnknownFlag {
                name: "output".into(),
                short: false
            }
        );
    }

    #[test]
    fn test_inner_flag_shadows_outer_flag() {
        let mut cli = Command::new("olive", "", false);
        cli.set_requires_subcommand(false);
        cli.add_flag("force", "f", "").unwrap();
        cli.add_subcommand("build", "", false)
            .unwrap()
            .add_flag("force", "f", "")
            .unwrap();

        let result = quiet(&cli).parse(["build", "--force"]).unwrap();
        assert!(!result.has_flag("force"));
        assert!(result.subcommand().unwrap().1.has_flag("force"));

        // the outer flag stays reachable when not shadowed
        let result = quiet(&cli).parse(["--force"]).unwrap();
        assert!(result.has_flag("force"));
    }

    #[test]
    fn test_extra_leading_dashes_are_stripped() {
        let mut cli = Command::new("olive", "", false);
        cli.add_flag("verbose", "v", "").unwrap();
        cli.add_int_arg("jobs", "j", "", false).unwrap();

        let result = quiet(&cli).parse(["---verbose", "----jobs=3"]).unwrap();
        assert!(result.has_flag("verbose"));
        assert_eq!(result.int_argument("jobs"), Some(3));

        assert_eq!(
            quiet(&cli).parse(["--"]).unwrap_err(),
            ParseError::UnknownFlag {
                name: String::new(),
                short: false
            }
        );
        assert_eq!(
            quiet(&cli).parse(["-"]).unwrap_err(),
            ParseError::UnknownFlag {
                name: String::new(),
                short: true
            }
        );
    }

    #[test]
    fn test_help_handler_receives_resolving_command() {
        let mut cli = Command::new("olive", "", true);
        cli.set_requires_subcommand(false);
        cli.add_subcommand("build", "", true).unwrap();
        cli.add_subcommand("run", "", false).unwrap();

        let seen = std::cell::RefCell::new(Vec::new());
        let parser =
            Parser::new(&cli).with_help_handler(|c| seen.borrow_mut().push(c.name().to_string()));

        parser.parse(["build", "-h"]).unwrap();
        // `run` has no help flag of its own, so the root's flag answers
        parser.parse(["run", "--help"]).unwrap();
        assert_eq!(*seen.borrow(), vec!["build", "olive"]);
    }
}
