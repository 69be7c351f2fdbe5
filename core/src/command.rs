//! The command tree: commands with their flags, arguments and subcommands.
//!
//! A tree is built once through `&mut` builder calls and then handed to the
//! [`Parser`](crate::Parser) by shared reference, so it cannot change while a
//! parse is reading it. A built tree is `Send + Sync` and may be shared
//! between concurrent parses.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::argument::{
    Argument, FloatArgument, IntArgument, PrimaryArgument, SelectorArgument, StringArgument,
    TypedArgument,
};
use crate::error::ConfigError;
use crate::flag::{Flag, HELP_FLAG_NAME, HELP_FLAG_SHORT_NAME};
use crate::help::help_message;
use crate::validate::{check_option_name, check_subcommand_name};
use crate::value::{FloatKind, IntKind, SelectorKind, StringKind, ValueKind};

/// A command or subcommand.
///
/// Invariants upheld by the builder methods:
///
/// - a command has either a primary argument or subcommands, never both;
/// - flag full names and flag short names are unique within the command;
/// - argument full names and argument short names are unique within the
///   command (flags and arguments are separate name-spaces).
///
/// A builder call that would break an invariant returns a [`ConfigError`]
/// and leaves the command unchanged.
///
/// # Examples
///
/// ```
/// use olive_core::Command;
///
/// let mut cli = Command::new("olive", "A friendly tool", true);
/// cli.add_flag("verbose", "v", "Talk more").unwrap();
///
/// let build = cli.add_subcommand("build", "Build a package", true).unwrap();
/// build.add_primary_arg("package-name", "Package to build", true).unwrap();
///
/// // a command with a primary argument cannot also have subcommands
/// assert!(build.add_subcommand("nested", "", true).is_err());
///
/// assert_eq!(cli.subcommand_names(), vec!["build"]);
/// assert!(cli.flag("help").is_some());
/// ```
#[derive(Debug)]
pub struct Command {
    name: String,
    description: String,
    requires_subcommand: bool,
    subcommands: BTreeMap<String, Command>,
    flags: BTreeMap<String, Flag>,
    flags_by_short_name: BTreeMap<String, String>,
    args: BTreeMap<String, Argument>,
    args_by_short_name: BTreeMap<String, String>,
    primary_arg: Option<PrimaryArgument>,
}

impl Command {
    /// Creates a root command.
    ///
    /// With `help_enabled`, a `help`/`h` flag is registered whose action
    /// renders this command's help (see
    /// [`Parser::with_help_handler`](crate::Parser::with_help_handler)).
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        help_enabled: bool,
    ) -> Self {
        let mut command = Self {
            name: name.into(),
            description: description.into(),
            requires_subcommand: true,
            subcommands: BTreeMap::new(),
            flags: BTreeMap::new(),
            flags_by_short_name: BTreeMap::new(),
            args: BTreeMap::new(),
            args_by_short_name: BTreeMap::new(),
            primary_arg: None,
        };

        if help_enabled {
            let help = Flag::help();
            command
                .flags_by_short_name
                .insert(help.short_name().to_string(), help.name().to_string());
            command.flags.insert(help.name().to_string(), help);
        }

        command
    }

    // -----------------------------------------------------------------------
    // Builder
    // -----------------------------------------------------------------------

    /// Adds a subcommand and returns it for further building.
    ///
    /// # Errors
    ///
    /// Fails if this command takes a primary argument, if a subcommand with
    /// the same name exists, or if the name starts with `-`.
    pub fn add_subcommand(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        help_enabled: bool,
    ) -> Result<&mut Command, ConfigError> {
        let name = name.into();
        check_subcommand_name(&self.name, &name)?;

        if self.primary_arg.is_some() {
            return Err(ConfigError::SubcommandsWithPrimaryArgument {
                command: self.name.clone(),
                name,
            });
        }

        match self.subcommands.entry(name) {
            Entry::Occupied(entry) => Err(ConfigError::DuplicateSubcommand {
                command: self.name.clone(),
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let subcommand = Command::new(entry.key().clone(), description, help_enabled);
                Ok(entry.insert(subcommand))
            }
        }
    }

    /// Declares the primary (unlabeled) argument of this command.
    ///
    /// # Errors
    ///
    /// Fails if this command has subcommands or already has a primary
    /// argument.
    pub fn add_primary_arg(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Result<&mut PrimaryArgument, ConfigError> {
        let name = name.into();

        if !self.subcommands.is_empty() {
            return Err(ConfigError::PrimaryArgumentWithSubcommands {
                command: self.name.clone(),
                name,
            });
        }
        if let Some(existing) = &self.primary_arg {
            return Err(ConfigError::DuplicatePrimaryArgument {
                command: self.name.clone(),
                existing: existing.name().to_string(),
            });
        }

        Ok(self
            .primary_arg
            .insert(PrimaryArgument::new(name, description.into(), required)))
    }

    /// Adds a flag and returns it (e.g. to [`Flag::set_action`]).
    ///
    /// # Errors
    ///
    /// Fails if the full name or the short name is already used by another
    /// flag of this command, or is not a valid name.
    pub fn add_flag(
        &mut self,
        name: impl Into<String>,
        short_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&mut Flag, ConfigError> {
        self.insert_flag(Flag::new(name.into(), short_name.into(), description.into()))
    }

    /// Adds an integer argument.
    pub fn add_int_arg(
        &mut self,
        name: impl Into<String>,
        short_name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Result<&mut IntArgument, ConfigError> {
        self.add_arg(TypedArgument::new(
            name.into(),
            short_name.into(),
            description.into(),
            required,
            IntKind,
        ))
    }

    /// Adds a float argument.
    pub fn add_float_arg(
        &mut self,
        name: impl Into<String>,
        short_name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Result<&mut FloatArgument, ConfigError> {
        self.add_arg(TypedArgument::new(
            name.into(),
            short_name.into(),
            description.into(),
            required,
            FloatKind,
        ))
    }

    /// Adds a string argument.
    pub fn add_string_arg(
        &mut self,
        name: impl Into<String>,
        short_name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Result<&mut StringArgument, ConfigError> {
        self.add_arg(TypedArgument::new(
            name.into(),
            short_name.into(),
            description.into(),
            required,
            StringKind,
        ))
    }

    /// Adds a selector argument whose value must be one of `values`.
    pub fn add_selector_arg<I, S>(
        &mut self,
        name: impl Into<String>,
        short_name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
        values: I,
    ) -> Result<&mut SelectorArgument, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_arg(TypedArgument::new(
            name.into(),
            short_name.into(),
            description.into(),
            required,
            SelectorKind::new(values),
        ))
    }

    /// Registers the `help`/`h` flag. Does nothing if a `help` flag with
    /// short name `h` is already registered, whatever its action.
    ///
    /// # Errors
    ///
    /// Fails if another flag already uses the name `help` or the short name
    /// `h`.
    pub fn enable_help(&mut self) -> Result<(), ConfigError> {
        if self
            .flags
            .get(HELP_FLAG_NAME)
            .is_some_and(|flag| flag.short_name() == HELP_FLAG_SHORT_NAME)
        {
            return Ok(());
        }
        self.insert_flag(Flag::help()).map(|_| ())
    }

    /// Removes the `help` flag and its short-name mirror. Returns whether a
    /// flag was removed.
    pub fn disable_help(&mut self) -> bool {
        match self.flags.remove(HELP_FLAG_NAME) {
            Some(flag) => {
                self.flags_by_short_name.remove(flag.short_name());
                true
            }
            None => false,
        }
    }

    /// Sets whether parsing must select one of this command's subcommands.
    /// Only meaningful when the command has subcommands. Defaults to `true`.
    pub fn set_requires_subcommand(&mut self, requires: bool) -> &mut Self {
        self.requires_subcommand = requires;
        self
    }

    /// Returns a subcommand for further building.
    pub fn subcommand_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.subcommands.get_mut(name)
    }

    fn insert_flag(&mut self, flag: Flag) -> Result<&mut Flag, ConfigError> {
        check_option_name(&self.name, flag.name())?;
        check_option_name(&self.name, flag.short_name())?;

        if self.flags.contains_key(flag.name()) {
            return Err(ConfigError::DuplicateFlag {
                command: self.name.clone(),
                name: flag.name().to_string(),
            });
        }
        if self.flags_by_short_name.contains_key(flag.short_name()) {
            return Err(ConfigError::DuplicateFlagShortName {
                command: self.name.clone(),
                short_name: flag.short_name().to_string(),
            });
        }

        self.flags_by_short_name
            .insert(flag.short_name().to_string(), flag.name().to_string());
        Ok(self.flags.entry(flag.name().to_string()).or_insert(flag))
    }

    fn add_arg<K: ValueKind>(
        &mut self,
        arg: TypedArgument<K>,
    ) -> Result<&mut TypedArgument<K>, ConfigError> {
        check_option_name(&self.name, arg.name())?;
        check_option_name(&self.name, arg.short_name())?;

        if self.args.contains_key(arg.name()) {
            return Err(ConfigError::DuplicateArgument {
                command: self.name.clone(),
                name: arg.name().to_string(),
            });
        }
        if self.args_by_short_name.contains_key(arg.short_name()) {
            return Err(ConfigError::DuplicateArgumentShortName {
                command: self.name.clone(),
                short_name: arg.short_name().to_string(),
            });
        }

        self.args_by_short_name
            .insert(arg.short_name().to_string(), arg.name().to_string());
        let stored = self
            .args
            .entry(arg.name().to_string())
            .or_insert(K::wrap(arg));
        match K::typed_mut(stored) {
            Some(arg) => Ok(arg),
            None => unreachable!("argument stored under a different kind"),
        }
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn requires_subcommand(&self) -> bool {
        self.requires_subcommand
    }

    /// Flags in name order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    pub fn flag(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    pub fn flag_by_short_name(&self, short_name: &str) -> Option<&Flag> {
        self.flags_by_short_name
            .get(short_name)
            .and_then(|name| self.flags.get(name))
    }

    /// Named arguments in name order.
    pub fn arguments(&self) -> impl Iterator<Item = &Argument> {
        self.args.values()
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.args.get(name)
    }

    pub fn argument_by_short_name(&self, short_name: &str) -> Option<&Argument> {
        self.args_by_short_name
            .get(short_name)
            .and_then(|name| self.args.get(name))
    }

    pub fn primary_arg(&self) -> Option<&PrimaryArgument> {
        self.primary_arg.as_ref()
    }

    /// Subcommands in name order.
    pub fn subcommands(&self) -> impl Iterator<Item = &Command> {
        self.subcommands.values()
    }

    pub fn subcommand(&self, name: &str) -> Option<&Command> {
        self.subcommands.get(name)
    }

    pub fn subcommand_names(&self) -> Vec<&str> {
        self.subcommands.keys().map(String::as_str).collect()
    }

    pub fn has_subcommands(&self) -> bool {
        !self.subcommands.is_empty()
    }

    /// Walks a path of subcommand names from this command.
    ///
    /// An empty path returns `self`.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&Command> {
        path.iter()
            .try_fold(self, |command, name| command.subcommand(name.as_ref()))
    }

    /// Renders the help text of this command.
    pub fn help_message(&self) -> String {
        help_message(self)
    }

    /// Prints the help text of this command to stdout.
    pub fn print_help(&self) {
        println!("{}", self.help_message());
    }
}
