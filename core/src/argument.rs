//! Named arguments (`--name=value`) and primary arguments.

use std::fmt;
use std::sync::Arc;

use crate::error::{ConfigError, ParseError};
use crate::value::{FloatKind, IntKind, SelectorKind, StringKind, Validator, Value, ValueKind};

/// Integer argument handle returned by [`Command::add_int_arg`](crate::Command::add_int_arg).
pub type IntArgument = TypedArgument<IntKind>;
/// Float argument handle returned by [`Command::add_float_arg`](crate::Command::add_float_arg).
pub type FloatArgument = TypedArgument<FloatKind>;
/// String argument handle returned by [`Command::add_string_arg`](crate::Command::add_string_arg).
pub type StringArgument = TypedArgument<StringKind>;
/// Selector argument handle returned by [`Command::add_selector_arg`](crate::Command::add_selector_arg).
pub type SelectorArgument = TypedArgument<SelectorKind>;

/// A named argument of one kind, with its optional validator and default.
///
/// The default is stored with explicit presence, so a zero default (`0`,
/// `""`) is a real default.
///
/// # Examples
///
/// ```
/// use olive_core::Command;
///
/// let mut cli = Command::new("olive", "", false);
/// let int = cli.add_int_arg("int", "i", "An even number", false).unwrap();
/// int.set_validator(|x| if x % 2 == 0 { Ok(()) } else { Err("must be even".into()) })
///     .unwrap();
/// int.set_default_value(0).unwrap();
///
/// assert_eq!(int.default_value(), Some(&0));
/// assert!(int.set_default_value(3).is_err());
/// ```
pub struct TypedArgument<K: ValueKind> {
    name: String,
    short_name: String,
    description: String,
    required: bool,
    kind: K,
    validator: Option<Validator<K::Value>>,
    default: Option<K::Value>,
}

impl<K: ValueKind> TypedArgument<K> {
    pub(crate) fn new(
        name: String,
        short_name: String,
        description: String,
        required: bool,
        kind: K,
    ) -> Self {
        Self {
            name,
            short_name,
            description,
            required,
            kind,
            validator: None,
            default: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn default_value(&self) -> Option<&K::Value> {
        self.default.as_ref()
    }

    /// Installs a validator that runs after the value has been parsed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDefault`] if a default value is already
    /// set and the validator rejects it. The previous validator is kept.
    pub fn set_validator<F>(&mut self, validator: F) -> Result<&mut Self, ConfigError>
    where
        F: Fn(&K::Value) -> Result<(), String> + Send + Sync + 'static,
    {
        let validator: Validator<K::Value> = Arc::new(validator);
        if let Some(default) = &self.default {
            self.check_default(default, Some(&validator))?;
        }
        self.validator = Some(validator);
        Ok(self)
    }

    /// Sets the value used when the argument does not appear on the command
    /// line.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDefault`] if the value fails the
    /// validator or, for selectors, is not a legal value.
    pub fn set_default_value(&mut self, value: K::Value) -> Result<&mut Self, ConfigError> {
        self.check_default(&value, self.validator.as_ref())?;
        self.default = Some(value);
        Ok(self)
    }

    fn check_default(
        &self,
        value: &K::Value,
        validator: Option<&Validator<K::Value>>,
    ) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidDefault {
            argument: self.name.clone(),
            value: value.to_string(),
            reason,
        };

        self.kind.admits(value).map_err(|err| invalid(err.reason()))?;
        if let Some(validator) = validator {
            validator(value).map_err(invalid)?;
        }
        Ok(())
    }

    /// Parses and validates the raw text of a token.
    fn check_value(&self, raw: &str) -> Result<Value, ParseError> {
        let value = self
            .kind
            .parse(raw)
            .map_err(|err| err.into_parse_error(&self.name, raw))?;

        if let Some(validator) = &self.validator {
            validator(&value).map_err(|reason| ParseError::ValidationFailed {
                argument: self.name.clone(),
                value: raw.to_string(),
                reason,
            })?;
        }

        Ok(value.into())
    }
}

impl<K: ValueKind> fmt::Debug for TypedArgument<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedArgument")
            .field("name", &self.name)
            .field("short_name", &self.short_name)
            .field("required", &self.required)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

/// A named argument of any kind, as stored in a [`Command`](crate::Command).
#[derive(Debug)]
pub enum Argument {
    Int(IntArgument),
    Float(FloatArgument),
    String(StringArgument),
    Selector(SelectorArgument),
}

macro_rules! dispatch {
    ($arg:expr, $bound:ident => $body:expr) => {
        match $arg {
            Argument::Int($bound) => $body,
            Argument::Float($bound) => $body,
            Argument::String($bound) => $body,
            Argument::Selector($bound) => $body,
        }
    };
}

impl Argument {
    pub fn name(&self) -> &str {
        dispatch!(self, arg => arg.name())
    }

    pub fn short_name(&self) -> &str {
        dispatch!(self, arg => arg.short_name())
    }

    pub fn description(&self) -> &str {
        dispatch!(self, arg => arg.description())
    }

    pub fn required(&self) -> bool {
        dispatch!(self, arg => arg.required())
    }

    /// The default value, if one is set.
    pub fn default_value(&self) -> Option<Value> {
        dispatch!(self, arg => arg.default_value().cloned().map(Into::into))
    }

    /// Type label for usage lines (`int`, `float`, `string`, or `a|b|c`).
    pub fn value_hint(&self) -> String {
        dispatch!(self, arg => arg.kind().hint())
    }

    pub(crate) fn check_value(&self, raw: &str) -> Result<Value, ParseError> {
        dispatch!(self, arg => arg.check_value(raw))
    }
}

/// The single unlabeled argument of a command (e.g. `<file>` in
/// `build <file>`). Its value is always the raw token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryArgument {
    name: String,
    description: String,
    required: bool,
}

impl PrimaryArgument {
    pub(crate) fn new(name: String, description: String, required: bool) -> Self {
        Self {
            name,
            description,
            required,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn required(&self) -> bool {
        self.required
    }
}
