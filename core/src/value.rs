//! Argument value kinds and the values they produce.
//!
//! Every named argument has a kind ([`IntKind`], [`FloatKind`],
//! [`StringKind`] or [`SelectorKind`]) that turns the raw text of a token
//! into a typed value. Kinds only perform the syntactic part of the check;
//! caller-supplied validators run afterwards (see
//! [`TypedArgument`](crate::TypedArgument)).

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::argument::{Argument, TypedArgument};
use crate::error::ParseError;

/// A parsed argument value.
///
/// Selector values are stored as [`Value::Str`].
///
/// # Examples
///
/// ```
/// use olive_core::Value;
///
/// let v = Value::from(42isize);
/// assert_eq!(v.as_int(), Some(42));
/// assert_eq!(v.as_str(), None);
/// assert_eq!(v.to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(isize),
    Float(f64),
    Str(String),
}

impl Value {
    /// Returns the integer, if this is an integer value.
    pub fn as_int(&self) -> Option<isize> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float, if this is a float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string, if this is a string or selector value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
        }
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

/// A validator over a typed value. `Err` carries the rejection reason.
pub type Validator<T> = Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// Syntactic rejection of a raw value by a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindError {
    /// The text is not a literal of the kind's type.
    Invalid(String),
    /// The text is well-formed but not one of the legal values.
    NotAllowed { expected: String },
}

impl KindError {
    /// Human-readable reason, used when a default value is rejected.
    pub fn reason(&self) -> String {
        match self {
            KindError::Invalid(reason) => reason.clone(),
            KindError::NotAllowed { expected } => format!("expected one of: {expected}"),
        }
    }

    pub(crate) fn into_parse_error(self, argument: &str, value: &str) -> ParseError {
        match self {
            KindError::Invalid(reason) => ParseError::InvalidValue {
                argument: argument.to_string(),
                value: value.to_string(),
                reason,
            },
            KindError::NotAllowed { expected } => ParseError::NotAllowedValue {
                argument: argument.to_string(),
                value: value.to_string(),
                expected,
            },
        }
    }
}

/// The capability shared by all argument kinds: turn raw text into a typed
/// value.
///
/// The set of kinds is closed; `wrap` and `typed_mut` tie each kind to its
/// variant of [`Argument`].
pub trait ValueKind: fmt::Debug + Send + Sync + Sized + 'static {
    /// The typed value produced by this kind.
    type Value: Clone + fmt::Debug + fmt::Display + PartialEq + Send + Sync + Into<Value>;

    /// Short type label shown in usage lines (e.g. `int`).
    fn hint(&self) -> String;

    /// Parses the raw text of a token.
    fn parse(&self, raw: &str) -> Result<Self::Value, KindError>;

    /// Checks an already-typed value (used for defaults). Most kinds accept
    /// every value of their type.
    fn admits(&self, _value: &Self::Value) -> Result<(), KindError> {
        Ok(())
    }

    #[doc(hidden)]
    fn wrap(argument: TypedArgument<Self>) -> Argument;

    #[doc(hidden)]
    fn typed_mut(argument: &mut Argument) -> Option<&mut TypedArgument<Self>>;
}

/// Signed integers of the platform's native width.
///
/// Accepts an optional sign and the `0x`, `0o`, `0b` base prefixes; a
/// leading `0` selects octal.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntKind;

impl ValueKind for IntKind {
    type Value = isize;

    fn hint(&self) -> String {
        "int".to_string()
    }

    fn parse(&self, raw: &str) -> Result<isize, KindError> {
        parse_int_literal(raw).map_err(KindError::Invalid)
    }

    fn wrap(argument: TypedArgument<Self>) -> Argument {
        Argument::Int(argument)
    }

    fn typed_mut(argument: &mut Argument) -> Option<&mut TypedArgument<Self>> {
        match argument {
            Argument::Int(arg) => Some(arg),
            _ => None,
        }
    }
}

fn parse_int_literal(raw: &str) -> Result<isize, String> {
    let (negative, digits) = if let Some(rest) = raw.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = raw.strip_prefix('+') {
        (false, rest)
    } else {
        (false, raw)
    };

    let (radix, body) = if let Some(rest) = strip_base_prefix(digits, 'x') {
        (16, rest)
    } else if let Some(rest) = strip_base_prefix(digits, 'o') {
        (8, rest)
    } else if let Some(rest) = strip_base_prefix(digits, 'b') {
        (2, rest)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };

    // from_str_radix would otherwise accept a second sign
    if body.is_empty() || body.starts_with(['+', '-']) {
        return Err(format!("`{raw}` is not an integer literal"));
    }

    let signed = if negative {
        format!("-{body}")
    } else {
        body.to_string()
    };
    isize::from_str_radix(&signed, radix).map_err(|err| format!("`{raw}`: {err}"))
}

fn strip_base_prefix(digits: &str, marker: char) -> Option<&str> {
    let rest = digits.strip_prefix('0')?;
    rest.strip_prefix(marker)
        .or_else(|| rest.strip_prefix(marker.to_ascii_uppercase()))
}

/// 64-bit floating point numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatKind;

impl ValueKind for FloatKind {
    type Value = f64;

    fn hint(&self) -> String {
        "float".to_string()
    }

    fn parse(&self, raw: &str) -> Result<f64, KindError> {
        raw.parse::<f64>()
            .map_err(|err| KindError::Invalid(format!("`{raw}`: {err}")))
    }

    fn wrap(argument: TypedArgument<Self>) -> Argument {
        Argument::Float(argument)
    }

    fn typed_mut(argument: &mut Argument) -> Option<&mut TypedArgument<Self>> {
        match argument {
            Argument::Float(arg) => Some(arg),
            _ => None,
        }
    }
}

/// Free-form strings. Parsing never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringKind;

impl ValueKind for StringKind {
    type Value = String;

    fn hint(&self) -> String {
        "string".to_string()
    }

    fn parse(&self, raw: &str) -> Result<String, KindError> {
        Ok(raw.to_string())
    }

    fn wrap(argument: TypedArgument<Self>) -> Argument {
        Argument::String(argument)
    }

    fn typed_mut(argument: &mut Argument) -> Option<&mut TypedArgument<Self>> {
        match argument {
            Argument::String(arg) => Some(arg),
            _ => None,
        }
    }
}

/// Strings restricted to a fixed set of legal values.
///
/// # Examples
///
/// ```
/// use olive_core::{KindError, SelectorKind, ValueKind};
///
/// let kind = SelectorKind::new(["json", "yaml"]);
/// assert_eq!(kind.parse("json").unwrap(), "json");
/// assert!(matches!(kind.parse("toml"), Err(KindError::NotAllowed { .. })));
/// assert_eq!(kind.hint(), "json|yaml");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectorKind {
    values: BTreeSet<String>,
}

impl SelectorKind {
    /// Creates a selector over the given legal values.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The legal values, in sorted order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    fn expected(&self) -> String {
        self.values().collect::<Vec<_>>().join(", ")
    }
}

impl ValueKind for SelectorKind {
    type Value = String;

    fn hint(&self) -> String {
        self.values().collect::<Vec<_>>().join("|")
    }

    fn parse(&self, raw: &str) -> Result<String, KindError> {
        if self.values.contains(raw) {
            Ok(raw.to_string())
        } else {
            Err(KindError::NotAllowed {
                expected: self.expected(),
            })
        }
    }

    fn admits(&self, value: &String) -> Result<(), KindError> {
        self.parse(value).map(|_| ())
    }

    fn wrap(argument: TypedArgument<Self>) -> Argument {
        Argument::Selector(argument)
    }

    fn typed_mut(argument: &mut Argument) -> Option<&mut TypedArgument<Self>> {
        match argument {
            Argument::Selector(arg) => Some(arg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_accepts_base_prefixes() {
        assert_eq!(IntKind.parse("42"), Ok(42));
        assert_eq!(IntKind.parse("-7"), Ok(-7));
        assert_eq!(IntKind.parse("+7"), Ok(7));
        assert_eq!(IntKind.parse("0x1F"), Ok(31));
        assert_eq!(IntKind.parse("0XfF"), Ok(255));
        assert_eq!(IntKind.parse("0o17"), Ok(15));
        assert_eq!(IntKind.parse("0b101"), Ok(5));
        assert_eq!(IntKind.parse("017"), Ok(15));
        assert_eq!(IntKind.parse("-0x10"), Ok(-16));
        assert_eq!(IntKind.parse("0"), Ok(0));
    }

    #[test]
    fn test_int_rejects_malformed_literals() {
        for raw in ["", "-", "10.5", "abc", "0x", "--1", "+-1", "0b2", "08", "1 2"] {
            assert!(
                matches!(IntKind.parse(raw), Err(KindError::Invalid(_))),
                "`{raw}` should be rejected"
            );
        }
    }

    #[test]
    fn test_int_rejects_overflow() {
        let too_big = format!("{}0", isize::MAX);
        assert!(IntKind.parse(&too_big).is_err());
    }

    #[test]
    fn test_float_parsing() {
        assert_eq!(FloatKind.parse("0.5"), Ok(0.5));
        assert_eq!(FloatKind.parse("-2"), Ok(-2.0));
        assert_eq!(FloatKind.parse("1e3"), Ok(1000.0));
        assert!(FloatKind.parse("ten").is_err());
        assert!(FloatKind.parse("").is_err());
    }

    #[test]
    fn test_string_never_fails() {
        assert_eq!(StringKind.parse(""), Ok(String::new()));
        assert_eq!(StringKind.parse("a=b"), Ok("a=b".to_string()));
    }

    #[test]
    fn test_selector_membership() {
        let kind = SelectorKind::new(["val1", "val2"]);
        assert_eq!(kind.parse("val2"), Ok("val2".to_string()));
        assert_eq!(
            kind.parse("val3"),
            Err(KindError::NotAllowed {
                expected: "val1, val2".to_string()
            })
        );
        assert!(kind.admits(&"val1".to_string()).is_ok());
        assert!(kind.admits(&"VAL1".to_string()).is_err());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from(0.25).as_float(), Some(0.25));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from(3isize).as_float(), None);
    }
}
