//! The structured result of a successful parse.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::value::Value;

/// Result of parsing for one command scope.
///
/// The root result belongs to the root command; each selected subcommand
/// contributes one nested result, so the chain is exactly as deep as the
/// subcommand path taken. Accessors only look at this scope: walk
/// [`subcommand`](ParseResult::subcommand) to reach deeper ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    flags: BTreeSet<String>,
    arguments: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subcommand: Option<SubcommandResult>,
}

/// The subcommand chosen in a scope, with its own result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcommandResult {
    name: String,
    result: Box<ParseResult>,
}

impl ParseResult {
    /// Whether the flag was set in this scope.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    /// Names of the flags set in this scope, in name order.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    /// Value of an argument in this scope, either parsed or defaulted.
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    pub fn arguments(&self) -> &BTreeMap<String, Value> {
        &self.arguments
    }

    pub fn int_argument(&self, name: &str) -> Option<isize> {
        self.argument(name).and_then(Value::as_int)
    }

    pub fn float_argument(&self, name: &str) -> Option<f64> {
        self.argument(name).and_then(Value::as_float)
    }

    /// Value of a string or selector argument.
    pub fn string_argument(&self, name: &str) -> Option<&str> {
        self.argument(name).and_then(Value::as_str)
    }

    /// The raw primary-argument token, if one was given.
    pub fn primary_arg(&self) -> Option<&str> {
        self.primary_arg.as_deref()
    }

    /// The subcommand selected in this scope and its result.
    pub fn subcommand(&self) -> Option<(&str, &ParseResult)> {
        self.subcommand
            .as_ref()
            .map(|sub| (sub.name.as_str(), sub.result.as_ref()))
    }

    /// Names of the selected subcommands, outermost first.
    ///
    /// # Examples
    ///
    /// ```
    /// use olive_core::{Command, Parser};
    ///
    /// let mut cli = Command::new("olive", "", false);
    /// cli.add_subcommand("mod", "", false)
    ///     .unwrap()
    ///     .add_subcommand("init", "", false)
    ///     .unwrap();
    ///
    /// let result = Parser::new(&cli).parse(["mod", "init"]).unwrap();
    /// assert_eq!(result.subcommand_path(), vec!["mod", "init"]);
    /// ```
    pub fn subcommand_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut scope = self;
        while let Some((name, child)) = scope.subcommand() {
            path.push(name);
            scope = child;
        }
        path
    }

    /// The innermost scope of the chain (`self` when no subcommand was
    /// selected).
    pub fn deepest(&self) -> &ParseResult {
        let mut scope = self;
        while let Some((_, child)) = scope.subcommand() {
            scope = child;
        }
        scope
    }

    // Mutators used by the parser while the result is being built.

    /// Marks a flag as set. Returns `false` if it was already set.
    pub(crate) fn insert_flag(&mut self, name: &str) -> bool {
        self.flags.insert(name.to_string())
    }

    pub(crate) fn has_argument(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    pub(crate) fn insert_argument(&mut self, name: &str, value: Value) {
        self.arguments.insert(name.to_string(), value);
    }

    pub(crate) fn set_primary_arg(&mut self, value: &str) {
        self.primary_arg = Some(value.to_string());
    }

    pub(crate) fn set_subcommand(&mut self, name: &str, result: ParseResult) {
        self.subcommand = Some(SubcommandResult {
            name: name.to_string(),
            result: Box::new(result),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> ParseResult {
        let mut inner = ParseResult::default();
        inner.set_primary_arg("pog");

        let mut middle = ParseResult::default();
        middle.set_subcommand("init", inner);

        let mut root = ParseResult::default();
        root.insert_flag("verbose");
        root.set_subcommand("mod", middle);
        root
    }

    #[test]
    fn test_accessors_are_scope_local() {
        let root = chain();
        assert!(root.has_flag("verbose"));
        assert_eq!(root.primary_arg(), None);

        let (name, middle) = root.subcommand().unwrap();
        assert_eq!(name, "mod");
        assert!(!middle.has_flag("verbose"));
    }

    #[test]
    fn test_path_and_deepest() {
        let root = chain();
        assert_eq!(root.subcommand_path(), vec!["mod", "init"]);
        assert_eq!(root.deepest().primary_arg(), Some("pog"));

        let empty = ParseResult::default();
        assert!(empty.subcommand_path().is_empty());
        assert_eq!(empty.deepest(), &empty);
    }

    #[test]
    fn test_typed_argument_getters() {
        let mut result = ParseResult::default();
        result.insert_argument("int", Value::Int(2));
        result.insert_argument("float", Value::Float(0.5));
        result.insert_argument("str", Value::from("v"));

        assert_eq!(result.int_argument("int"), Some(2));
        assert_eq!(result.float_argument("float"), Some(0.5));
        assert_eq!(result.string_argument("str"), Some("v"));
        assert_eq!(result.int_argument("str"), None);
        assert_eq!(result.int_argument("missing"), None);
    }

    #[test]
    fn test_insert_flag_reports_repeats() {
        let mut result = ParseResult::default();
        assert!(result.insert_flag("flag1"));
        assert!(!result.insert_flag("flag1"));
    }

    #[test]
    fn test_serializes_nested_chain() {
        let json = serde_json::to_value(chain()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "flags": ["verbose"],
                "arguments": {},
                "subcommand": {
                    "name": "mod",
                    "result": {
                        "flags": [],
                        "arguments": {},
                        "subcommand": {
                            "name": "init",
                            "result": {
                                "flags": [],
                                "arguments": {},
                                "primary_arg": "pog"
                            }
                        }
                    }
                }
            })
        );
    }
}
