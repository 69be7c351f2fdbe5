//! Serializable command definitions.
//!
//! A [`CommandDefinition`] is the data form of a command tree, so a program
//! (or the `olive` binary) can describe its command line in a file instead
//! of in code.
//!
//! # Example YAML
//!
//! ```yaml
//! name: olive
//! description: A friendly package tool
//! flags:
//!   - name: verbose
//!     short: v
//! subcommands:
//!   - name: build
//!     primary:
//!       name: package-name
//!       required: true
//!     arguments:
//!       - name: output
//!         short: o
//!         type: string
//!         default: cool_path
//!       - name: color
//!         short: c
//!         type: selector
//!         values: [auto, always, never]
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use olive_core::Command;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DefinitionError, Result};

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// On-disk format of a definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Yaml,
}

impl DefinitionFormat {
    /// Picks the format from the file extension: `.yaml`/`.yml` are YAML,
    /// everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DefinitionFormat::Yaml
            }
            _ => DefinitionFormat::Json,
        }
    }
}

/// A command and, recursively, its subcommands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Register the `help`/`h` flag.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub help: bool,
    /// Only meaningful when `subcommands` is not empty.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub requires_subcommand: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<FlagDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<PrimaryDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CommandDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagDefinition {
    pub name: String,
    pub short: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    pub name: String,
    pub short: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ArgumentType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Legal values of a selector argument.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    Int,
    Float,
    String,
    Selector,
}

/// A default value as written in the file. It is checked against the
/// argument type when the tree is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Int(v) => write!(f, "{v}"),
            DefaultValue::Float(v) => write!(f, "{v}"),
            DefaultValue::Text(v) => write!(f, "{v}"),
        }
    }
}

impl CommandDefinition {
    /// Loads a definition, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](DefinitionError::Io) if the file cannot be read, or
    /// [`Json`](DefinitionError::Json)/[`Yaml`](DefinitionError::Yaml) if
    /// parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let definition: Self = match DefinitionFormat::from_path(path) {
            DefinitionFormat::Yaml => serde_yaml::from_reader(reader)?,
            DefinitionFormat::Json => serde_json::from_reader(reader)?,
        };
        debug!(
            path = %path.display(),
            command = %definition.name,
            subcommands = definition.subcommands.len(),
            "loaded command definition"
        );
        Ok(definition)
    }

    /// Saves the definition, choosing the format by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        match DefinitionFormat::from_path(path) {
            DefinitionFormat::Yaml => serde_yaml::to_writer(writer, self)?,
            DefinitionFormat::Json => serde_json::to_writer_pretty(writer, self)?,
        }
        Ok(())
    }

    /// Parses a definition from text in the given format.
    pub fn from_str_as(text: &str, format: DefinitionFormat) -> Result<Self> {
        Ok(match format {
            DefinitionFormat::Yaml => serde_yaml::from_str(text)?,
            DefinitionFormat::Json => serde_json::from_str(text)?,
        })
    }

    /// Builds the command tree.
    ///
    /// # Errors
    ///
    /// Returns [`Config`](DefinitionError::Config) when the tree rejects a
    /// declaration (duplicate names, primary argument next to subcommands,
    /// invalid defaults) and
    /// [`InvalidDefinition`](DefinitionError::InvalidDefinition) when a
    /// default does not match its argument type or `values` appears on a
    /// non-selector argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use olive_definition::{CommandDefinition, DefinitionFormat};
    ///
    /// let yaml = "
    /// name: olive
    /// arguments:
    ///   - { name: int, short: i, type: int, default: 0 }
    /// ";
    /// let cli = CommandDefinition::from_str_as(yaml, DefinitionFormat::Yaml)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    /// assert!(cli.argument("int").is_some());
    /// assert!(cli.flag("help").is_some());
    /// ```
    pub fn build(&self) -> Result<Command> {
        let mut command = Command::new(&self.name, &self.description, self.help);
        self.configure(&mut command, &self.name)?;
        debug!(command = %self.name, "built command tree");
        Ok(command)
    }

    fn configure(&self, command: &mut Command, path: &str) -> Result<()> {
        command.set_requires_subcommand(self.requires_subcommand);

        for flag in &self.flags {
            command.add_flag(&flag.name, &flag.short, &flag.description)?;
        }
        for argument in &self.arguments {
            argument.add_to(command, path)?;
        }
        if let Some(primary) = &self.primary {
            command.add_primary_arg(&primary.name, &primary.description, primary.required)?;
        }
        for sub in &self.subcommands {
            let child = command.add_subcommand(&sub.name, &sub.description, sub.help)?;
            sub.configure(child, &format!("{path} {}", sub.name))?;
        }

        Ok(())
    }
}

impl ArgumentDefinition {
    fn add_to(&self, command: &mut Command, path: &str) -> Result<()> {
        let invalid = |message: String| DefinitionError::InvalidDefinition {
            path: format!("{path} --{}", self.name),
            message,
        };
        let mismatch = |default: &DefaultValue| {
            invalid(format!(
                "default `{default}` does not match type `{}`",
                self.kind.as_str()
            ))
        };

        if self.kind != ArgumentType::Selector && !self.values.is_empty() {
            return Err(invalid(
                "`values` is only allowed on selector arguments".to_string(),
            ));
        }

        let (name, short, description) = (&self.name, &self.short, &self.description);
        match self.kind {
            ArgumentType::Int => {
                let default = match &self.default {
                    None => None,
                    Some(DefaultValue::Int(v)) => Some(
                        isize::try_from(*v)
                            .map_err(|_| invalid(format!("default `{v}` is out of range")))?,
                    ),
                    Some(other) => return Err(mismatch(other)),
                };
                let arg = command.add_int_arg(name, short, description, self.required)?;
                if let Some(value) = default {
                    arg.set_default_value(value)?;
                }
            }
            ArgumentType::Float => {
                let default = match &self.default {
                    None => None,
                    Some(DefaultValue::Float(v)) => Some(*v),
                    Some(DefaultValue::Int(v)) => Some(*v as f64),
                    Some(other) => return Err(mismatch(other)),
                };
                let arg = command.add_float_arg(name, short, description, self.required)?;
                if let Some(value) = default {
                    arg.set_default_value(value)?;
                }
            }
            ArgumentType::String => {
                let default = self.text_default().map_err(mismatch)?;
                let arg = command.add_string_arg(name, short, description, self.required)?;
                if let Some(value) = default {
                    arg.set_default_value(value)?;
                }
            }
            ArgumentType::Selector => {
                if self.values.is_empty() {
                    return Err(invalid(
                        "selector arguments need at least one value".to_string(),
                    ));
                }
                let default = self.text_default().map_err(mismatch)?;
                let arg = command.add_selector_arg(
                    name,
                    short,
                    description,
                    self.required,
                    self.values.iter().cloned(),
                )?;
                if let Some(value) = default {
                    arg.set_default_value(value)?;
                }
            }
        }

        Ok(())
    }

    fn text_default(&self) -> std::result::Result<Option<String>, &DefaultValue> {
        match &self.default {
            None => Ok(None),
            Some(DefaultValue::Text(v)) => Ok(Some(v.clone())),
            Some(other) => Err(other),
        }
    }
}

impl ArgumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ArgumentType::Int => "int",
            ArgumentType::Float => "float",
            ArgumentType::String => "string",
            ArgumentType::Selector => "selector",
        }
    }
}
