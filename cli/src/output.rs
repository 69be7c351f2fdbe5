//! Output formatting for parse results and tree summaries.

use std::fmt::Write as _;

use olive_core::{Command, ParseResult};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

/// Formats a parse result in the requested output format.
///
/// `root` names the top-level scope in the text format; the serialized
/// formats mirror [`ParseResult`] as is.
pub fn format_result(
    result: &ParseResult,
    root: &str,
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(result)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(result).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Text => Ok(result_to_text(result, root)),
    }
}

/// One block per scope, outermost first:
///
/// ```text
/// [olive build]
///   --verbose
///   --output=cool_path
///   <package>
/// ```
fn result_to_text(result: &ParseResult, root: &str) -> String {
    let mut out = String::new();
    let mut path = root.to_string();
    let mut scope = Some(result);

    while let Some(current) = scope {
        let _ = writeln!(out, "[{path}]");
        for flag in current.flags() {
            let _ = writeln!(out, "  --{flag}");
        }
        for (name, value) in current.arguments() {
            let _ = writeln!(out, "  --{name}={value}");
        }
        if let Some(primary) = current.primary_arg() {
            let _ = writeln!(out, "  <{primary}>");
        }

        scope = current.subcommand().map(|(name, child)| {
            path.push(' ');
            path.push_str(name);
            child
        });
    }

    out
}

/// Declaration counts over a whole command tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeSummary {
    pub commands: usize,
    pub flags: usize,
    pub arguments: usize,
    pub primary_arguments: usize,
}

impl TreeSummary {
    pub fn of(command: &Command) -> Self {
        let mut summary = TreeSummary {
            commands: 1,
            flags: command.flags().count(),
            arguments: command.arguments().count(),
            primary_arguments: usize::from(command.primary_arg().is_some()),
        };
        for sub in command.subcommands() {
            let child = TreeSummary::of(sub);
            summary.commands += child.commands;
            summary.flags += child.flags;
            summary.arguments += child.arguments;
            summary.primary_arguments += child.primary_arguments;
        }
        summary
    }
}
