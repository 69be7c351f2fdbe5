//! Help text rendering.
//!
//! Reads a [`Command`] through its public accessors only. Output is wrapped
//! at [`HELP_WIDTH`] columns and laid out in sections: description, usage,
//! commands, primary argument, arguments, flags. Empty sections are skipped.

use std::fmt::Write as _;

use crate::command::Command;

/// Column at which help text is wrapped.
pub const HELP_WIDTH: usize = 60;

const INDENT: &str = "    ";
const COLUMN_GAP: usize = 3;
const MIN_WRAP: usize = 20;

/// Renders the help text for `command`.
///
/// # Examples
///
/// ```
/// use olive_core::{Command, help_message};
///
/// let mut cli = Command::new("olive", "Builds things.", true);
/// cli.add_subcommand("build", "Build a package", true).unwrap();
///
/// let help = help_message(&cli);
/// assert!(help.starts_with("Builds things.\n\nUsage:\n\n    olive <command>"));
/// assert!(help.contains("\nCommands:\n\n    build   Build a package\n"));
/// assert!(help.contains("    -h, --help   Get help\n"));
/// ```
pub fn help_message(command: &Command) -> String {
    let mut out = String::new();

    if !command.description().is_empty() {
        out.push_str(&wrap(command.description(), HELP_WIDTH).join("\n"));
        out.push_str("\n\n");
    }

    out.push_str("Usage:\n\n");
    write_usage(&mut out, command);

    if command.has_subcommands() {
        out.push_str("\nCommands:\n\n");
        let entries: Vec<(String, String)> = command
            .subcommands()
            .map(|sub| (sub.name().to_string(), sub.description().to_string()))
            .collect();
        write_entries(&mut out, &entries);
    }

    if let Some(primary) = command.primary_arg() {
        out.push_str("\nPrimary Argument:\n\n");
        let entries = vec![(
            primary.name().to_string(),
            with_required(primary.description(), primary.required()),
        )];
        write_entries(&mut out, &entries);
    }

    let arguments: Vec<(String, String)> = command
        .arguments()
        .map(|arg| {
            (
                format!("-{}, --{}", arg.short_name(), arg.name()),
                with_required(arg.description(), arg.required()),
            )
        })
        .collect();
    if !arguments.is_empty() {
        out.push_str("\nArguments:\n\n");
        write_entries(&mut out, &arguments);
    }

    let flags: Vec<(String, String)> = command
        .flags()
        .map(|flag| {
            (
                format!("-{}, --{}", flag.short_name(), flag.name()),
                flag.description().to_string(),
            )
        })
        .collect();
    if !flags.is_empty() {
        out.push_str("\nFlags:\n\n");
        write_entries(&mut out, &flags);
    }

    out
}

fn write_usage(out: &mut String, command: &Command) {
    let mut parts = vec![command.name().to_string()];

    if command.has_subcommands() {
        parts.push(if command.requires_subcommand() {
            "<command>".to_string()
        } else {
            "[command]".to_string()
        });
    } else if let Some(primary) = command.primary_arg() {
        parts.push(if primary.required() {
            format!("<{}>", primary.name())
        } else {
            format!("[{}]", primary.name())
        });
    }

    for arg in command.arguments() {
        parts.push(format!(
            "[-{}|--{}=<{}>]",
            arg.short_name(),
            arg.name(),
            arg.value_hint()
        ));
    }
    for flag in command.flags() {
        parts.push(format!("[-{}|--{}]", flag.short_name(), flag.name()));
    }

    for line in wrap(&parts.join(" "), HELP_WIDTH - INDENT.len()) {
        let _ = writeln!(out, "{INDENT}{line}");
    }
}

/// Writes `label   description` rows with the descriptions aligned and
/// wrapped in the space left of the label column.
fn write_entries(out: &mut String, entries: &[(String, String)]) {
    let column = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0)
        + COLUMN_GAP;
    let width = HELP_WIDTH
        .saturating_sub(column + INDENT.len())
        .max(MIN_WRAP);

    for (label, description) in entries {
        let lines = wrap(description, width);
        let Some((first, rest)) = lines.split_first() else {
            let _ = writeln!(out, "{INDENT}{label}");
            continue;
        };

        let _ = writeln!(out, "{INDENT}{label:<column$}{first}");
        for line in rest {
            let _ = writeln!(out, "{INDENT}{:column$}{line}", "");
        }
    }
}

fn with_required(description: &str, required: bool) -> String {
    match (description.is_empty(), required) {
        (_, false) => description.to_string(),
        (true, true) => "(required)".to_string(),
        (false, true) => format!("{description} (required)"),
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines
}
