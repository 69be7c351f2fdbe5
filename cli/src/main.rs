mod output;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use olive_definition::CommandDefinition;
use tracing::debug;

use crate::output::{OutputFormat, TreeSummary, format_result};

#[derive(Debug, Parser)]
#[command(name = "olive", version, disable_help_subcommand = true)]
#[command(about = "Parse command lines against declarative command definitions")]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. debug, olive_core=trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a token list against a definition and print the result.
    Parse(ParseArgs),
    /// Print the help text of a command in a definition.
    Help(HelpArgs),
    /// Build a definition and report what it declares.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Command definition file (.yaml/.yml or .json).
    #[arg(long, short = 'd')]
    definition: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Tokens to parse, after `--`. The program name is not expected.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Command definition file (.yaml/.yml or .json).
    #[arg(long, short = 'd')]
    definition: PathBuf,
    /// Subcommand path; empty for the root command.
    path: Vec<String>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Command definition file (.yaml/.yml or .json).
    #[arg(long, short = 'd')]
    definition: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Help(args) => run_help(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.parse().unwrap_or_default()),
        )
        .init();
}

fn load_tree(path: &Path) -> Result<olive_core::Command, String> {
    let definition = CommandDefinition::load(path)
        .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;
    definition
        .build()
        .map_err(|err| format!("Invalid definition '{}': {err}", path.display()))
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let tree = load_tree(&args.definition)?;
    debug!(tokens = ?args.tokens, "parsing");

    // a help flag among the tokens prints that command's help and exits 0
    let result = olive_core::Parser::new(&tree)
        .parse(&args.tokens)
        .map_err(|err| err.to_string())?;

    print!("{}", format_result(&result, tree.name(), args.format)?);
    Ok(())
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let tree = load_tree(&args.definition)?;
    let command = tree.find(&args.path).ok_or_else(|| {
        format!(
            "Unknown command path '{}' in '{}'",
            args.path.join(" "),
            args.definition.display()
        )
    })?;

    print!("{}", command.help_message());
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let tree = load_tree(&args.definition)?;
    let summary = TreeSummary::of(&tree);

    println!(
        "ok: '{}' declares {} command(s), {} flag(s), {} argument(s), {} primary argument(s)",
        tree.name(),
        summary.commands,
        summary.flags,
        summary.arguments,
        summary.primary_arguments
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tokens_follow_separator() {
        let cli = Cli::try_parse_from([
            "olive", "parse", "-d", "cli.yaml", "--format", "text", "--", "build", "-v", "pkg",
        ])
        .unwrap();

        match cli.command {
            Command::Parse(args) => {
                assert_eq!(args.definition, PathBuf::from("cli.yaml"));
                assert_eq!(args.format, OutputFormat::Text);
                assert_eq!(args.tokens, vec!["build", "-v", "pkg"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_help_path_is_positional() {
        let cli =
            Cli::try_parse_from(["olive", "--log-level", "debug", "help", "-d", "x.json", "mod", "init"])
                .unwrap();

        match cli.command {
            Command::Help(args) => assert_eq!(args.path, vec!["mod", "init"]),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.log_level, "debug");
    }
}
