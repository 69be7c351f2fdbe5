use std::fs;
use std::path::Path;

use olive_core::{ParseError, Parser};
use olive_definition::{CommandDefinition, DefinitionError};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const PACKAGE_YAML: &str = r#"
name: olive
description: A friendly package tool
flags:
  - name: verbose
    short: v
    description: Print more
subcommands:
  - name: version
  - name: build
    description: Build a package
    primary:
      name: package-name
      required: true
    arguments:
      - name: profile
        short: p
        type: string
      - name: output
        short: o
        type: string
        required: true
        default: cool_path
  - name: mod
    arguments:
      - name: int
        short: i
        type: int
        required: true
    subcommands:
      - name: update
      - name: init
        primary:
          name: module-name
"#;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_load_yaml_and_parse() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "olive.yaml", PACKAGE_YAML);

    let cli = CommandDefinition::load(&path).unwrap().build().unwrap();
    let parser = Parser::new(&cli).with_help_handler(|_| {});

    let result = parser.parse(["build", "-o=other_path", "package"]).unwrap();
    let (name, build) = result.subcommand().unwrap();
    assert_eq!(name, "build");
    assert_eq!(build.string_argument("output"), Some("other_path"));
    assert_eq!(build.primary_arg(), Some("package"));

    let result = parser.parse(["mod", "init", "-v", "pog"]).unwrap();
    assert!(result.has_flag("verbose"));
    assert_eq!(result.subcommand_path(), vec!["mod", "init"]);
    assert_eq!(result.deepest().primary_arg(), Some("pog"));

    assert_eq!(
        parser.parse(["mod"]).unwrap_err(),
        ParseError::MissingSubcommand("mod".into())
    );
}

#[test]
fn test_save_and_reload_across_formats() {
    let dir = TempDir::new().unwrap();
    let yaml_path = write(dir.path(), "olive.yml", PACKAGE_YAML);
    let definition = CommandDefinition::load(&yaml_path).unwrap();

    let json_path = dir.path().join("olive.json");
    definition.save(&json_path).unwrap();
    let text = fs::read_to_string(&json_path).unwrap();
    assert!(text.trim_start().starts_with('{'));

    let reloaded = CommandDefinition::load(&json_path).unwrap();
    assert_eq!(reloaded, definition);

    let yaml_copy = dir.path().join("copy.yaml");
    reloaded.save(&yaml_copy).unwrap();
    assert_eq!(CommandDefinition::load(&yaml_copy).unwrap(), definition);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = CommandDefinition::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, DefinitionError::Io(_)));
}

#[test]
fn test_malformed_files() {
    let dir = TempDir::new().unwrap();

    let json = write(dir.path(), "bad.json", "{ \"name\": ");
    assert!(matches!(
        CommandDefinition::load(&json).unwrap_err(),
        DefinitionError::Json(_)
    ));

    let yaml = write(dir.path(), "bad.yaml", "name: olive\nflags: 12\n");
    assert!(matches!(
        CommandDefinition::load(&yaml).unwrap_err(),
        DefinitionError::Yaml(_)
    ));
}

#[test]
fn test_duplicate_flag_reports_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "dup.yaml",
        "name: olive\nflags:\n  - { name: help, short: x }\n",
    );

    let err = CommandDefinition::load(&path).unwrap().build().unwrap_err();
    assert!(matches!(err, DefinitionError::Config(_)));
    assert!(err.to_string().contains("help"), "{err}");
}
