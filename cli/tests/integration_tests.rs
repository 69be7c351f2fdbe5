use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

const DEFINITION: &str = r#"
name: olive
description: A friendly package tool
requires_subcommand: false
flags:
  - { name: verbose, short: v, description: Print more }
arguments:
  - { name: int, short: i, type: int, default: 0 }
subcommands:
  - name: build
    description: Build a package
    primary: { name: package-name, description: Package to build, required: true }
    arguments:
      - { name: output, short: o, type: string, default: cool_path }
  - name: mod
    subcommands:
      - name: init
        primary: { name: module-name }
"#;

/// Writes the sample definition into a fresh temp directory.
fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("olive.yaml");
    fs::write(&path, DEFINITION).expect("failed to write definition");
    (dir, path)
}

fn olive(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_olive"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run olive")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_json_result() {
    let (_dir, def) = setup();
    let out = olive(&[
        "parse",
        "-d",
        def.to_str().unwrap(),
        "--",
        "build",
        "-o=other_path",
        "package",
    ]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["arguments"]["int"], 0);
    assert_eq!(json["subcommand"]["name"], "build");
    assert_eq!(json["subcommand"]["result"]["arguments"]["output"], "other_path");
    assert_eq!(json["subcommand"]["result"]["primary_arg"], "package");
}

#[test]
fn parse_prints_text_result() {
    let (_dir, def) = setup();
    let out = olive(&[
        "parse",
        "-d",
        def.to_str().unwrap(),
        "--format",
        "text",
        "--",
        "mod",
        "init",
        "-v",
        "pog",
    ]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "[olive]\n  --verbose\n  --int=0\n[olive mod]\n[olive mod init]\n  <pog>\n"
    );
}

#[test]
fn parse_prints_yaml_result() {
    let (_dir, def) = setup();
    let out = olive(&[
        "parse",
        "-d",
        def.to_str().unwrap(),
        "--format",
        "yaml",
        "--",
        "-i=4",
    ]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let yaml: serde_yaml::Value = serde_yaml::from_str(&stdout(&out)).unwrap();
    assert_eq!(yaml["arguments"]["int"].as_i64(), Some(4));
}

#[test]
fn parse_reports_errors_with_exit_code() {
    let (_dir, def) = setup();

    let out = olive(&["parse", "-d", def.to_str().unwrap(), "--", "-i=5.5"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("error: invalid value `5.5`"), "{}", stderr(&out));
    assert!(stdout(&out).is_empty());

    let out = olive(&["parse", "-d", def.to_str().unwrap(), "--", "--verbose", "build"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown subcommand: `build`"));
}

#[test]
fn parse_help_flag_prints_resolved_command_help() {
    let (_dir, def) = setup();
    let out = olive(&["parse", "-d", def.to_str().unwrap(), "--", "build", "-h"]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let help = stdout(&out);
    assert!(help.starts_with("Build a package\n\nUsage:\n\n    build <package-name>"));
    assert!(help.contains("Primary Argument:"));
    // help exits before the result is printed
    assert!(!help.contains("\"subcommand\""));
}

#[test]
fn parse_missing_definition_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.yaml");
    let out = olive(&["parse", "-d", missing.to_str().unwrap(), "--", "build"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Failed to load"));
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

#[test]
fn help_prints_root_and_nested_commands() {
    let (_dir, def) = setup();

    let out = olive(&["help", "-d", def.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let root = stdout(&out);
    assert!(root.contains("olive [command]"));
    assert!(root.contains("Commands:"));
    assert!(root.contains("build   Build a package"));

    let out = olive(&["help", "-d", def.to_str().unwrap(), "mod", "init"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("init [module-name]"));
}

#[test]
fn help_rejects_unknown_path() {
    let (_dir, def) = setup();
    let out = olive(&["help", "-d", def.to_str().unwrap(), "mod", "nope"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Unknown command path 'mod nope'"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_summarizes_definition() {
    let (_dir, def) = setup();
    let out = olive(&["check", "-d", def.to_str().unwrap()]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "ok: 'olive' declares 4 command(s), 5 flag(s), 2 argument(s), 2 primary argument(s)\n"
    );
}

#[test]
fn check_reports_invalid_definition() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{ "name": "olive", "primary": { "name": "p" }, "subcommands": [{ "name": "x" }] }"#,
    )
    .unwrap();

    let out = olive(&["check", "-d", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Invalid definition"), "{}", stderr(&out));
}
