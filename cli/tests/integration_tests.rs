use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn getopt_dump(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_getopt-dump"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run getopt-dump")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_game_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("game.yaml");
    fs::write(
        &path,
        r#"
short: "ab"
long: [hardmode, easymode]
options:
  - short: n
    parameter: true
    required: true
  - short: i
    long: input
    parameter: true
    required: true
"#,
    )
    .expect("failed to write config");
    path
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn test_parse_inline_definitions() {
    let output = getopt_dump(&[
        "parse", "--short", "abX:", "--long", "alpha", "--long", "xtras=", "--", "prog", "-abbX",
        "1", "--xtras", "v", "free", "--", "-a",
    ]);

    let json = stdout_json(&output);
    assert_eq!(
        json,
        serde_json::json!({
            "program": "prog",
            "free_args": ["free", "-a"],
            "options": [
                { "option": "-a", "count": 1 },
                { "option": "-b", "count": 2 },
                { "option": "-X", "count": 1, "parameters": ["1"] },
                { "option": "--xtras", "count": 1, "parameters": ["v"] }
            ]
        })
    );
}

#[test]
fn test_parse_with_config_and_validation() {
    let dir = TempDir::new().unwrap();
    let config = write_game_config(&dir);
    let config = config.to_str().unwrap();

    let output = getopt_dump(&[
        "parse", "--config", config, "--validate", "--", "test", "-abbbn", "12", "--input",
        "input.txt", "--hardmode",
    ]);
    let json = stdout_json(&output);
    assert_eq!(json["options"][0]["option"], "-n");
    assert_eq!(json["options"][0]["parameters"][0], "12");
    assert_eq!(json["options"][1]["option"], "-i/--input");
    assert_eq!(json["options"][3]["option"], "-b");
    assert_eq!(json["options"][3]["count"], 3);

    let output = getopt_dump(&["parse", "--config", config, "--validate", "--", "test", "-n", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: required option not provided: -i/--input"));
}

#[test]
fn test_parse_strict_rejects_unknown_option() {
    let output = getopt_dump(&["parse", "--short", "a", "--strict", "--", "prog", "-az"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: option '-z' is undefined"));
}

#[test]
fn test_parse_missing_parameter() {
    let output = getopt_dump(&["parse", "--long", "xtras=", "--", "prog", "--xtras"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no parameter specified for option '--xtras'"));
}

#[test]
fn test_parse_requires_program_name() {
    let output = getopt_dump(&["parse", "--short", "a"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("argv must have at least one entry"));
}

#[test]
fn test_parse_yaml_output() {
    let output = getopt_dump(&[
        "parse", "--short", "v", "--format", "yaml", "--", "prog", "-vv", "file",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("program: prog"));
    assert!(stdout.contains("-v"));
    assert!(stdout.contains("count: 2"));
}

#[test]
fn test_bad_config_exits_with_config_status() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "options:\n  - parameter: true\n").unwrap();

    let output = getopt_dump(&["parse", "--config", path.to_str().unwrap(), "--", "prog"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid option definition"));

    let output = getopt_dump(&["show", "--config", "missing.toml"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unsupported config format"));
}

#[test]
fn test_show_rejects_unloadable_short_string() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spaces.yaml");
    fs::write(&path, "short: \"a b-\"\n").unwrap();

    let output = getopt_dump(&["show", "--config", path.to_str().unwrap(), "--format", "yaml"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid short form"));
}

#[test]
fn test_verbose_logs_skipped_options() {
    let output = getopt_dump(&["-v", "parse", "--short", "a", "--", "prog", "-az"]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("skipping undefined option"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn test_show_table() {
    let dir = TempDir::new().unwrap();
    let config = write_game_config(&dir);

    let output = getopt_dump(&["show", "--config", config.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Options: 6  Mode: lenient"));
    assert!(stdout.contains("-i/--input"));
    assert!(stdout.contains("parameter, required"));
    assert!(stdout.contains("--easymode"));
}

#[test]
fn test_show_json_is_a_loadable_definition() {
    let dir = TempDir::new().unwrap();
    let config = write_game_config(&dir);

    let output = getopt_dump(&[
        "show",
        "--config",
        config.to_str().unwrap(),
        "--format",
        "json",
    ]);
    let json = stdout_json(&output);
    assert_eq!(json["strict"], false);
    assert_eq!(json["options"].as_array().unwrap().len(), 6);

    let flat = dir.path().join("flat.json");
    fs::write(&flat, &output.stdout).unwrap();
    let output = getopt_dump(&[
        "parse",
        "--config",
        flat.to_str().unwrap(),
        "--",
        "test",
        "-i",
        "a.txt",
    ]);
    let json = stdout_json(&output);
    assert_eq!(json["options"][0]["option"], "-i/--input");
}
