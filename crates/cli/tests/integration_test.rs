//! End-to-end tests for the `code_counter` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{TempDir, tempdir};

fn cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_code_counter"))
}

fn project() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(
        root.join("src/main.c"),
        "/*\n * header\n */\n#include <stdio.h>\n\nint main(void) { // entry\n    return 0;\n}\n",
    )
    .unwrap();
    fs::write(root.join("build.py"), "# build script\nprint('hi')  # trailing\n\n").unwrap();
    fs::write(root.join("notes.weird"), "not counted\n").unwrap();
    dir
}

#[test]
fn shows_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("code_counter"));
}

#[test]
fn text_report_lists_languages_and_totals() {
    let dir = project();
    cmd()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total : 2 files,  5 codes, 4 comments, 2 blanks, all 11 lines"))
        .stdout(predicate::str::contains("Languages"))
        .stdout(predicate::str::contains("src/main.c"))
        .stdout(predicate::str::contains("notes.weird").not());
}

#[test]
fn json_report_is_parseable() {
    let dir = project();
    let output = cmd().arg(dir.path()).args(["--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"]["files"], 2);
    assert_eq!(json["total"]["code"], 5);
    let dirs: Vec<&str> = json["directories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(dirs, [".", "src"]);
}

#[test]
fn csv_report_has_language_columns() {
    let dir = project();
    cmd()
        .arg(dir.path())
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "\"filename\", \"language\", \"python\", \"c\", \"comment\", \"blank\", \"total\"",
        ))
        .stdout(predicate::str::contains("\"Total\", \"-\", 1, 4, 4, 2, 11"));
}

#[test]
fn assoc_flag_adds_language() {
    let dir = project();
    cmd()
        .arg(dir.path())
        .args(["--assoc", "*.weird=python", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"notes.weird\", \"python\""));
}

#[test]
fn show_unsupported_lists_skipped_files() {
    let dir = project();
    cmd()
        .arg(dir.path())
        .args(["--show-unsupported", "--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Unsupported)"))
        .stdout(predicate::str::contains("## Files"));
}

#[test]
fn definitions_file_registers_language() {
    let dir = project();
    let defs = dir.path().join("langs.json");
    fs::write(
        &defs,
        r#"{ "languages": [{ "id": "weird", "extensions": [".weird"], "lineComments": ["not"] }] }"#,
    )
    .unwrap();

    let output = cmd()
        .arg(dir.path())
        .args(["--format", "json", "--exclude", "*.json", "--definitions"])
        .arg(&defs)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let weird = json["languages"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["name"] == "weird")
        .unwrap();
    assert_eq!(weird["comment"], 1);
}

#[test]
fn list_languages() {
    cmd()
        .arg("--list-languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("python"))
        .stdout(predicate::str::contains(".rs"));
}

#[test]
fn missing_path_fails() {
    cmd()
        .arg("/no/such/path/for/code_counter")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn empty_directory_reports_no_target() {
    let dir = tempdir().unwrap();
    cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("There was no target file."));
}
