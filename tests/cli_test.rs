use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn diff_lines() -> Command {
    Command::cargo_bin("diff-lines").unwrap()
}

#[test]
fn missing_arguments_print_usage() {
    diff_lines()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_changed_files_argument_prints_usage() {
    diff_lines()
        .arg("syntax")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unknown_mode_is_rejected_before_any_work() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out.json");

    diff_lines()
        .args(["Syntax", "changed_files.txt", "--output"])
        .arg(&output)
        .current_dir(work.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown filter rule 'Syntax'"));

    assert!(!output.exists());
}

#[test]
fn missing_list_file_is_fatal() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out.json");

    diff_lines()
        .args(["testid", "does-not-exist.txt", "--output"])
        .arg(&output)
        .current_dir(work.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read changed files list"));

    assert!(!output.exists());
}

#[test]
fn empty_list_writes_empty_collection() {
    let work = TempDir::new().unwrap();
    let list = work.path().join("changed_files.txt");
    fs::write(&list, "\n\n").unwrap();

    diff_lines()
        .arg("syntax")
        .arg(&list)
        .current_dir(work.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(work.path().join("code_changes.json")).unwrap(),
        "[]\n"
    );
}

#[test]
fn diff_failure_exits_non_zero_but_writes_results() {
    // not a git repository, so every diff fails
    let work = TempDir::new().unwrap();
    let list = work.path().join("changed_files.txt");
    fs::write(&list, "tests/login.robot\n").unwrap();

    diff_lines()
        .arg("syntax")
        .arg(&list)
        .args(["--remote", ""])
        .env("BASE_BRANCH", "main")
        .env("HEAD_BRANCH", "topic")
        .current_dir(work.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 1 files could not be diffed"));

    let written = fs::read_to_string(work.path().join("code_changes.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value[0]["file"], "tests/login.robot");
    assert!(value[0]["error"].is_string());
    assert!(value[0].get("added_lines").is_none());
}
