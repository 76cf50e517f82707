use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;

fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap().parent().unwrap().to_path_buf()
}

#[test]
fn prints_the_window_document_tree() {
    let root = workspace_root();
    let mut cmd = Command::cargo_bin("marl").unwrap();
    cmd.arg(root.join("demos/window.marl"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("title: \"Marl Browser\""))
        .stdout(predicate::str::contains("size: [1280, 720]"));
}

#[test]
fn prints_the_theme_document_tree() {
    let root = workspace_root();
    let mut cmd = Command::cargo_bin("marl").unwrap();
    cmd.arg(root.join("demos/theme.marl"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("scale: 1.25"));
}

#[test]
fn dumps_tokens_with_positions() {
    let root = workspace_root();
    let mut cmd = Command::cargo_bin("marl").unwrap();
    cmd.arg("--tokens").arg(root.join("demos/window.marl"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Identifier"))
        .stdout(predicate::str::contains("StringLiteral"))
        .stdout(predicate::str::contains("LineComment"))
        .stdout(predicate::str::contains("Eof"));
}

#[test]
fn parse_error_is_nonzero() {
    let bad = "{title: \"untitled\"\n"; // missing closing brace on purpose
    let tmp_dir = tempfile::tempdir().unwrap();
    let bad_path = tmp_dir.path().join("bad.marl");
    std::fs::write(&bad_path, bad).unwrap();

    let mut cmd = Command::cargo_bin("marl").unwrap();
    cmd.arg(bad_path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"))
        .stderr(predicate::str::contains("unterminated struct"));
}

#[test]
fn duplicate_field_is_reported_at_the_second_key() {
    let bad = "{a: 1, a: 2}";
    let tmp_dir = tempfile::tempdir().unwrap();
    let bad_path = tmp_dir.path().join("dup.marl");
    std::fs::write(&bad_path, bad).unwrap();

    let mut cmd = Command::cargo_bin("marl").unwrap();
    cmd.arg(bad_path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("multiple definitions of struct field"))
        .stderr(predicate::str::contains("line 1, column 8"));
}

#[test]
fn trailing_input_is_rejected() {
    let bad = "{a: 1} extra";
    let tmp_dir = tempfile::tempdir().unwrap();
    let bad_path = tmp_dir.path().join("trailing.marl");
    std::fs::write(&bad_path, bad).unwrap();

    let mut cmd = Command::cargo_bin("marl").unwrap();
    cmd.arg(bad_path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected end of input"));
}

#[test]
fn missing_file_is_reported() {
    let mut cmd = Command::cargo_bin("marl").unwrap();
    cmd.arg("does-not-exist.marl");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
