//! Tests for the `mustepub` command-line entry point.

use std::process::Command;

mod common;
use common::{assert_valid_zip_file, read_package_document, setup_test_dir, write_manuscript};

fn mustepub() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mustepub"))
}

#[test]
fn test_no_argument_prints_usage_and_succeeds() {
    let output = mustepub().output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Usage: mustepub file.txt");
}

#[test]
fn test_conversion_prints_progress_lines() {
    let test_dir = setup_test_dir("cli_progress");
    let input = write_manuscript(
        &test_dir,
        "story.txt",
        &["序", "# 第一章 <起>", "正文", "# Two"],
    );

    let output = mustepub().arg(&input).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["added section: 第一章 <起>", "added section: Two", "writing..."]
    );
    assert_valid_zip_file(&test_dir.join("story.epub"));
}

#[test]
fn test_quiet_suppresses_progress() {
    let test_dir = setup_test_dir("cli_quiet");
    let input = write_manuscript(&test_dir, "quiet.txt", &["# 一", "二"]);

    let output = mustepub().arg("--quiet").arg(&input).output().unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_valid_zip_file(&test_dir.join("quiet.epub"));
}

#[test]
fn test_missing_file_exits_with_failure() {
    let test_dir = setup_test_dir("cli_missing");

    let output = mustepub()
        .env_remove("RUST_LOG")
        .arg(test_dir.join("does-not-exist.txt"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    // Reported once, not again through the logger
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "unexpected stderr: {stderr}");
    assert!(lines[0].starts_with("error: "));
    assert!(lines[0].contains("does-not-exist.txt"));
}

#[test]
fn test_tags_are_written_as_subjects() {
    let test_dir = setup_test_dir("cli_tags");
    let input = write_manuscript(&test_dir, "tagged.txt", &["# 一", "二"]);

    let output = mustepub()
        .args(["-q", "--tag", "科幻", "-s", "短篇"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let package = read_package_document(&test_dir.join("tagged.epub"));
    assert!(package.contains("科幻"));
    assert!(package.contains("短篇"));
}
