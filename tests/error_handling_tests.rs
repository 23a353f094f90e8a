//! Exit codes and structured error reporting for the CLI entry point.

use clap::Parser;
use dupescan::cli::Cli;
use dupescan::error::{ExitCode, StructuredError};
use std::fs;
use tempfile::tempdir;

fn run(args: &[&str]) -> anyhow::Result<ExitCode> {
    let mut argv = vec!["dupescan"];
    argv.extend_from_slice(args);
    dupescan::run_app(Cli::try_parse_from(argv).unwrap())
}

#[test]
fn test_exit_code_no_duplicates() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("unique.txt"), b"unique").unwrap();

    let code = run(&[dir.path().to_str().unwrap(), "--output", "json"]).unwrap();
    assert_eq!(code, ExitCode::NoDuplicates);
}

#[test]
fn test_exit_code_success() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"dup").unwrap();
    fs::write(dir.path().join("b"), b"dup").unwrap();

    let code = run(&[dir.path().to_str().unwrap(), "--no-progress", "--no-color"]).unwrap();
    assert_eq!(code, ExitCode::Success);
}

#[test]
fn test_empty_directory_reports_no_duplicates() {
    let dir = tempdir().unwrap();

    let code = run(&[dir.path().to_str().unwrap(), "-q", "--output", "json"]).unwrap();
    assert_eq!(code, ExitCode::NoDuplicates);
}

#[test]
fn test_missing_directory_is_general_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let err = run(&[missing.to_str().unwrap()]).unwrap_err();
    let code = ExitCode::for_error(&err);
    assert_eq!(code, ExitCode::GeneralError);

    let structured = StructuredError::new(&err, code);
    let json = serde_json::to_value(&structured).unwrap();
    assert_eq!(json["code"], "DS001");
    assert_eq!(json["exit_code"], 1);
    assert!(json["message"].as_str().unwrap().contains("Directory not found"));
}
