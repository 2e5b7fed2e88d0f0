//! Tests for the command-line interface

use assert_cmd::Command;
use clap::Parser;
use featsift::cli::Cli;
use featsift::pipeline::WrapperStrategy;
use predicates::prelude::*;
use std::path::PathBuf;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["featsift", "-i", "data.csv", "-t", "target"]);

    assert!(!cli.skip_text_vectorization, "Text vectorization is on by default");
    assert!(cli.wrapper.is_none());
    assert!(!cli.verbose);
    assert_eq!(cli.output_path(), PathBuf::from("data_selection.json"));

    let config = cli.selection_config().unwrap();
    assert_eq!(config.wrapper.strategy, WrapperStrategy::Sfs);
    assert_eq!(config.final_score_threshold, 0.10);
    assert_eq!(config.seed, 42);
}

#[test]
fn test_cli_config_file_then_flags() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("settings.json");
    std::fs::write(
        &config_path,
        r#"{"vocabulary_limit": 12, "wrapper": {"strategy": "sbs"}}"#,
    )
    .unwrap();

    let cli = Cli::parse_from([
        "featsift",
        "-i",
        "data.csv",
        "-t",
        "target",
        "--config",
        config_path.to_str().unwrap(),
        "--wrapper",
        "rfe",
    ]);
    let config = cli.selection_config().unwrap();
    assert_eq!(config.vocabulary_limit, 12, "File value is kept");
    assert_eq!(config.wrapper.strategy, WrapperStrategy::Rfe, "Flag overrides file");
}

#[test]
fn test_cli_rejects_unknown_wrapper() {
    let parsed = Cli::try_parse_from(["featsift", "-i", "d.csv", "-t", "y", "--wrapper", "genetic"]);
    assert!(parsed.is_err());
}

#[test]
fn test_binary_writes_selection_json() {
    let (dir, input) = common::create_temp_csv(&common::create_sms_rows());
    let output = dir.path().join("result.json");

    Command::cargo_bin("featsift")
        .unwrap()
        .args(["-i", input.to_str().unwrap(), "-t", "label", "-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("SELECTION SUMMARY"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["mode"], "CLASSIFICATION");
    assert_eq!(json["metadata"]["target_column"], "label");
    assert_eq!(json["featureScores"].as_array().unwrap().len(), 2);
}

#[test]
fn test_binary_default_output_path() {
    let (dir, input) = common::create_temp_csv(&common::create_linear_rows());

    Command::cargo_bin("featsift")
        .unwrap()
        .args(["-i", input.to_str().unwrap(), "-t", "y"])
        .assert()
        .success();

    assert!(dir.path().join("test_data_selection.json").exists());
}

#[test]
fn test_binary_missing_target_fails() {
    let (_dir, input) = common::create_temp_csv(&common::create_linear_rows());

    Command::cargo_bin("featsift")
        .unwrap()
        .args(["-i", input.to_str().unwrap(), "-t", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_binary_skip_text_lists_columns() {
    let (_dir, input) = common::create_temp_csv(&common::create_sms_rows());

    Command::cargo_bin("featsift")
        .unwrap()
        .args(["-i", input.to_str().unwrap(), "-t", "label", "--skip-text-vectorization"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("message"));
}
