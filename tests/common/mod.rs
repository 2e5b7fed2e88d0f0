//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build string rows from literals (header row first).
pub fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

/// Five samples where `y = 2x`.
///
/// Only five distinct target values, so the mode detector treats it as
/// classification; `x` is still perfectly correlated with the label codes.
pub fn create_linear_rows() -> Vec<Vec<String>> {
    rows(&[
        &["x", "y"],
        &["1", "2"],
        &["2", "4"],
        &["3", "6"],
        &["4", "8"],
        &["5", "10"],
    ])
}

/// Twelve samples with `a`, an exact copy `a_copy`, and a binary target.
pub fn create_duplicate_rows() -> Vec<Vec<String>> {
    let mut data = vec![vec!["a".to_string(), "a_copy".to_string(), "label".to_string()]];
    for i in 0..12 {
        let value = (i + 1).to_string();
        let label = if i < 6 { "no" } else { "yes" };
        data.push(vec![value.clone(), value, label.to_string()]);
    }
    data
}

/// A text column made only of stop words next to a numeric feature.
pub fn create_stop_word_rows() -> Vec<Vec<String>> {
    rows(&[
        &["note", "score", "label"],
        &["the and you", "1", "a"],
        &["call me for free", "2", "b"],
        &["it is what it is", "3", "a"],
        &["we will get ok", "4", "b"],
    ])
}

/// Twenty SMS-style messages with a length feature and a spam/ham label.
pub fn create_sms_rows() -> Vec<Vec<String>> {
    let spam = [
        "winner prize claim now",
        "urgent prize waiting winner",
        "claim your cash prize",
        "winner winner cash reward",
        "exclusive prize claim today",
        "cash reward claim urgent",
        "winner selected prize draw",
        "claim cash prize urgent",
        "prize winner reward cash",
        "urgent claim reward winner",
    ];
    let ham = [
        "lunch later with mom",
        "see you at dinner",
        "meeting moved to monday",
        "dinner tonight with family",
        "running late for lunch",
        "monday meeting agenda attached",
        "family dinner on sunday",
        "lunch meeting with team",
        "dinner plans for tonight",
        "sunday lunch with family",
    ];

    let mut data = vec![vec![
        "message_id".to_string(),
        "message".to_string(),
        "length".to_string(),
        "label".to_string(),
    ]];
    for (i, text) in spam.iter().enumerate() {
        data.push(vec![
            format!("s{}", i),
            text.to_string(),
            (20 + i).to_string(),
            "spam".to_string(),
        ]);
    }
    for (i, text) in ham.iter().enumerate() {
        data.push(vec![
            format!("h{}", i),
            text.to_string(),
            (21 + i).to_string(),
            "ham".to_string(),
        ]);
    }
    data
}

/// Thirty samples with a continuous target driven by `signal`, plus a
/// constant column and a weak periodic one.
pub fn create_regression_rows() -> Vec<Vec<String>> {
    let mut data = vec![vec![
        "signal".to_string(),
        "constant".to_string(),
        "periodic".to_string(),
        "price".to_string(),
    ]];
    for i in 0..30 {
        let signal = i as f64;
        data.push(vec![
            format!("{}", signal),
            "7".to_string(),
            format!("{}", i % 3),
            format!("{:.1}", 3.0 * signal + 0.5),
        ]);
    }
    data
}

/// Write rows to a CSV file in a fresh temp dir, quoting every cell.
pub fn create_temp_csv(data: &[Vec<String>]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    for row in data {
        let line: Vec<String> = row
            .iter()
            .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
            .collect();
        writeln!(file, "{}", line.join(",")).unwrap();
    }

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Numeric frame for loader tests
pub fn create_numeric_dataframe() -> DataFrame {
    df! {
        "x" => [1.0f64, 2.5, 3.0],
        "count" => [Some(1i32), None, Some(3)],
        "label" => ["a", "b", "a"],
    }
    .unwrap()
}
