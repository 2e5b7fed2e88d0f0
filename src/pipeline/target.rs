//! Target column analysis and encoding
//!
//! This module decides whether the task is classification or regression from
//! the target column's values and encodes the target accordingly.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::values::{cell, is_numeric, parse_or_zero};

/// Learning task inferred from the target column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    Classification,
    Regression,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Classification => write!(f, "CLASSIFICATION"),
            Mode::Regression => write!(f, "REGRESSION"),
        }
    }
}

/// Encoded target values, one per sample
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// Label codes assigned in order of first occurrence
    Classification(Vec<usize>),
    /// Raw numeric values
    Regression(Vec<f64>),
}

impl Target {
    pub fn len(&self) -> usize {
        match self {
            Target::Classification(labels) => labels.len(),
            Target::Regression(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> Mode {
        match self {
            Target::Classification(_) => Mode::Classification,
            Target::Regression(_) => Mode::Regression,
        }
    }

    /// Target coerced to `f64` (label codes for classification).
    pub fn as_f64(&self) -> Vec<f64> {
        match self {
            Target::Classification(labels) => labels.iter().map(|&l| l as f64).collect(),
            Target::Regression(values) => values.clone(),
        }
    }

    /// Number of distinct classes (0 for regression).
    pub fn n_classes(&self) -> usize {
        match self {
            Target::Classification(labels) => labels.iter().max().map_or(0, |m| m + 1),
            Target::Regression(_) => 0,
        }
    }
}

/// Decide the task from the target column.
///
/// Only non-empty values are considered. Any non-numeric value means
/// classification; otherwise the task is classification when there are at most
/// `max_classes` distinct values and regression above that.
pub fn detect_mode(rows: &[Vec<String>], target_index: usize, max_classes: usize) -> Mode {
    let mut unique_values: HashSet<&str> = HashSet::new();
    let mut all_numeric = true;

    for row in rows {
        let value = cell(row, target_index);
        if value.is_empty() {
            continue;
        }
        unique_values.insert(value);
        if all_numeric && !is_numeric(value) {
            all_numeric = false;
        }
    }

    if !all_numeric || unique_values.len() <= max_classes {
        Mode::Classification
    } else {
        Mode::Regression
    }
}

/// Encode the target column for the given mode.
///
/// Classification assigns label codes in first-seen order over every row
/// (an empty cell is a label of its own); regression parses each cell, reading
/// unparseable cells as 0.0.
pub fn encode_target(rows: &[Vec<String>], target_index: usize, mode: Mode) -> Target {
    match mode {
        Mode::Classification => {
            let mut label_map: HashMap<&str, usize> = HashMap::new();
            let labels = rows
                .iter()
                .map(|row| {
                    let value = cell(row, target_index);
                    let next = label_map.len();
                    *label_map.entry(value).or_insert(next)
                })
                .collect();
            Target::Classification(labels)
        }
        Mode::Regression => Target::Regression(
            rows.iter()
                .map(|row| parse_or_zero(cell(row, target_index)))
                .collect(),
        ),
    }
}

/// Detect the mode and encode the target in one step.
pub fn prepare_target(rows: &[Vec<String>], target_index: usize, max_classes: usize) -> Target {
    let mode = detect_mode(rows, target_index, max_classes);
    info!("Detected mode: {}", mode);
    encode_target(rows, target_index, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<Vec<String>> {
        values.iter().map(|v| vec![v.to_string()]).collect()
    }

    #[test]
    fn test_few_numeric_values_is_classification() {
        let rows = column(&["0", "1", "0", "1", "2"]);
        assert_eq!(detect_mode(&rows, 0, 10), Mode::Classification);
    }

    #[test]
    fn test_many_numeric_values_is_regression() {
        let values: Vec<String> = (0..11).map(|i| format!("{}.5", i)).collect();
        let refs: Vec<&str> = values.iter().map(|s| s.as_str()).collect();
        assert_eq!(detect_mode(&column(&refs), 0, 10), Mode::Regression);
    }

    #[test]
    fn test_exactly_ten_distinct_is_classification() {
        let values: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = values.iter().map(|s| s.as_str()).collect();
        assert_eq!(detect_mode(&column(&refs), 0, 10), Mode::Classification);
    }

    #[test]
    fn test_non_numeric_is_always_classification() {
        let mut values: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        values.push("spam".to_string());
        let refs: Vec<&str> = values.iter().map(|s| s.as_str()).collect();
        assert_eq!(detect_mode(&column(&refs), 0, 10), Mode::Classification);
    }

    #[test]
    fn test_empty_values_are_ignored_for_detection() {
        let rows = column(&["", "1", " ", "2"]);
        assert_eq!(detect_mode(&rows, 0, 1), Mode::Regression);
    }

    #[test]
    fn test_label_encoding_first_seen_order() {
        let rows = column(&["ham", "spam", "ham", "eggs"]);
        let target = encode_target(&rows, 0, Mode::Classification);
        assert_eq!(target, Target::Classification(vec![0, 1, 0, 2]));
        assert_eq!(target.n_classes(), 3);
        assert_eq!(target.as_f64(), vec![0.0, 1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_regression_encoding_reads_bad_cells_as_zero() {
        let rows = column(&["1.5", "", "3"]);
        let target = encode_target(&rows, 0, Mode::Regression);
        assert_eq!(target, Target::Regression(vec![1.5, 0.0, 3.0]));
        assert_eq!(target.mode(), Mode::Regression);
    }
}
