//! Column role detection
//!
//! Splits the non-target columns of a dataset into ignored (ID-like), numeric
//! and text columns.

use tracing::info;

use super::error::{Result, SelectionError};
use super::values::{cell, is_numeric};

/// Role assigned to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Ignored,
    Numeric,
    Text,
}

/// Column indices grouped by role, each list in header order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    pub target: usize,
    pub numeric: Vec<usize>,
    pub text: Vec<usize>,
    pub ignored: Vec<usize>,
}

impl ColumnLayout {
    /// Names of the text columns, in header order.
    pub fn text_names<'a>(&self, headers: &'a [String]) -> Vec<&'a str> {
        self.text.iter().map(|&i| headers[i].as_str()).collect()
    }
}

/// Find the target column index (case-insensitive).
pub fn find_target_index(headers: &[String], target: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.to_lowercase() == target.trim().to_lowercase())
        .ok_or_else(|| {
            SelectionError::InvalidInput(format!(
                "Target feature '{}' not found in dataset. Available columns: {:?}",
                target, headers
            ))
        })
}

/// Whether a header looks like a row identifier.
pub fn is_id_like(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower == "id" || lower.starts_with("id_") || lower.ends_with("_id") || lower.contains("matricule")
}

/// Decide whether a column is numeric by sampling its first non-empty values.
///
/// Returns false on the first non-numeric value; a column without any
/// non-empty value counts as numeric.
pub fn is_numeric_column(rows: &[Vec<String>], index: usize, sample_size: usize) -> bool {
    rows.iter()
        .map(|row| cell(row, index))
        .filter(|v| !v.is_empty())
        .take(sample_size)
        .all(is_numeric)
}

/// Classify every non-target column.
pub fn classify_columns(
    headers: &[String],
    rows: &[Vec<String>],
    target: &str,
    sample_size: usize,
) -> Result<ColumnLayout> {
    let target_index = find_target_index(headers, target)?;
    let mut layout = ColumnLayout {
        target: target_index,
        ..Default::default()
    };

    for (i, name) in headers.iter().enumerate() {
        if i == target_index {
            continue;
        }
        match column_role(name, rows, i, sample_size) {
            ColumnRole::Ignored => {
                info!("Ignoring probable ID feature: {}", name);
                layout.ignored.push(i);
            }
            ColumnRole::Numeric => layout.numeric.push(i),
            ColumnRole::Text => layout.text.push(i),
        }
    }

    Ok(layout)
}

fn column_role(name: &str, rows: &[Vec<String>], index: usize, sample_size: usize) -> ColumnRole {
    if is_id_like(name) {
        ColumnRole::Ignored
    } else if is_numeric_column(rows, index, sample_size) {
        ColumnRole::Numeric
    } else {
        ColumnRole::Text
    }
}
