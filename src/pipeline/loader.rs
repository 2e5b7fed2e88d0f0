//! Dataset loader for CSV and Parquet files
//!
//! The analysis works on raw strings, so every column is read (or cast) as a
//! string and the frame is flattened into a header row followed by data rows.
//! Nulls become empty cells.

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;
use std::path::Path;

/// Load a dataset from a file (CSV or Parquet based on extension)
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?
            .select([col("*").cast(DataType::String)]),
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Flatten a string frame into rows, header first.
pub fn frame_to_rows(df: &DataFrame) -> Result<Vec<Vec<String>>> {
    let header: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut rows = vec![Vec::with_capacity(header.len()); df.height()];
    for column in df.get_columns() {
        let values = column
            .as_materialized_series()
            .str()
            .with_context(|| format!("Column '{}' is not a string column", column.name()))?;
        for (row, value) in rows.iter_mut().zip(values.into_iter()) {
            row.push(value.unwrap_or("").to_string());
        }
    }

    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(header);
    out.extend(rows);
    Ok(out)
}

/// Load a file straight into header-first string rows.
pub fn load_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let df = load_dataset(path)?;
    frame_to_rows(&df)
}

/// Display initial statistics about the dataset
pub fn display_dataset_stats(rows: &[Vec<String>]) {
    let columns = rows.first().map_or(0, |h| h.len());
    let samples = rows.len().saturating_sub(1);

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", samples);
    println!("      Columns: {}", columns);
}
