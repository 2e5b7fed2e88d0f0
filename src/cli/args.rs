//! Command-line argument definitions using clap

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{SelectionConfig, WrapperStrategy};

/// featsift - Select the features of a tabular dataset that matter for a target
#[derive(Parser, Debug)]
#[command(name = "featsift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target column name (matched case-insensitively)
    #[arg(short, long)]
    pub target: String,

    /// Fail instead of vectorizing when text columns are present.
    /// Use this when text has already been turned into numeric features upstream.
    #[arg(long, default_value = "false")]
    pub skip_text_vectorization: bool,

    /// Output JSON path.
    /// Defaults to input directory with '_selection.json' suffix (e.g., data.csv → data_selection.json).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file with selection settings. Missing keys keep their defaults;
    /// flags given on the command line override the file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Wrapper search strategy.
    /// Options: "sfs" (forward selection, default), "sbs" (backward selection), "rfe" (recursive elimination)
    #[arg(long)]
    pub wrapper: Option<WrapperStrategy>,

    /// Minimum weighted score for a feature to be selected on score alone (0.0 to 1.0)
    #[arg(long, value_parser = validate_unit_interval)]
    pub final_score_threshold: Option<f64>,

    /// Maximum number of terms kept per text column
    #[arg(long)]
    pub vocabulary_size: Option<usize>,

    /// Random seed for the forests
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log pipeline progress to stderr
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Get the output path, deriving from input if not explicitly provided.
    /// The derived path will be in the same directory as the input with a '_selection.json' suffix.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let parent = self.input.parent().unwrap_or_else(|| std::path::Path::new("."));
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            parent.join(format!("{}_selection.json", stem))
        })
    }

    /// Build the selection settings: config file (if any), then flag overrides.
    pub fn selection_config(&self) -> Result<SelectionConfig> {
        let mut config = match &self.config {
            Some(path) => SelectionConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => SelectionConfig::default(),
        };

        if let Some(strategy) = self.wrapper {
            config.wrapper.strategy = strategy;
        }
        if let Some(threshold) = self.final_score_threshold {
            config.final_score_threshold = threshold;
        }
        if let Some(size) = self.vocabulary_size {
            config.vocabulary_limit = size;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate().context("Invalid selection settings")?;
        Ok(config)
    }
}

/// Validator for thresholds expressed as a fraction
fn validate_unit_interval(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!("value must be between 0.0 and 1.0, got {}", value))
    } else {
        Ok(value)
    }
}
