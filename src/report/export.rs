//! Selection result export

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{Mode, SelectionConfig, SelectionResult};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct AnalysisMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// featsift version
    pub featsift_version: String,
    /// Input file path
    pub input_file: String,
    /// Target column name
    pub target_column: String,
    pub mode: Mode,
    /// Wrapper strategy used
    pub wrapper_strategy: String,
    pub final_score_threshold: f64,
    pub seed: u64,
    pub text_vectorization: bool,
}

/// Complete selection export with metadata
#[derive(Serialize)]
pub struct SelectionExport<'a> {
    /// Metadata about the analysis run
    pub metadata: AnalysisMetadata,
    /// The selection result (flattened into the JSON)
    #[serde(flatten)]
    pub result: &'a SelectionResult,
}

/// Parameters for the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub target_column: &'a str,
    pub config: &'a SelectionConfig,
    pub skip_text_vectorization: bool,
}

/// Build the export document for a result.
pub fn build_export<'a>(result: &'a SelectionResult, params: &ExportParams) -> SelectionExport<'a> {
    SelectionExport {
        metadata: AnalysisMetadata {
            timestamp: Utc::now().to_rfc3339(),
            featsift_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            target_column: params.target_column.to_string(),
            mode: result.mode,
            wrapper_strategy: params.config.wrapper.strategy.to_string(),
            final_score_threshold: params.config.final_score_threshold,
            seed: params.config.seed,
            text_vectorization: !params.skip_text_vectorization,
        },
        result,
    }
}

/// Export the selection result to a JSON file with run metadata
///
/// # Arguments
/// * `result` - Selection result of the analysis
/// * `output_path` - Path to write the JSON file
/// * `params` - Export parameters for metadata
pub fn export_selection(result: &SelectionResult, output_path: &Path, params: &ExportParams) -> Result<()> {
    let export = build_export(result, params);
    let json = serde_json::to_string_pretty(&export).context("Failed to serialize selection result")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write selection result: {}", output_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FeatureScore;

    #[test]
    fn test_export_contains_metadata_and_result() {
        let result = SelectionResult::from_scores(
            vec![FeatureScore {
                feature_name: "x".to_string(),
                mi_score: Some(1.0),
                pearson_score: Some(1.0),
                anova_score: None,
                rf_importance: Some(1.0),
                final_score: 0.8,
                selected: true,
                explanation: "Selected by FCBF".to_string(),
            }],
            Mode::Regression,
        );
        let config = SelectionConfig::default();
        let params = ExportParams {
            input_file: "data.csv",
            target_column: "y",
            config: &config,
            skip_text_vectorization: false,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        export_selection(&result, &path, &params).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["mode"], "REGRESSION");
        assert_eq!(json["metadata"]["target_column"], "y");
        assert_eq!(json["metadata"]["wrapper_strategy"], "sfs");
        assert_eq!(json["selectedFeatures"][0], "x");
        assert_eq!(json["featureScores"][0]["anovaScore"], serde_json::Value::Null);
    }
}
