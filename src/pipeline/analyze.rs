//! Analysis entry point
//!
//! One call runs the whole selection pipeline over header-labelled string rows:
//! column roles, target encoding, matrix assembly, filters and wrapper,
//! normalization, aggregation and text roll-up.

use tracing::{info, warn};

use super::aggregate::{aggregate_text_columns, FilterScores, ScoreAggregator, SelectionResult};
use super::columns::classify_columns;
use super::config::SelectionConfig;
use super::error::{Result, SelectionError};
use super::filters::{anova_scores, fcbf_select, mutual_information_scores, pearson_scores, ScoreMap};
use super::forest::forest_importance;
use super::matrix::{assemble_matrix, FeatureMatrix, FeatureOrigin};
use super::target::{prepare_target, Target};
use super::text::{StopWords, TextVectorizer};
use super::wrappers::run_wrapper;

/// Feature selection engine holding the configuration and text vectorizer
#[derive(Debug, Clone)]
pub struct FeatureSelector {
    config: SelectionConfig,
    vectorizer: TextVectorizer,
}

impl FeatureSelector {
    /// Build a selector with the built-in stop words.
    pub fn new(config: SelectionConfig) -> Result<Self> {
        Self::with_stop_words(config, StopWords::default())
    }

    pub fn with_stop_words(config: SelectionConfig, stop_words: StopWords) -> Result<Self> {
        config.validate()?;
        let vectorizer = TextVectorizer::new(stop_words, config.vocabulary_limit);
        Ok(Self { config, vectorizer })
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Analyze `rows` (header row first) against the `target` column.
    ///
    /// # Arguments
    /// * `rows` - Header row followed by data rows
    /// * `target` - Target column name, matched case-insensitively
    /// * `skip_text_vectorization` - Reject text columns instead of vectorizing them
    ///
    /// # Errors
    /// `InvalidInput` for a missing target, no data rows, or text columns while
    /// vectorization is disabled. `Analysis` for rows wider than the header.
    pub fn analyze(
        &self,
        rows: &[Vec<String>],
        target: &str,
        skip_text_vectorization: bool,
    ) -> Result<SelectionResult> {
        let (header, data) = rows
            .split_first()
            .ok_or_else(|| SelectionError::InvalidInput("Dataset is empty".to_string()))?;
        if data.is_empty() {
            return Err(SelectionError::InvalidInput(
                "Dataset has no data rows".to_string(),
            ));
        }
        let headers: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

        if let Some((i, row)) = data.iter().enumerate().find(|(_, r)| r.len() > headers.len()) {
            return Err(SelectionError::Analysis(format!(
                "Row {} has {} values but the header has {} columns",
                i + 1,
                row.len(),
                headers.len()
            )));
        }

        let layout = classify_columns(&headers, data, target, self.config.numeric_sample_size)?;
        if skip_text_vectorization && !layout.text.is_empty() {
            return Err(SelectionError::InvalidInput(format!(
                "Text vectorization is disabled but text columns were found: {}",
                layout.text_names(&headers).join(", ")
            )));
        }

        let target = prepare_target(data, layout.target, self.config.max_classes);
        let matrix = assemble_matrix(&headers, data, &layout, &self.vectorizer)?;
        info!(
            "Assembled matrix: {} samples x {} features",
            matrix.n_samples(),
            matrix.n_features()
        );

        let (raw, (fcbf, wrapper)) = rayon::join(
            || self.score_filters(&matrix, &target),
            || {
                rayon::join(
                    || self.select_fcbf(&matrix, &target),
                    || self.select_wrapper(&matrix, &target),
                )
            },
        );

        let scores = raw.normalized();
        let aggregator = ScoreAggregator::new(
            &self.config.weights,
            self.config.final_score_threshold,
            self.config.wrapper.strategy.tag(),
        );
        let feature_scores = aggregator.aggregate(&matrix, &scores, &fcbf, &wrapper);

        let mut combined: Vec<_> = matrix
            .descriptors()
            .iter()
            .zip(&feature_scores)
            .filter(|(d, _)| matches!(d.origin, FeatureOrigin::Numeric { .. }))
            .map(|(_, s)| s.clone())
            .collect();
        combined.extend(aggregate_text_columns(&headers, &layout.text, &matrix, &feature_scores));

        let result = SelectionResult::from_scores(combined, target.mode());
        info!(
            "Selected {} of {} features",
            result.selected_features.len(),
            result.feature_scores.len()
        );
        Ok(result)
    }

    /// Raw MI, Pearson, ANOVA and importance maps; failures become empty maps.
    fn score_filters(&self, matrix: &FeatureMatrix, target: &Target) -> FilterScores {
        let bins = self.config.bins;
        let ((mutual_information, pearson), (anova, importance)) = rayon::join(
            || {
                rayon::join(
                    || ScoreMap::recover("MutualInformation", mutual_information_scores(matrix, target, bins)),
                    || ScoreMap::recover("Pearson", pearson_scores(matrix, target)),
                )
            },
            || {
                rayon::join(
                    || ScoreMap::recover("ANOVA", anova_scores(matrix, target)),
                    || {
                        if matrix.n_features() == 0 {
                            ScoreMap::default()
                        } else {
                            ScoreMap::recover(
                                "RandomForest",
                                forest_importance(matrix, target, &self.config),
                            )
                        }
                    },
                )
            },
        );

        FilterScores {
            mutual_information,
            pearson,
            anova,
            importance,
        }
    }

    fn select_fcbf(&self, matrix: &FeatureMatrix, target: &Target) -> Vec<usize> {
        fcbf_select(matrix, target, self.config.bins, self.config.fcbf_threshold).unwrap_or_else(|e| {
            warn!("FCBF failed, continuing without it: {}", e);
            Vec::new()
        })
    }

    fn select_wrapper(&self, matrix: &FeatureMatrix, target: &Target) -> Vec<usize> {
        run_wrapper(matrix, target, &self.config).unwrap_or_else(|e| {
            warn!(
                "{} wrapper failed, continuing without it: {}",
                self.config.wrapper.strategy.tag(),
                e
            );
            Vec::new()
        })
    }
}

/// Analyze with the default configuration.
pub fn analyze(rows: &[Vec<String>], target: &str, skip_text_vectorization: bool) -> Result<SelectionResult> {
    FeatureSelector::new(SelectionConfig::default())?.analyze(rows, target, skip_text_vectorization)
}
