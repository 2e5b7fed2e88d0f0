//! Score aggregation and text column roll-up
//!
//! Combines the normalized filter maps into one weighted score per matrix
//! column, records why each feature was kept or rejected, and then folds the
//! token features of every text column back into a single column-level result.

use serde::{Deserialize, Serialize};

use super::config::ScoreWeights;
use super::filters::ScoreMap;
use super::matrix::{FeatureMatrix, FeatureOrigin};
use super::target::Mode;

/// Key terms listed in a text column explanation
const MAX_KEY_TERMS: usize = 3;

/// Final decision for one feature (numeric column, token or text column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureScore {
    pub feature_name: String,
    pub mi_score: Option<f64>,
    pub pearson_score: Option<f64>,
    pub anova_score: Option<f64>,
    pub rf_importance: Option<f64>,
    pub final_score: f64,
    pub selected: bool,
    pub explanation: String,
}

/// Outcome of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub selected_features: Vec<String>,
    pub rejected_features: Vec<String>,
    /// Sorted by final score, highest first
    pub feature_scores: Vec<FeatureScore>,
    pub mode: Mode,
}

impl SelectionResult {
    /// Sort by final score (stable) and split names by the selection flag.
    pub fn from_scores(mut feature_scores: Vec<FeatureScore>, mode: Mode) -> Self {
        feature_scores.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

        let (selected, rejected): (Vec<&FeatureScore>, Vec<&FeatureScore>) =
            feature_scores.iter().partition(|s| s.selected);

        Self {
            selected_features: selected.iter().map(|s| s.feature_name.clone()).collect(),
            rejected_features: rejected.iter().map(|s| s.feature_name.clone()).collect(),
            feature_scores,
            mode,
        }
    }

    pub fn score(&self, name: &str) -> Option<&FeatureScore> {
        self.feature_scores.iter().find(|s| s.feature_name == name)
    }
}

/// Normalized outputs of the four scoring filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterScores {
    pub mutual_information: ScoreMap,
    pub pearson: ScoreMap,
    pub anova: ScoreMap,
    pub importance: ScoreMap,
}

impl FilterScores {
    pub fn normalized(&self) -> Self {
        Self {
            mutual_information: self.mutual_information.normalized(),
            pearson: self.pearson.normalized(),
            anova: self.anova.normalized(),
            importance: self.importance.normalized(),
        }
    }
}

/// Turns filter outputs into per-feature decisions
#[derive(Debug, Clone)]
pub struct ScoreAggregator<'a> {
    weights: &'a ScoreWeights,
    threshold: f64,
    /// Wrapper name used in explanations ("SFS", "SBS", "RFE")
    wrapper_tag: &'a str,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(weights: &'a ScoreWeights, threshold: f64, wrapper_tag: &'a str) -> Self {
        Self {
            weights,
            threshold,
            wrapper_tag,
        }
    }

    /// One score per matrix column, in matrix order.
    ///
    /// # Arguments
    /// * `scores` - Normalized filter maps
    /// * `fcbf` - Columns kept by FCBF
    /// * `wrapper` - Columns chosen by the wrapper search
    pub fn aggregate(
        &self,
        matrix: &FeatureMatrix,
        scores: &FilterScores,
        fcbf: &[usize],
        wrapper: &[usize],
    ) -> Vec<FeatureScore> {
        let mut in_fcbf = vec![false; matrix.n_features()];
        for &j in fcbf {
            in_fcbf[j] = true;
        }
        let mut in_wrapper = vec![false; matrix.n_features()];
        for &j in wrapper {
            in_wrapper[j] = true;
        }

        (0..matrix.n_features())
            .map(|j| {
                let mi = scores.mutual_information.get(j);
                let pearson = scores.pearson.get(j);
                let anova = scores.anova.get(j);
                let importance = scores.importance.get(j);
                let components = [
                    mi.unwrap_or(0.0),
                    pearson.unwrap_or(0.0),
                    anova.unwrap_or(0.0),
                    importance.unwrap_or(0.0),
                ];

                let final_score = self.weights.mutual_information * components[0]
                    + self.weights.pearson * components[1]
                    + self.weights.anova * components[2]
                    + self.weights.importance * components[3];
                let selected = in_fcbf[j] || in_wrapper[j] || final_score >= self.threshold;

                let mut reasons: Vec<String> = Vec::new();
                if components.iter().all(|&c| c == 0.0) {
                    reasons.push("Rejected: all metrics zero".to_string());
                }
                if in_fcbf[j] {
                    reasons.push("Selected by FCBF".to_string());
                }
                if in_wrapper[j] {
                    reasons.push(format!("Selected by {}", self.wrapper_tag));
                }
                if reasons.is_empty() {
                    reasons.push(if selected {
                        "Selected by Final Score".to_string()
                    } else {
                        "Rejected: Low score and not selected by wrappers".to_string()
                    });
                }

                FeatureScore {
                    feature_name: matrix.name(j).to_string(),
                    mi_score: mi,
                    pearson_score: pearson,
                    anova_score: anova,
                    rf_importance: importance,
                    final_score,
                    selected,
                    explanation: reasons.join(", "),
                }
            })
            .collect()
    }
}

fn max_component(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.flatten().fold(None, |best, v| match best {
        Some(b) if b >= v => Some(b),
        _ => Some(v),
    })
}

/// Roll token scores up to one result per text column.
///
/// `token_scores` must be the aggregator output for `matrix` (one entry per
/// matrix column). `text_columns` are header indices, emitted in that order.
pub fn aggregate_text_columns(
    headers: &[String],
    text_columns: &[usize],
    matrix: &FeatureMatrix,
    token_scores: &[FeatureScore],
) -> Vec<FeatureScore> {
    text_columns
        .iter()
        .map(|&column| {
            let tokens: Vec<(&str, &FeatureScore)> = matrix
                .descriptors()
                .iter()
                .zip(token_scores)
                .filter_map(|(descriptor, score)| match &descriptor.origin {
                    FeatureOrigin::TextTerm { column: c, term } if *c == column => {
                        Some((term.as_str(), score))
                    }
                    _ => None,
                })
                .collect();
            let name = headers[column].clone();

            if tokens.is_empty() {
                return FeatureScore {
                    feature_name: name,
                    mi_score: None,
                    pearson_score: None,
                    anova_score: None,
                    rf_importance: None,
                    final_score: 0.0,
                    selected: false,
                    explanation: "Rejected: No usable text tokens found".to_string(),
                };
            }

            let mut key_terms: Vec<(&str, f64)> = tokens
                .iter()
                .filter(|(_, s)| s.selected)
                .map(|(term, s)| (*term, s.final_score))
                .collect();
            key_terms.sort_by(|a, b| b.1.total_cmp(&a.1));

            let explanation = if key_terms.is_empty() {
                "Rejected: No significant terms found".to_string()
            } else {
                let terms: Vec<&str> = key_terms.iter().take(MAX_KEY_TERMS).map(|(t, _)| *t).collect();
                format!("Selected due to key terms: {}", terms.join(", "))
            };

            FeatureScore {
                feature_name: name,
                mi_score: max_component(tokens.iter().map(|(_, s)| s.mi_score)),
                pearson_score: max_component(tokens.iter().map(|(_, s)| s.pearson_score)),
                anova_score: max_component(tokens.iter().map(|(_, s)| s.anova_score)),
                rf_importance: max_component(tokens.iter().map(|(_, s)| s.rf_importance)),
                final_score: tokens
                    .iter()
                    .map(|(_, s)| s.final_score)
                    .fold(f64::NEG_INFINITY, f64::max),
                selected: !key_terms.is_empty(),
                explanation,
            }
        })
        .collect()
}
