//! Selection configuration
//!
//! Every tunable constant of the pipeline lives here. The defaults reproduce the
//! reference behaviour; a JSON file may override any subset of the keys.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{Result, SelectionError};

/// Wrapper search strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapperStrategy {
    /// Sequential forward selection (default)
    #[default]
    Sfs,
    /// Sequential backward selection
    Sbs,
    /// Recursive feature elimination by forest importance
    Rfe,
}

impl WrapperStrategy {
    /// Short tag used in explanations ("Selected by SFS").
    pub fn tag(&self) -> &'static str {
        match self {
            WrapperStrategy::Sfs => "SFS",
            WrapperStrategy::Sbs => "SBS",
            WrapperStrategy::Rfe => "RFE",
        }
    }
}

impl std::fmt::Display for WrapperStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag().to_lowercase())
    }
}

impl std::str::FromStr for WrapperStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sfs" => Ok(WrapperStrategy::Sfs),
            "sbs" => Ok(WrapperStrategy::Sbs),
            "rfe" => Ok(WrapperStrategy::Rfe),
            _ => Err(format!(
                "Unknown wrapper strategy: '{}'. Use 'sfs', 'sbs' or 'rfe'.",
                s
            )),
        }
    }
}

/// Weights of the four normalized filter scores in the final score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub mutual_information: f64,
    pub pearson: f64,
    pub anova: f64,
    pub importance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            mutual_information: 0.30,
            pearson: 0.20,
            anova: 0.20,
            importance: 0.30,
        }
    }
}

impl ScoreWeights {
    fn all(&self) -> [f64; 4] {
        [self.mutual_information, self.pearson, self.anova, self.importance]
    }
}

/// Forest hyper-parameters for the embedded importance scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportanceConfig {
    /// Number of bagged trees
    pub trees: usize,
    /// Minimum samples per leaf
    pub min_leaf: usize,
}

impl Default for ImportanceConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            min_leaf: 1,
        }
    }
}

/// Wrapper search settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapperConfig {
    pub strategy: WrapperStrategy,
    /// Upper bound on forward picks
    pub max_features: usize,
    /// Number of features backward strategies stop at
    pub min_features: usize,
    /// Cross-validation folds
    pub folds: usize,
    /// Trees per cross-validation forest
    pub cv_trees: usize,
    /// Trees per RFE importance forest
    pub rfe_trees: usize,
    /// Minimum metric improvement for a forward step after the first
    pub min_gain: f64,
    /// Wrapper search is skipped below this sample count
    pub min_samples: usize,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            strategy: WrapperStrategy::Sfs,
            max_features: 10,
            min_features: 5,
            folds: 5,
            cv_trees: 20,
            rfe_trees: 50,
            min_gain: 1e-4,
            min_samples: 10,
        }
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Equal-width bins used by the information-theoretic filters
    pub bins: usize,
    /// Maximum vocabulary terms kept per text column
    pub vocabulary_limit: usize,
    /// Non-empty values sampled to decide whether a column is numeric
    pub numeric_sample_size: usize,
    /// Numeric targets with at most this many distinct values are classes
    pub max_classes: usize,
    pub weights: ScoreWeights,
    /// Features scoring at least this are selected
    pub final_score_threshold: f64,
    /// FCBF drops features whose SU with the target is at or below this
    pub fcbf_threshold: f64,
    pub importance: ImportanceConfig,
    pub wrapper: WrapperConfig,
    /// Base seed for every forest
    pub seed: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            bins: 10,
            vocabulary_limit: 30,
            numeric_sample_size: 20,
            max_classes: 10,
            weights: ScoreWeights::default(),
            final_score_threshold: 0.10,
            fcbf_threshold: 1e-4,
            importance: ImportanceConfig::default(),
            wrapper: WrapperConfig::default(),
            seed: 42,
        }
    }
}

impl SelectionConfig {
    /// Load a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SelectionError::InvalidInput(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: SelectionConfig = serde_json::from_str(&content).map_err(|e| {
            SelectionError::InvalidInput(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SelectionError::InvalidInput(msg));

        if self.bins == 0 {
            return invalid("bins must be at least 1".into());
        }
        if self.numeric_sample_size == 0 {
            return invalid("numeric_sample_size must be at least 1".into());
        }
        let weights = self.weights.all();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return invalid(format!("weights must be finite and non-negative, got {:?}", weights));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return invalid("at least one weight must be positive".into());
        }
        if !self.final_score_threshold.is_finite() {
            return invalid("final_score_threshold must be finite".into());
        }
        if self.importance.trees == 0 || self.importance.min_leaf == 0 {
            return invalid("importance forest needs at least 1 tree and min_leaf >= 1".into());
        }
        if self.wrapper.folds < 2 {
            return invalid(format!(
                "wrapper folds must be at least 2, got {}",
                self.wrapper.folds
            ));
        }
        if self.wrapper.cv_trees == 0 || self.wrapper.rfe_trees == 0 {
            return invalid("wrapper forests need at least 1 tree".into());
        }
        Ok(())
    }
}
