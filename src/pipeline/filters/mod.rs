//! Filter bank: univariate relevance scorers and the FCBF subset filter
//!
//! Every scorer maps `(matrix, target)` to one raw score per matrix column, or
//! fails with [`SelectionError::FilterComputation`]. The orchestrator turns a
//! failure into an empty [`ScoreMap`] so the other filters still contribute.

pub mod anova;
pub mod fcbf;
pub mod mutual_info;
pub mod pearson;

use tracing::warn;

use super::error::{Result, SelectionError};

pub use anova::anova_scores;
pub use fcbf::fcbf_select;
pub use mutual_info::mutual_information_scores;
pub use pearson::{pearson_correlation, pearson_scores};

/// Maxima below this normalize to all zeros
pub const NORMALIZE_EPSILON: f64 = 1e-9;

/// Scores of one filter, indexed by matrix column. Empty when the filter failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMap {
    scores: Vec<f64>,
}

impl ScoreMap {
    pub fn new(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    /// Keep the scores of a successful filter; log and drop a failure.
    pub fn recover(filter: &str, result: Result<Vec<f64>>) -> Self {
        match result {
            Ok(scores) => Self::new(scores),
            Err(e) => {
                warn!("{} filter failed, continuing without it: {}", filter, e);
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Score of a feature, `None` when the map is empty.
    pub fn get(&self, feature: usize) -> Option<f64> {
        self.scores.get(feature).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.scores
    }

    /// Rescale so the maximum becomes 1.0.
    pub fn normalized(&self) -> ScoreMap {
        ScoreMap::new(normalize(&self.scores))
    }
}

/// Divide every score by the maximum. A maximum below [`NORMALIZE_EPSILON`]
/// gives all zeros; an empty slice stays empty.
pub fn normalize(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max < NORMALIZE_EPSILON {
        return vec![0.0; scores.len()];
    }
    scores.iter().map(|s| s / max).collect()
}

/// Shared shape check: target length must match the matrix.
pub(crate) fn check_shape(filter: &'static str, n_samples: usize, target_len: usize) -> Result<()> {
    if n_samples != target_len {
        return Err(SelectionError::filter(
            filter,
            format!("target has {} values for {} samples", target_len, n_samples),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_max_becomes_one() {
        let normalized = normalize(&[2.0, 4.0, 1.0]);
        assert_relative_eq!(normalized[1], 1.0);
        assert_relative_eq!(normalized[0], 0.5);
        assert!(normalized.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_normalize_all_zero_and_tiny() {
        assert_eq!(normalize(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert_eq!(normalize(&[1e-12, 5e-10]), vec![0.0, 0.0]);
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_recover_failure_gives_empty_map() {
        let map = ScoreMap::recover(
            "Pearson",
            Err(SelectionError::filter("Pearson", "not enough samples")),
        );
        assert!(map.is_empty());
        assert_eq!(map.get(0), None);

        let map = ScoreMap::recover("Pearson", Ok(vec![0.5, 2.0]));
        assert_eq!(map.normalized().get(0), Some(0.25));
    }
}
