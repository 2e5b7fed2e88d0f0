//! Recursive feature elimination on forest importance

use tracing::debug;

use crate::pipeline::config::ImportanceConfig;
use crate::pipeline::error::Result;
use crate::pipeline::forest::{ForestParams, RandomForest};
use crate::pipeline::matrix::FeatureMatrix;
use crate::pipeline::target::Target;

/// Refit a forest on the remaining features and drop the least important one
/// until `min_features` remain. Returns the survivors in ascending order.
pub fn recursive_elimination(
    matrix: &FeatureMatrix,
    target: &Target,
    min_features: usize,
    trees: usize,
    seed: u64,
) -> Result<Vec<usize>> {
    let floor = min_features.min(matrix.n_features());
    let samples: Vec<usize> = (0..matrix.n_samples()).collect();
    let forest_config = ImportanceConfig {
        trees,
        ..ImportanceConfig::default()
    };
    let mut remaining: Vec<usize> = (0..matrix.n_features()).collect();

    while remaining.len() > floor {
        let params = ForestParams::importance(remaining.len(), samples.len(), &forest_config, seed);
        let forest = RandomForest::fit(matrix, &remaining, &samples, target, &params)?;
        let importance = forest.importance();

        let mut weakest = 0;
        for (i, &value) in importance.iter().enumerate() {
            if value < importance[weakest] {
                weakest = i;
            }
        }
        debug!(
            "RFE removed feature {} (importance {:.4})",
            remaining[weakest], importance[weakest]
        );
        remaining.remove(weakest);
    }

    Ok(remaining)
}
