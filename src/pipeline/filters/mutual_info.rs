//! Mutual information between each discretized feature and the target

use rayon::prelude::*;

use super::check_shape;
use crate::pipeline::error::Result;
use crate::pipeline::information::{discretize, discretize_target, mutual_information};
use crate::pipeline::matrix::FeatureMatrix;
use crate::pipeline::target::Target;

/// Raw MI (nats) per feature after equal-width binning of features and, for
/// regression, the target.
pub fn mutual_information_scores(matrix: &FeatureMatrix, target: &Target, bins: usize) -> Result<Vec<f64>> {
    check_shape("MutualInformation", matrix.n_samples(), target.len())?;
    let y = discretize_target(target, bins);

    Ok((0..matrix.n_features())
        .into_par_iter()
        .map(|j| mutual_information(&discretize(matrix.column(j), bins), &y))
        .collect())
}
