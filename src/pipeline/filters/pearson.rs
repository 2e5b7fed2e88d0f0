//! Absolute Pearson correlation between each feature and the target

use ndarray::{aview1, ArrayView1};
use rayon::prelude::*;

use super::check_shape;
use crate::pipeline::error::{Result, SelectionError};
use crate::pipeline::matrix::FeatureMatrix;
use crate::pipeline::target::Target;

/// Fewer samples than this cannot give a meaningful correlation
const MIN_SAMPLES: usize = 3;

/// Pearson correlation using a single-pass Welford update.
///
/// Returns `NaN` when either variable has zero variance.
pub fn pearson_correlation(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&a, &b) in x.iter().zip(y.iter()) {
        n += 1.0;
        let dx = a - mean_x;
        let dy = b - mean_y;
        mean_x += dx / n;
        mean_y += dy / n;
        var_x += dx * (a - mean_x);
        var_y += dy * (b - mean_y);
        cov_xy += dx * (b - mean_y);
    }

    if n == 0.0 || var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov_xy / (var_x.sqrt() * var_y.sqrt())
}

/// `|r|` per feature against the target as `f64` (label codes for
/// classification). `NaN` correlations score 0.
pub fn pearson_scores(matrix: &FeatureMatrix, target: &Target) -> Result<Vec<f64>> {
    check_shape("Pearson", matrix.n_samples(), target.len())?;
    if matrix.n_samples() < MIN_SAMPLES {
        return Err(SelectionError::filter(
            "Pearson",
            format!(
                "correlation needs at least {} samples, got {}",
                MIN_SAMPLES,
                matrix.n_samples()
            ),
        ));
    }

    let y = target.as_f64();
    Ok((0..matrix.n_features())
        .into_par_iter()
        .map(|j| {
            let r = pearson_correlation(matrix.column(j), aview1(&y)).abs();
            if r.is_nan() {
                0.0
            } else {
                r
            }
        })
        .collect())
}
