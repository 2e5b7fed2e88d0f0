//! One-way ANOVA F statistic across the class groups

use ndarray::ArrayView1;
use rayon::prelude::*;

use super::check_shape;
use crate::pipeline::error::Result;
use crate::pipeline::matrix::FeatureMatrix;
use crate::pipeline::target::Target;

/// Within-group mean squares at or below this give F = 0
const MIN_WITHIN_VARIANCE: f64 = 1e-10;

/// F = MSB / MSW for one feature grouped by class label.
///
/// Returns 0 with fewer than two classes, too few samples for the within-group
/// degrees of freedom, a vanishing MSW or a `NaN` result.
pub fn f_statistic(values: ArrayView1<'_, f64>, labels: &[usize], n_classes: usize) -> f64 {
    let n = values.len();
    let mut sums = vec![0.0; n_classes];
    let mut counts = vec![0usize; n_classes];
    for (&v, &label) in values.iter().zip(labels) {
        sums[label] += v;
        counts[label] += 1;
    }

    let k = counts.iter().filter(|&&c| c > 0).count();
    if k < 2 || n <= k {
        return 0.0;
    }

    let grand_mean = values.iter().sum::<f64>() / n as f64;
    let means: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();

    let ssb: f64 = means
        .iter()
        .zip(&counts)
        .map(|(&m, &c)| c as f64 * (m - grand_mean).powi(2))
        .sum();
    let ssw: f64 = values
        .iter()
        .zip(labels)
        .map(|(&v, &label)| (v - means[label]).powi(2))
        .sum();

    let msb = ssb / (k - 1) as f64;
    let msw = ssw / (n - k) as f64;
    if msw <= MIN_WITHIN_VARIANCE {
        return 0.0;
    }
    let f = msb / msw;
    if f.is_nan() {
        0.0
    } else {
        f
    }
}

/// F statistic per feature. A regression target scores 0 for every feature.
pub fn anova_scores(matrix: &FeatureMatrix, target: &Target) -> Result<Vec<f64>> {
    check_shape("ANOVA", matrix.n_samples(), target.len())?;
    match target {
        Target::Regression(_) => Ok(vec![0.0; matrix.n_features()]),
        Target::Classification(labels) => {
            let n_classes = target.n_classes();
            Ok((0..matrix.n_features())
                .into_par_iter()
                .map(|j| f_statistic(matrix.column(j), labels, n_classes))
                .collect())
        }
    }
}
