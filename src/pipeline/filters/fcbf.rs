//! Fast Correlation-Based Filter
//!
//! Ranks features by symmetric uncertainty with the target, then walks the
//! ranking and drops every lower-ranked feature that is at least as correlated
//! with a kept feature as it is with the target.

use rayon::prelude::*;

use super::check_shape;
use crate::pipeline::error::Result;
use crate::pipeline::information::{discretize, discretize_target, symmetric_uncertainty};
use crate::pipeline::matrix::FeatureMatrix;
use crate::pipeline::target::Target;

/// Surviving matrix columns, best-ranked first.
///
/// # Arguments
/// * `bins` - Equal-width bins used to discretize features (and a regression target)
/// * `threshold` - Features with `SU(x, y) <= threshold` are dropped before ranking
pub fn fcbf_select(matrix: &FeatureMatrix, target: &Target, bins: usize, threshold: f64) -> Result<Vec<usize>> {
    check_shape("FCBF", matrix.n_samples(), target.len())?;

    let y = discretize_target(target, bins);
    let binned: Vec<Vec<usize>> = (0..matrix.n_features())
        .into_par_iter()
        .map(|j| discretize(matrix.column(j), bins))
        .collect();
    let relevance: Vec<f64> = binned
        .par_iter()
        .map(|x| symmetric_uncertainty(x, &y))
        .collect();

    let mut ranked: Vec<usize> = (0..binned.len())
        .filter(|&j| relevance[j] > threshold)
        .collect();
    // Stable: equal SU keeps matrix order
    ranked.sort_by(|&a, &b| relevance[b].total_cmp(&relevance[a]));

    let mut active = vec![true; ranked.len()];
    for top in 0..ranked.len() {
        if !active[top] {
            continue;
        }
        let kept = &binned[ranked[top]];
        for cand in top + 1..ranked.len() {
            if active[cand] {
                let j = ranked[cand];
                if symmetric_uncertainty(kept, &binned[j]) >= relevance[j] {
                    active[cand] = false;
                }
            }
        }
    }

    Ok(ranked
        .into_iter()
        .zip(active)
        .filter_map(|(j, keep)| keep.then_some(j))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_column_is_pruned() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let m = FeatureMatrix::from_columns(&["a", "b"], vec![x.clone(), x]).unwrap();
        let y = Target::Classification(vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(fcbf_select(&m, &y, 10, 1e-4).unwrap(), vec![0]);
    }

    #[test]
    fn test_irrelevant_feature_is_dropped() {
        let m = FeatureMatrix::from_columns(
            &["noise", "signal"],
            vec![vec![0.0, 1.0, 0.0, 1.0], vec![0.0, 0.0, 1.0, 1.0]],
        )
        .unwrap();
        let y = Target::Classification(vec![0, 0, 1, 1]);
        assert_eq!(fcbf_select(&m, &y, 10, 1e-4).unwrap(), vec![1]);
    }

    #[test]
    fn test_no_features() {
        let m = FeatureMatrix::default();
        let y = Target::Classification(vec![]);
        assert!(fcbf_select(&m, &y, 10, 1e-4).unwrap().is_empty());
    }
}
