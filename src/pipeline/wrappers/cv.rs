//! K-fold cross-validated evaluation of a feature subset

use std::ops::Range;

use crate::pipeline::error::{Result, SelectionError};
use crate::pipeline::forest::{ForestParams, RandomForest};
use crate::pipeline::matrix::FeatureMatrix;
use crate::pipeline::target::Target;

/// SST below this makes R² undefined; it is reported as 0
const MIN_TOTAL_VARIANCE: f64 = 1e-9;

/// Split `0..n` into `k` contiguous folds; the last fold takes the remainder.
pub fn fold_ranges(n: usize, k: usize) -> Vec<Range<usize>> {
    if k == 0 {
        return Vec::new();
    }
    let size = n / k;
    (0..k)
        .map(|i| {
            let start = i * size;
            let end = if i + 1 == k { n } else { start + size };
            start..end
        })
        .collect()
}

/// Exact-match rate of predicted class codes.
pub fn accuracy(predicted: &[f64], actual: &[usize]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let hits = predicted
        .iter()
        .zip(actual)
        .filter(|(&p, &a)| p as usize == a)
        .count();
    hits as f64 / actual.len() as f64
}

/// Coefficient of determination `1 - SSE/SST`, 0 for a (near) constant truth.
pub fn r_squared(predicted: &[f64], actual: &[f64]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let sst: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if sst < MIN_TOTAL_VARIANCE {
        return 0.0;
    }
    let sse: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (a - p).powi(2))
        .sum();
    1.0 - sse / sst
}

/// Scores feature subsets with a small forest over fixed contiguous folds
pub struct CrossValidator<'a> {
    matrix: &'a FeatureMatrix,
    target: &'a Target,
    folds: Vec<Range<usize>>,
    trees: usize,
    seed: u64,
}

impl<'a> CrossValidator<'a> {
    pub fn new(matrix: &'a FeatureMatrix, target: &'a Target, folds: usize, trees: usize, seed: u64) -> Self {
        Self {
            matrix,
            target,
            folds: fold_ranges(matrix.n_samples(), folds),
            trees,
            seed,
        }
    }

    pub fn matrix(&self) -> &FeatureMatrix {
        self.matrix
    }

    pub fn target(&self) -> &Target {
        self.target
    }

    /// Mean held-out accuracy (classification) or R² (regression).
    pub fn evaluate(&self, features: &[usize]) -> Result<f64> {
        if self.folds.is_empty() {
            return Err(SelectionError::filter("CrossValidation", "no folds"));
        }

        let mut total = 0.0;
        for fold in &self.folds {
            if fold.is_empty() {
                return Err(SelectionError::filter(
                    "CrossValidation",
                    format!("{} samples are too few for {} folds", self.matrix.n_samples(), self.folds.len()),
                ));
            }
            let train: Vec<usize> = (0..self.matrix.n_samples())
                .filter(|i| !fold.contains(i))
                .collect();
            let test: Vec<usize> = fold.clone().collect();

            let params = ForestParams::cross_validation(
                self.target.mode(),
                features.len(),
                train.len(),
                self.trees,
                self.seed,
            );
            let forest = RandomForest::fit(self.matrix, features, &train, self.target, &params)?;
            let predicted = forest.predict_all(self.matrix, &test);

            total += match self.target {
                Target::Classification(labels) => {
                    let actual: Vec<usize> = test.iter().map(|&i| labels[i]).collect();
                    accuracy(&predicted, &actual)
                }
                Target::Regression(values) => {
                    let actual: Vec<f64> = test.iter().map(|&i| values[i]).collect();
                    r_squared(&predicted, &actual)
                }
            };
        }

        Ok(total / self.folds.len() as f64)
    }
}
