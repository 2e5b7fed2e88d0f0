//! Equal-width discretization and plug-in entropy estimates
//!
//! Shared by the mutual information and FCBF filters. All entropies use the
//! natural logarithm.

use std::collections::HashMap;

use ndarray::{aview1, ArrayView1};

use super::target::Target;

/// Assign each value to one of `bins` equal-width bins over `[min, max]`.
///
/// A constant column (zero width) puts every sample in bin 0. The maximum value
/// is clamped into the last bin.
pub fn discretize(values: ArrayView1<'_, f64>, bins: usize) -> Vec<usize> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    if width == 0.0 {
        return vec![0; values.len()];
    }

    values
        .iter()
        .map(|&v| (((v - min) / width) as usize).min(bins - 1))
        .collect()
}

/// Discrete view of the target: labels as-is, continuous values binned.
pub fn discretize_target(target: &Target, bins: usize) -> Vec<usize> {
    match target {
        Target::Classification(labels) => labels.clone(),
        Target::Regression(values) => discretize(aview1(values), bins),
    }
}

fn entropy_of_counts<I: Iterator<Item = usize>>(counts: I, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    counts
        .map(|count| {
            let p = count as f64 / n as f64;
            -p * p.ln()
        })
        .sum()
}

/// Empirical entropy `H(X)`.
pub fn entropy(x: &[usize]) -> f64 {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for &v in x {
        *counts.entry(v).or_insert(0) += 1;
    }
    entropy_of_counts(counts.into_values(), x.len())
}

/// Empirical joint entropy `H(X, Y)`.
pub fn joint_entropy(x: &[usize], y: &[usize]) -> f64 {
    let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
    for (&a, &b) in x.iter().zip(y) {
        *counts.entry((a, b)).or_insert(0) += 1;
    }
    entropy_of_counts(counts.into_values(), x.len().min(y.len()))
}

/// Mutual information `H(X) + H(Y) - H(X, Y)`.
pub fn mutual_information(x: &[usize], y: &[usize]) -> f64 {
    entropy(x) + entropy(y) - joint_entropy(x, y)
}

/// Symmetric uncertainty `2 * MI / (H(X) + H(Y))`, 0 when both entropies are 0.
pub fn symmetric_uncertainty(x: &[usize], y: &[usize]) -> f64 {
    let hx = entropy(x);
    let hy = entropy(y);
    if hx + hy == 0.0 {
        return 0.0;
    }
    let mi = hx + hy - joint_entropy(x, y);
    2.0 * mi / (hx + hy)
}
