//! Sequential backward selection

use rayon::prelude::*;
use tracing::debug;

use super::cv::CrossValidator;
use crate::pipeline::error::Result;

/// Start from every feature and repeatedly drop the one whose removal scores
/// best, until `min_features` remain. Returns the survivors in ascending order.
pub fn backward_selection(cv: &CrossValidator, min_features: usize) -> Result<Vec<usize>> {
    let n_features = cv.matrix().n_features();
    let floor = min_features.min(n_features);
    let mut active = vec![true; n_features];
    let mut remaining = n_features;

    while remaining > floor {
        let candidates: Vec<usize> = (0..n_features).filter(|&j| active[j]).collect();

        let scores = candidates
            .par_iter()
            .map(|&dropped| {
                let trial: Vec<usize> = candidates.iter().copied().filter(|&j| j != dropped).collect();
                cv.evaluate(&trial)
            })
            .collect::<Result<Vec<f64>>>()?;

        let mut best = 0;
        for (i, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = i;
            }
        }

        debug!(
            "SBS removed feature {} (metric {:.4}, {} left)",
            candidates[best],
            scores[best],
            remaining - 1
        );
        active[candidates[best]] = false;
        remaining -= 1;
    }

    Ok((0..n_features).filter(|&j| active[j]).collect())
}
