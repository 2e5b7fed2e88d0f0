//! Sequential forward selection

use rayon::prelude::*;
use tracing::debug;

use super::cv::CrossValidator;
use crate::pipeline::error::Result;

/// Greedily add the feature that most improves the CV metric.
///
/// The first pick is always kept; later picks need an improvement of at least
/// `min_gain`, otherwise the search stops. Returns features in pick order.
pub fn forward_selection(cv: &CrossValidator, max_features: usize, min_gain: f64) -> Result<Vec<usize>> {
    let n_features = cv.matrix().n_features();
    let cap = max_features.min(n_features);
    let mut selected: Vec<usize> = Vec::with_capacity(cap);
    let mut active = vec![true; n_features];
    let mut previous = f64::NEG_INFINITY;

    for step in 0..cap {
        let candidates: Vec<usize> = (0..n_features).filter(|&j| active[j]).collect();
        if candidates.is_empty() {
            break;
        }

        let scores = candidates
            .par_iter()
            .map(|&candidate| {
                let mut trial = selected.clone();
                trial.push(candidate);
                cv.evaluate(&trial)
            })
            .collect::<Result<Vec<f64>>>()?;

        let mut best = 0;
        for (i, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = i;
            }
        }
        let (feature, metric) = (candidates[best], scores[best]);

        if step > 0 && metric - previous < min_gain {
            debug!(
                "SFS stopping at step {}: gain {:.6} below {}",
                step,
                metric - previous,
                min_gain
            );
            break;
        }

        debug!("SFS step {}: added feature {} (metric {:.4})", step, feature, metric);
        selected.push(feature);
        active[feature] = false;
        previous = metric;
    }

    Ok(selected)
}
