//! Wrapper search: feature subsets chosen by model performance
//!
//! The default strategy is sequential forward selection; backward selection and
//! recursive feature elimination are available through [`WrapperStrategy`].
//! All strategies are skipped on datasets smaller than
//! `WrapperConfig::min_samples`.

pub mod cv;
pub mod rfe;
pub mod sbs;
pub mod sfs;

use tracing::info;

use super::config::{SelectionConfig, WrapperStrategy};
use super::error::Result;
use super::matrix::FeatureMatrix;
use super::target::Target;

pub use cv::CrossValidator;
pub use rfe::recursive_elimination;
pub use sbs::backward_selection;
pub use sfs::forward_selection;

/// Run the configured wrapper and return the matrix columns it selected.
pub fn run_wrapper(matrix: &FeatureMatrix, target: &Target, config: &SelectionConfig) -> Result<Vec<usize>> {
    let settings = &config.wrapper;
    if matrix.n_samples() < settings.min_samples {
        info!(
            "Skipping {} wrapper: {} samples (needs {})",
            settings.strategy.tag(),
            matrix.n_samples(),
            settings.min_samples
        );
        return Ok(Vec::new());
    }
    if matrix.n_features() == 0 {
        return Ok(Vec::new());
    }

    let selected = match settings.strategy {
        WrapperStrategy::Sfs => {
            let cv = CrossValidator::new(matrix, target, settings.folds, settings.cv_trees, config.seed);
            forward_selection(&cv, settings.max_features, settings.min_gain)?
        }
        WrapperStrategy::Sbs => {
            let cv = CrossValidator::new(matrix, target, settings.folds, settings.cv_trees, config.seed);
            backward_selection(&cv, settings.min_features)?
        }
        WrapperStrategy::Rfe => {
            recursive_elimination(matrix, target, settings.min_features, settings.rfe_trees, config.seed)?
        }
    };

    info!("{} selected {} features", settings.strategy.tag(), selected.len());
    Ok(selected)
}
