//! Random forest used for impurity importance and wrapper evaluation
//!
//! Trees are grown on bootstrap samples in parallel. Each tree gets its own
//! ChaCha8 stream seeded from `seed + tree index`, so results do not depend on
//! thread scheduling.

pub mod tree;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use super::config::{ImportanceConfig, SelectionConfig};
use super::error::{Result, SelectionError};
use super::matrix::FeatureMatrix;
use super::target::{Mode, Target};

pub use tree::{DecisionTree, Node};

/// Depth cap applied to every tree
pub const MAX_DEPTH: usize = 20;

/// Smallest leaf of the cross-validation forests
const CV_MIN_LEAF: usize = 5;

/// Forest hyperparameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParams {
    pub trees: usize,
    /// Features tried at each split
    pub mtry: usize,
    /// Minimum samples in each child of a split
    pub min_leaf: usize,
    /// Maximum number of leaves per tree
    pub max_nodes: usize,
    pub max_depth: usize,
    /// Draw a bootstrap sample per tree (otherwise every tree sees all samples)
    pub bootstrap: bool,
    pub seed: u64,
}

impl ForestParams {
    /// Importance forest over the whole matrix: `round(sqrt(p))` features per
    /// split, leaves down to a single sample.
    pub fn importance(n_features: usize, n_samples: usize, config: &ImportanceConfig, seed: u64) -> Self {
        Self {
            trees: config.trees,
            mtry: ((n_features as f64).sqrt().round() as usize).max(1),
            min_leaf: config.min_leaf,
            max_nodes: n_samples.max(2),
            max_depth: MAX_DEPTH,
            bootstrap: true,
            seed,
        }
    }

    /// Small forest used to score a feature subset inside cross-validation.
    pub fn cross_validation(mode: Mode, n_features: usize, n_train: usize, trees: usize, seed: u64) -> Self {
        let mtry = match mode {
            Mode::Classification => (n_features as f64).sqrt().floor() as usize,
            Mode::Regression => n_features / 3,
        };
        Self {
            trees,
            mtry: mtry.max(1),
            min_leaf: CV_MIN_LEAF,
            max_nodes: (n_train / 5).max(2),
            max_depth: MAX_DEPTH,
            bootstrap: true,
            seed,
        }
    }

    pub fn with_trees(mut self, trees: usize) -> Self {
        self.trees = trees;
        self
    }
}

/// A fitted forest over a subset of matrix columns
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    features: Vec<usize>,
    importance: Vec<f64>,
    n_classes: usize,
}

impl RandomForest {
    /// Fit a forest on the training samples `samples` using the columns in
    /// `features`.
    ///
    /// # Arguments
    /// * `matrix` - Full feature matrix
    /// * `features` - Matrix columns the trees may split on
    /// * `samples` - Training rows of the matrix
    /// * `target` - Target for every row of the matrix
    /// * `params` - Forest hyperparameters
    pub fn fit(
        matrix: &FeatureMatrix,
        features: &[usize],
        samples: &[usize],
        target: &Target,
        params: &ForestParams,
    ) -> Result<Self> {
        if features.is_empty() {
            return Err(SelectionError::filter("RandomForest", "no features to train on"));
        }
        if samples.is_empty() {
            return Err(SelectionError::filter("RandomForest", "no training samples"));
        }
        if target.len() != matrix.n_samples() {
            return Err(SelectionError::filter(
                "RandomForest",
                format!(
                    "target has {} values for {} samples",
                    target.len(),
                    matrix.n_samples()
                ),
            ));
        }
        if params.trees == 0 {
            return Err(SelectionError::filter("RandomForest", "forest needs at least one tree"));
        }

        let fitted: Vec<(DecisionTree, Vec<f64>)> = (0..params.trees)
            .into_par_iter()
            .map(|t| {
                let mut rng = ChaCha8Rng::seed_from_u64(params.seed.wrapping_add(t as u64));
                let drawn = if params.bootstrap {
                    (0..samples.len())
                        .map(|_| samples[rng.gen_range(0..samples.len())])
                        .collect()
                } else {
                    samples.to_vec()
                };
                DecisionTree::fit(matrix, features, target, drawn, params, &mut rng)
            })
            .collect();

        let mut importance = vec![0.0; features.len()];
        let mut trees = Vec::with_capacity(fitted.len());
        for (tree, tree_importance) in fitted {
            for (total, value) in importance.iter_mut().zip(tree_importance) {
                *total += value;
            }
            trees.push(tree);
        }

        Ok(Self {
            trees,
            features: features.to_vec(),
            importance,
            n_classes: target.n_classes(),
        })
    }

    /// Summed impurity decrease per entry of the training feature list.
    pub fn importance(&self) -> &[f64] {
        &self.importance
    }

    pub fn features(&self) -> &[usize] {
        &self.features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Majority vote (ties to the smallest class) or mean of the tree outputs.
    pub fn predict(&self, matrix: &FeatureMatrix, sample: usize) -> f64 {
        if self.n_classes > 0 {
            let mut votes = vec![0usize; self.n_classes];
            for tree in &self.trees {
                let class = tree.predict(matrix, sample) as usize;
                if class < votes.len() {
                    votes[class] += 1;
                }
            }
            tree::majority(&votes) as f64
        } else {
            let sum: f64 = self.trees.iter().map(|t| t.predict(matrix, sample)).sum();
            sum / self.trees.len() as f64
        }
    }

    pub fn predict_all(&self, matrix: &FeatureMatrix, samples: &[usize]) -> Vec<f64> {
        samples.iter().map(|&s| self.predict(matrix, s)).collect()
    }
}

/// Fit the importance forest on every sample and feature of the matrix.
pub fn forest_importance(matrix: &FeatureMatrix, target: &Target, config: &SelectionConfig) -> Result<Vec<f64>> {
    let features: Vec<usize> = (0..matrix.n_features()).collect();
    let samples: Vec<usize> = (0..matrix.n_samples()).collect();
    let params = ForestParams::importance(
        matrix.n_features(),
        matrix.n_samples(),
        &config.importance,
        config.seed,
    );
    let forest = RandomForest::fit(matrix, &features, &samples, target, &params)?;
    Ok(forest.importance().to_vec())
}
