//! CART decision tree grown best-first
//!
//! Nodes live in a flat arena and reference their children by index. Growth
//! always expands the pending leaf with the largest impurity decrease until the
//! leaf budget (`max_nodes`) is spent, so the budget keeps the most useful
//! splits.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rand::seq::index::sample;
use rand::Rng;

use super::ForestParams;
use crate::pipeline::matrix::FeatureMatrix;
use crate::pipeline::target::Target;

/// Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Leaf holding a class code (as `f64`) or a regression mean
    Leaf { value: f64 },
    /// Internal split on a matrix column; `<= threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Sufficient statistics of the target within a node
#[derive(Debug, Clone)]
enum NodeStats {
    Class { counts: Vec<usize>, n: usize },
    Value { n: usize, sum: f64, sum_sq: f64 },
}

impl NodeStats {
    fn empty(target: &Target) -> Self {
        match target {
            Target::Classification(_) => NodeStats::Class {
                counts: vec![0; target.n_classes()],
                n: 0,
            },
            Target::Regression(_) => NodeStats::Value {
                n: 0,
                sum: 0.0,
                sum_sq: 0.0,
            },
        }
    }

    fn of(target: &Target, samples: &[usize]) -> Self {
        let mut stats = Self::empty(target);
        for &s in samples {
            stats.add(target, s);
        }
        stats
    }

    fn add(&mut self, target: &Target, sample: usize) {
        match (self, target) {
            (NodeStats::Class { counts, n }, Target::Classification(labels)) => {
                counts[labels[sample]] += 1;
                *n += 1;
            }
            (NodeStats::Value { n, sum, sum_sq }, Target::Regression(values)) => {
                let v = values[sample];
                *n += 1;
                *sum += v;
                *sum_sq += v * v;
            }
            _ => unreachable!("node statistics always match the target variant"),
        }
    }

    fn remove(&mut self, target: &Target, sample: usize) {
        match (self, target) {
            (NodeStats::Class { counts, n }, Target::Classification(labels)) => {
                counts[labels[sample]] -= 1;
                *n -= 1;
            }
            (NodeStats::Value { n, sum, sum_sq }, Target::Regression(values)) => {
                let v = values[sample];
                *n -= 1;
                *sum -= v;
                *sum_sq -= v * v;
            }
            _ => unreachable!("node statistics always match the target variant"),
        }
    }

    fn count(&self) -> usize {
        match self {
            NodeStats::Class { n, .. } | NodeStats::Value { n, .. } => *n,
        }
    }

    /// Node impurity times node size: Gini for classes, SSE for values.
    fn weighted_impurity(&self) -> f64 {
        match self {
            NodeStats::Class { counts, n } => {
                if *n == 0 {
                    return 0.0;
                }
                let sq: f64 = counts.iter().map(|&c| (c * c) as f64).sum();
                *n as f64 - sq / *n as f64
            }
            NodeStats::Value { n, sum, sum_sq } => {
                if *n == 0 {
                    return 0.0;
                }
                (sum_sq - sum * sum / *n as f64).max(0.0)
            }
        }
    }

    fn is_pure(&self) -> bool {
        self.weighted_impurity() <= 1e-12
    }

    fn leaf_value(&self) -> f64 {
        match self {
            NodeStats::Class { counts, .. } => majority(counts) as f64,
            NodeStats::Value { n, sum, .. } => {
                if *n == 0 {
                    0.0
                } else {
                    sum / *n as f64
                }
            }
        }
    }
}

/// Most frequent class; ties go to the smallest code.
pub(crate) fn majority(counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = class;
        }
    }
    best
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    /// Position in the tree's feature subset
    position: usize,
    threshold: f64,
    gain: f64,
}

struct PendingLeaf {
    node: usize,
    depth: usize,
    samples: Vec<usize>,
    split: SplitCandidate,
}

impl PartialEq for PendingLeaf {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PendingLeaf {}

impl PartialOrd for PendingLeaf {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingLeaf {
    fn cmp(&self, other: &Self) -> Ordering {
        // Largest gain first, then the oldest node
        self.split
            .gain
            .total_cmp(&other.split.gain)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// A fitted decision tree
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Grow a tree on `samples` (duplicates allowed) using the matrix columns in
    /// `features`. Returns the tree and the impurity decrease credited to each
    /// position of `features`.
    pub fn fit<R: Rng>(
        matrix: &FeatureMatrix,
        features: &[usize],
        target: &Target,
        samples: Vec<usize>,
        params: &ForestParams,
        rng: &mut R,
    ) -> (Self, Vec<f64>) {
        let mut importance = vec![0.0; features.len()];
        let root_stats = NodeStats::of(target, &samples);
        let mut nodes = vec![Node::Leaf {
            value: root_stats.leaf_value(),
        }];

        let mut heap = BinaryHeap::new();
        if let Some(split) = find_split(matrix, features, target, &samples, &root_stats, 0, params, rng) {
            heap.push(PendingLeaf {
                node: 0,
                depth: 0,
                samples,
                split,
            });
        }

        let mut leaves = 1;
        while leaves < params.max_nodes {
            let Some(pending) = heap.pop() else {
                break;
            };
            let feature = features[pending.split.position];
            let column = matrix.column(feature);
            let (left, right): (Vec<usize>, Vec<usize>) = pending
                .samples
                .iter()
                .partition(|&&s| column[s] <= pending.split.threshold);

            let left_stats = NodeStats::of(target, &left);
            let right_stats = NodeStats::of(target, &right);
            let left_id = nodes.len();
            let right_id = left_id + 1;
            nodes.push(Node::Leaf {
                value: left_stats.leaf_value(),
            });
            nodes.push(Node::Leaf {
                value: right_stats.leaf_value(),
            });
            nodes[pending.node] = Node::Split {
                feature,
                threshold: pending.split.threshold,
                left: left_id,
                right: right_id,
            };
            importance[pending.split.position] += pending.split.gain;
            leaves += 1;

            let depth = pending.depth + 1;
            for (id, child, stats) in [(left_id, left, left_stats), (right_id, right, right_stats)] {
                if let Some(split) =
                    find_split(matrix, features, target, &child, &stats, depth, params, rng)
                {
                    heap.push(PendingLeaf {
                        node: id,
                        depth,
                        samples: child,
                        split,
                    });
                }
            }
        }

        (DecisionTree { nodes }, importance)
    }

    /// Predict one sample of the matrix.
    pub fn predict(&self, matrix: &FeatureMatrix, sample: usize) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if matrix.value(sample, *feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

/// Best split of a node over `mtry` randomly drawn features, if any split
/// decreases impurity while keeping `min_leaf` samples on both sides.
#[allow(clippy::too_many_arguments)]
fn find_split<R: Rng>(
    matrix: &FeatureMatrix,
    features: &[usize],
    target: &Target,
    samples: &[usize],
    stats: &NodeStats,
    depth: usize,
    params: &ForestParams,
    rng: &mut R,
) -> Option<SplitCandidate> {
    let n = samples.len();
    if depth >= params.max_depth || n < 2 * params.min_leaf || n < 2 || stats.is_pure() {
        return None;
    }

    let parent = stats.weighted_impurity();
    let mtry = params.mtry.clamp(1, features.len());
    let mut best: Option<SplitCandidate> = None;

    for position in sample(rng, features.len(), mtry).into_iter() {
        let column = matrix.column(features[position]);
        let mut sorted: Vec<(f64, usize)> = samples.iter().map(|&s| (column[s], s)).collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left = NodeStats::empty(target);
        let mut right = stats.clone();

        for i in 0..n - 1 {
            let (value, s) = sorted[i];
            left.add(target, s);
            right.remove(target, s);

            let next = sorted[i + 1].0;
            if value == next || left.count() < params.min_leaf || right.count() < params.min_leaf {
                continue;
            }

            let gain = parent - left.weighted_impurity() - right.weighted_impurity();
            if gain > 1e-12 && best.map_or(true, |b| gain > b.gain) {
                let mid = (value + next) / 2.0;
                let threshold = if mid < next { mid } else { value };
                best = Some(SplitCandidate {
                    position,
                    threshold,
                    gain,
                });
            }
        }
    }

    best
}
