//! featsift: Feature Selection Library
//!
//! Decides which columns of a tabular dataset are relevant to a target, for
//! classification or regression, by combining mutual information, Pearson
//! correlation, ANOVA F, FCBF, random forest importance and a wrapper search.
//!
//! ```no_run
//! let rows = vec![
//!     vec!["x".to_string(), "y".to_string()],
//!     vec!["1".to_string(), "2".to_string()],
//! ];
//! let result = featsift::analyze(&rows, "y", false);
//! ```

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use pipeline::{analyze, FeatureScore, FeatureSelector, Mode, SelectionConfig, SelectionError, SelectionResult};
