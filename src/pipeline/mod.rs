//! Pipeline module - the feature selection engine
//!
//! Leaves first: value parsing, column roles, target encoding, text
//! vectorization and matrix assembly feed the filter bank, the forest and the
//! wrapper search; `aggregate` and `analyze` turn their outputs into a
//! [`SelectionResult`].

pub mod aggregate;
pub mod analyze;
pub mod columns;
pub mod config;
pub mod error;
pub mod filters;
pub mod forest;
pub mod information;
pub mod loader;
pub mod matrix;
pub mod target;
pub mod text;
pub mod values;
pub mod wrappers;

pub use aggregate::{aggregate_text_columns, FeatureScore, FilterScores, ScoreAggregator, SelectionResult};
pub use analyze::{analyze, FeatureSelector};
pub use columns::{classify_columns, find_target_index, ColumnLayout, ColumnRole};
pub use config::{ImportanceConfig, ScoreWeights, SelectionConfig, WrapperConfig, WrapperStrategy};
pub use error::{Result, SelectionError};
pub use filters::{normalize, ScoreMap};
pub use loader::*;
pub use matrix::{assemble_matrix, FeatureDescriptor, FeatureMatrix, FeatureOrigin};
pub use target::{detect_mode, encode_target, prepare_target, Mode, Target};
pub use text::{StopWords, TextVectorizer, Vocabulary};
