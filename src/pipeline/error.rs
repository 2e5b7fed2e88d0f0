//! Error types for the selection pipeline.
//!
//! Only `InvalidInput` and `Analysis` ever reach the caller of
//! [`analyze`](crate::pipeline::analyze). `FilterComputation` is produced by
//! individual scorers and forest fits and is recovered inside the orchestrator.

use thiserror::Error;

/// Errors that can occur while selecting features.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The request itself is unusable (unknown target, empty dataset,
    /// text columns while vectorization is disabled, bad configuration).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A single scorer or forest fit failed.
    #[error("{filter} computation failed: {message}")]
    FilterComputation {
        /// Short name of the failing scorer
        filter: &'static str,
        /// Description of the failure
        message: String,
    },

    /// Any other unexpected failure while orchestrating the analysis.
    #[error("Analysis failed: {0}")]
    Analysis(String),
}

impl SelectionError {
    pub(crate) fn filter(filter: &'static str, message: impl Into<String>) -> Self {
        SelectionError::FilterComputation {
            filter,
            message: message.into(),
        }
    }
}

/// Result alias used across the pipeline.
pub type Result<T> = std::result::Result<T, SelectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = SelectionError::InvalidInput("Target feature 'y' not found in dataset".into());
        assert_eq!(
            err.to_string(),
            "Invalid input: Target feature 'y' not found in dataset"
        );
    }

    #[test]
    fn test_filter_error_message() {
        let err = SelectionError::filter("Pearson", "array length has to be at least 3");
        assert!(err.to_string().starts_with("Pearson computation failed"));
    }
}
