//! Error types for the cleaning and scoring stages

use thiserror::Error;

/// A raw field that could not be coerced into its cleaned type.
///
/// `index` is the position of the offending record in the raw batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("record {index}: required field '{field}' is missing")]
    MissingField { index: usize, field: &'static str },
    #[error("record {index}: no digits found in {field} value '{value}'")]
    NoDigits {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("record {index}: invalid {field} value '{value}'")]
    InvalidNumber {
        index: usize,
        field: &'static str,
        value: String,
    },
}

/// Failure of a pipeline run. Any variant aborts the whole batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("no records left to score after cleaning")]
    EmptyBatch,
    #[error("need at least {required} distinct scores to form {required} classes, found {found}")]
    InsufficientScores { required: usize, found: usize },
    #[error("cluster {0} received no records")]
    EmptyCluster(usize),
    #[error("clustering failed: {0}")]
    Clustering(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
