//! Typed errors for datasets and similarity oracles.
//!
//! Defined in `synbench-core` so callers can downcast and tell a bad input
//! file apart from a failing oracle without string matching.

use thiserror::Error;

/// Errors raised while loading a question dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A row violates the dataset contract.
    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// The dataset has a header but no rows.
    #[error("dataset contains no questions")]
    Empty,
}

/// Errors raised by a similarity oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    /// A word outside the vocabulary was passed to `similarity`.
    #[error("word not in vocabulary: {0}")]
    UnknownWord(String),

    /// The backing model can no longer serve requests.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
}

impl DatasetError {
    /// Shorthand for [`DatasetError::MalformedRecord`].
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        DatasetError::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }
}
