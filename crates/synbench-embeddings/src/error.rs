//! Embedding file errors.

use thiserror::Error;

/// Errors that can occur while loading a word-vector file.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The file could not be parsed in the configured format.
    #[error("failed to read embeddings: {0}")]
    Read(#[from] finalfusion::error::Error),

    /// No vectors remain once the limit is applied.
    #[error("embedding table is empty")]
    Empty,
}
