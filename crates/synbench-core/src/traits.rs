//! Core trait definition for similarity oracles.
//!
//! Implemented by the `synbench-embeddings` crate for on-disk word vectors
//! and by its mock for tests.

use serde::{Deserialize, Serialize};

/// A read-only word-vector space that can score word pairs.
///
/// Implementations must be safe to share across threads: the engine
/// evaluates dataset chunks concurrently against one oracle.
pub trait SimilarityOracle: Send + Sync {
    /// Human-readable model name (e.g. "word2vec-google-news-300").
    fn name(&self) -> &str;

    /// Whether `word` is in the vocabulary.
    fn contains(&self, word: &str) -> bool;

    /// Symmetric similarity between two known words; higher is more similar.
    ///
    /// Calling this with an unknown word is a caller bug and should fail with
    /// [`OracleError::UnknownWord`](crate::error::OracleError::UnknownWord).
    fn similarity(&self, a: &str, b: &str) -> anyhow::Result<f32>;

    /// Number of words in the vocabulary.
    fn vocabulary_size(&self) -> usize;

    /// Metadata snapshot for reports and listings.
    fn info(&self) -> OracleInfo {
        OracleInfo {
            name: self.name().to_string(),
            vocabulary_size: self.vocabulary_size() as u64,
        }
    }
}

/// Information about a loaded oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleInfo {
    /// Model name.
    pub name: String,
    /// Vocabulary size.
    pub vocabulary_size: u64,
}
