//! synbench-embeddings: Word-vector similarity oracles.
//!
//! Implements the `SimilarityOracle` trait over pretrained word vectors in
//! word2vec (binary and text) and GloVe formats, plus the model
//! configuration that tells synbench where those files live.

pub mod config;
pub mod error;
pub mod mock;
pub mod vectors;

pub use config::{load_config, load_oracle, ModelConfig, SynbenchConfig};
pub use error::EmbeddingError;
pub use vectors::WordVectors;
