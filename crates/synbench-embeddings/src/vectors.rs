//! Pretrained word vectors as a similarity oracle.
//!
//! Files are parsed by `finalfusion`, which stores unit-normalised rows, so
//! cosine similarity reduces to a dot product at query time.

use std::fmt;
use std::io::BufRead;

use finalfusion::prelude::*;
use finalfusion::storage::NdArray;
use finalfusion::vocab::{SimpleVocab, Vocab, WordIndex};

use synbench_core::error::OracleError;
use synbench_core::traits::SimilarityOracle;

use crate::error::EmbeddingError;

type Table = Embeddings<SimpleVocab, NdArray>;

/// A loaded embedding table, optionally restricted to its first `limit`
/// words.
pub struct WordVectors {
    name: String,
    embeddings: Table,
    /// Number of leading vocabulary entries that are visible.
    limit: usize,
}

impl fmt::Debug for WordVectors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordVectors")
            .field("name", &self.name)
            .field("dim", &self.dim())
            .field("len", &self.len())
            .finish()
    }
}

impl WordVectors {
    /// Wrap a parsed table. Only the first `limit` words in file order are
    /// visible when a limit is given.
    pub fn new(
        name: impl Into<String>,
        embeddings: Table,
        limit: Option<usize>,
    ) -> Result<Self, EmbeddingError> {
        let name = name.into();
        let total = embeddings.vocab().words_len();
        let limit = limit.map_or(total, |l| l.min(total));
        if limit == 0 || embeddings.dims() == 0 {
            return Err(EmbeddingError::Empty);
        }
        if limit < total {
            tracing::debug!("'{}': keeping first {} of {} words", name, limit, total);
        }
        Ok(Self {
            name,
            embeddings,
            limit,
        })
    }

    pub fn dim(&self) -> usize {
        self.embeddings.dims()
    }

    pub fn len(&self) -> usize {
        self.limit
    }

    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }

    /// Visible words in file order.
    pub fn words(&self) -> &[String] {
        &self.embeddings.vocab().words()[..self.limit]
    }

    /// The normalised vector for `word`.
    pub fn vector(&self, word: &str) -> Option<Vec<f32>> {
        if !self.contains(word) {
            return None;
        }
        self.embeddings.embedding(word).map(|e| e.to_vec())
    }
}

impl SimilarityOracle for WordVectors {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, word: &str) -> bool {
        matches!(
            self.embeddings.vocab().idx(word),
            Some(WordIndex::Word(idx)) if idx < self.limit
        )
    }

    /// Cosine similarity of the two words' vectors.
    fn similarity(&self, a: &str, b: &str) -> anyhow::Result<f32> {
        let lookup = |word: &str| {
            if !self.contains(word) {
                return Err(OracleError::UnknownWord(word.to_string()));
            }
            self.embeddings
                .embedding(word)
                .ok_or_else(|| OracleError::UnknownWord(word.to_string()))
        };
        let (va, vb) = (lookup(a)?, lookup(b)?);
        Ok(va.dot(&vb))
    }

    fn vocabulary_size(&self) -> usize {
        self.limit
    }
}

/// Read the original word2vec binary format.
pub fn read_word2vec_binary<R: BufRead>(
    name: &str,
    mut reader: R,
    limit: Option<usize>,
) -> Result<WordVectors, EmbeddingError> {
    let embeddings = Table::read_word2vec_binary(&mut reader)?;
    WordVectors::new(name, embeddings, limit)
}

/// Read the word2vec text format: a `"<count> <dim>"` header followed by one
/// `word v1 v2 ...` line per entry.
pub fn read_word2vec_text<R: BufRead>(
    name: &str,
    mut reader: R,
    limit: Option<usize>,
) -> Result<WordVectors, EmbeddingError> {
    let embeddings = Table::read_text_dims(&mut reader)?;
    WordVectors::new(name, embeddings, limit)
}

/// Read the headerless GloVe text format.
pub fn read_glove_text<R: BufRead>(
    name: &str,
    mut reader: R,
    limit: Option<usize>,
) -> Result<WordVectors, EmbeddingError> {
    let embeddings = Table::read_text(&mut reader)?;
    WordVectors::new(name, embeddings, limit)
}
