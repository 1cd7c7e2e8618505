//! Mock oracle for testing.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use synbench_core::error::OracleError;
use synbench_core::traits::SimilarityOracle;

/// A similarity oracle backed by an explicit word list and pair table.
///
/// Pairs not in the table score `default_score`; identical words score 1.0.
pub struct MockOracle {
    name: String,
    vocabulary: HashSet<String>,
    scores: HashMap<(String, String), f32>,
    default_score: f32,
    /// Number of similarity calls made.
    call_count: AtomicU32,
    /// When set, every similarity call fails as if the backing store vanished.
    unavailable: AtomicBool,
}

impl MockOracle {
    /// Create a mock that knows exactly `words`.
    pub fn new(words: &[&str]) -> Self {
        Self {
            name: "mock".to_string(),
            vocabulary: words.iter().map(|w| w.to_string()).collect(),
            scores: HashMap::new(),
            default_score: 0.0,
            call_count: AtomicU32::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the symmetric score for a pair.
    pub fn with_score(mut self, a: &str, b: &str, score: f32) -> Self {
        self.scores.insert((a.to_string(), b.to_string()), score);
        self.scores.insert((b.to_string(), a.to_string()), score);
        self
    }

    pub fn with_default_score(mut self, score: f32) -> Self {
        self.default_score = score;
        self
    }

    /// Make every subsequent similarity call fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    /// Get the number of similarity calls made to this oracle.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl SimilarityOracle for MockOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    fn similarity(&self, a: &str, b: &str) -> anyhow::Result<f32> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        if self.unavailable.load(Ordering::Relaxed) {
            return Err(OracleError::Unavailable(format!("{} is offline", self.name)).into());
        }
        for word in [a, b] {
            if !self.contains(word) {
                return Err(OracleError::UnknownWord(word.to_string()).into());
            }
        }
        if a == b {
            return Ok(1.0);
        }

        Ok(self
            .scores
            .get(&(a.to_string(), b.to_string()))
            .copied()
            .unwrap_or(self.default_score))
    }

    fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}
