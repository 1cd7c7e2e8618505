//! Dataset-level accuracy aggregation.
//!
//! Accuracy is computed over scored questions only; guesses are excluded
//! from the denominator and an all-guess run has no accuracy at all.

use serde::{Deserialize, Serialize};

use crate::model::{Label, Outcome, Summary};

/// Per-label tallies over a set of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub correct: u64,
    pub wrong: u64,
    pub guess: u64,
}

impl LabelCounts {
    /// Tally labels across `outcomes`.
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut counts = Self::default();
        for outcome in outcomes {
            match outcome.label {
                Label::Correct => counts.correct += 1,
                Label::Wrong => counts.wrong += 1,
                Label::Guess => counts.guess += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> u64 {
        self.correct + self.wrong + self.guess
    }

    /// Questions the oracle had an opinion on.
    pub fn scored(&self) -> u64 {
        self.correct + self.wrong
    }
}

/// `correct / scored`, or `None` when nothing was scored.
pub fn accuracy(correct: u64, scored: u64) -> Option<f64> {
    if scored == 0 {
        None
    } else {
        Some(correct as f64 / scored as f64)
    }
}

/// Summarize a full run of outcomes for one model.
pub fn summarize(model_name: &str, vocabulary_size: u64, outcomes: &[Outcome]) -> Summary {
    let counts = LabelCounts::from_outcomes(outcomes);
    let scored_count = counts.total() - counts.guess;

    Summary {
        model_name: model_name.to_string(),
        vocabulary_size,
        correct_count: counts.correct,
        scored_count,
        accuracy: accuracy(counts.correct, scored_count),
    }
}
