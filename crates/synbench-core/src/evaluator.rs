//! Per-question synonym resolution.
//!
//! Picks the candidate the oracle rates most similar to the question word
//! and classifies the pick against the known answer.

use anyhow::{Context, Result};

use crate::model::{Outcome, QuestionRecord};
use crate::traits::SimilarityOracle;

/// Evaluate a single question against an oracle.
///
/// - Unknown question word, or no known candidate: [`Label::Guess`].
/// - Otherwise the highest-scoring known candidate is picked; on equal
///   scores the earliest candidate in dataset order wins.
///
/// Oracle failures propagate with the offending word pair attached.
///
/// [`Label::Guess`]: crate::model::Label::Guess
pub fn evaluate(record: &QuestionRecord, oracle: &dyn SimilarityOracle) -> Result<Outcome> {
    if !oracle.contains(&record.question_word) {
        return Ok(Outcome::guess(record));
    }

    let mut best: Option<(&str, f32)> = None;
    for candidate in record
        .candidates
        .iter()
        .filter(|c| oracle.contains(c.as_str()))
    {
        let score = oracle
            .similarity(&record.question_word, candidate)
            .with_context(|| {
                format!(
                    "similarity({}, {}) failed",
                    record.question_word, candidate
                )
            })?;
        // Strict comparison keeps the first maximum.
        let replace = match best {
            Some((_, best_score)) => score > best_score,
            None => true,
        };
        if replace {
            best = Some((candidate.as_str(), score));
        }
    }

    Ok(match best {
        Some((guessed, _)) => Outcome::scored(record, guessed),
        None => Outcome::guess(record),
    })
}

/// Evaluate every record in order.
///
/// This is the sequential pipeline stage; the engine fans it out over
/// chunks when parallelism is enabled.
pub fn run_evaluation(
    records: &[QuestionRecord],
    oracle: &dyn SimilarityOracle,
) -> Result<Vec<Outcome>> {
    records
        .iter()
        .map(|record| evaluate(record, oracle))
        .collect()
}
