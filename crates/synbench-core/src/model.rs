//! Core data model types for synbench.
//!
//! These are the fundamental types the whole system uses to represent
//! synonym questions, per-question outcomes, and run summaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of candidate words offered per question.
pub const CANDIDATE_COUNT: usize = 4;

/// A single multiple-choice synonym question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// The word whose synonym is sought.
    pub question_word: String,
    /// The known correct synonym.
    pub answer_word: String,
    /// The offered choices, in dataset order.
    pub candidates: [String; CANDIDATE_COUNT],
}

impl QuestionRecord {
    pub fn new(
        question_word: impl Into<String>,
        answer_word: impl Into<String>,
        candidates: [&str; CANDIDATE_COUNT],
    ) -> Self {
        Self {
            question_word: question_word.into(),
            answer_word: answer_word.into(),
            candidates: candidates.map(String::from),
        }
    }
}

/// How a question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// The most similar candidate was the answer.
    Correct,
    /// The most similar candidate was some other word.
    Wrong,
    /// The oracle could not score the question.
    Guess,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Correct => write!(f, "correct"),
            Label::Wrong => write!(f, "wrong"),
            Label::Guess => write!(f, "guess"),
        }
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "correct" => Ok(Label::Correct),
            "wrong" => Ok(Label::Wrong),
            "guess" => Ok(Label::Guess),
            other => Err(format!("unknown label: {other}")),
        }
    }
}

/// The classified result of evaluating one question.
///
/// `guessed_word` is `None` exactly when `label` is [`Label::Guess`]; the
/// constructors are the only way to build one outside this crate's tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub question_word: String,
    pub answer_word: String,
    pub guessed_word: Option<String>,
    pub label: Label,
}

impl Outcome {
    /// An unscorable question.
    pub fn guess(record: &QuestionRecord) -> Self {
        Self {
            question_word: record.question_word.clone(),
            answer_word: record.answer_word.clone(),
            guessed_word: None,
            label: Label::Guess,
        }
    }

    /// A scored question; the label follows from an exact comparison.
    pub fn scored(record: &QuestionRecord, guessed_word: &str) -> Self {
        let label = if guessed_word == record.answer_word {
            Label::Correct
        } else {
            Label::Wrong
        };
        Self {
            question_word: record.question_word.clone(),
            answer_word: record.answer_word.clone(),
            guessed_word: Some(guessed_word.to_string()),
            label,
        }
    }

    pub fn is_scored(&self) -> bool {
        self.label != Label::Guess
    }
}

/// Dataset-level statistics for one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Model identifier (e.g. "word2vec-google-news-300").
    pub model_name: String,
    /// Number of words the model knows.
    pub vocabulary_size: u64,
    /// Outcomes labelled correct.
    pub correct_count: u64,
    /// Outcomes that were not guesses.
    pub scored_count: u64,
    /// `correct_count / scored_count`, or `None` when nothing was scored.
    pub accuracy: Option<f64>,
}

impl Summary {
    /// Accuracy rendered for humans, `n/a` when undefined.
    pub fn accuracy_display(&self) -> String {
        match self.accuracy {
            Some(acc) => format!("{:.1}%", acc * 100.0),
            None => "n/a".to_string(),
        }
    }
}
