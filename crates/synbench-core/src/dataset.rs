//! CSV synonym dataset loader.
//!
//! Loads question sets with the columns `question`, `answer`, `0`, `1`, `2`,
//! `3`, and validates them for common authoring mistakes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};

use crate::error::DatasetError;
use crate::model::{QuestionRecord, CANDIDATE_COUNT};

const QUESTION_COLUMN: &str = "question";
const ANSWER_COLUMN: &str = "answer";
const CANDIDATE_COLUMNS: [&str; CANDIDATE_COUNT] = ["0", "1", "2", "3"];

/// A loaded question set.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Short name, taken from the file stem.
    pub name: String,
    /// Where the dataset was read from.
    pub source: PathBuf,
    /// Questions in file order.
    pub records: Vec<QuestionRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Column positions resolved from the header row.
struct Columns {
    question: usize,
    answer: usize,
    candidates: [usize; CANDIDATE_COUNT],
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .with_context(|| format!("dataset header is missing column '{name}'"))
        };

        let mut candidates = [0usize; CANDIDATE_COUNT];
        for (slot, name) in candidates.iter_mut().zip(CANDIDATE_COLUMNS) {
            *slot = find(name)?;
        }

        Ok(Self {
            question: find(QUESTION_COLUMN)?,
            answer: find(ANSWER_COLUMN)?,
            candidates,
        })
    }

    fn extract(&self, record: &StringRecord, row: usize) -> Result<QuestionRecord, DatasetError> {
        let field = |idx: usize, name: &str| -> Result<String, DatasetError> {
            let value = record
                .get(idx)
                .ok_or_else(|| DatasetError::malformed(row, format!("missing field '{name}'")))?
                .trim();
            if value.is_empty() {
                return Err(DatasetError::malformed(row, format!("empty field '{name}'")));
            }
            Ok(value.to_string())
        };

        let question_word = field(self.question, QUESTION_COLUMN)?;
        let answer_word = field(self.answer, ANSWER_COLUMN)?;
        let mut candidates: [String; CANDIDATE_COUNT] = Default::default();
        for ((slot, &idx), name) in candidates
            .iter_mut()
            .zip(self.candidates.iter())
            .zip(CANDIDATE_COLUMNS)
        {
            *slot = field(idx, name)?;
        }

        Ok(QuestionRecord {
            question_word,
            answer_word,
            candidates,
        })
    }
}

/// Load a dataset from a CSV file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file: {}", path.display()))?;

    parse_dataset_str(&content, path)
}

/// Parse CSV content into a `Dataset` (useful for testing).
pub fn parse_dataset_str(content: &str, source_path: &Path) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read CSV header: {}", source_path.display()))?
        .clone();
    let columns = Columns::resolve(&headers)
        .with_context(|| format!("invalid dataset: {}", source_path.display()))?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result
            .with_context(|| format!("failed to parse CSV row {row}: {}", source_path.display()))?;
        records.push(columns.extract(&record, row)?);
    }

    if records.is_empty() {
        return Err(DatasetError::Empty)
            .with_context(|| format!("invalid dataset: {}", source_path.display()));
    }

    let name = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());

    tracing::debug!(
        "loaded {} questions from {}",
        records.len(),
        source_path.display()
    );

    Ok(Dataset {
        name,
        source: source_path.to_path_buf(),
        records,
    })
}

/// A warning from dataset validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based data row the warning refers to.
    pub row: usize,
    /// Warning message.
    pub message: String,
}

/// Validate a dataset for common issues.
pub fn validate_dataset(dataset: &Dataset) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for repeated question words
    let mut seen = HashSet::new();
    for (i, record) in dataset.records.iter().enumerate() {
        if !seen.insert(record.question_word.as_str()) {
            warnings.push(ValidationWarning {
                row: i + 1,
                message: format!("duplicate question word: {}", record.question_word),
            });
        }
    }

    for (i, record) in dataset.records.iter().enumerate() {
        let row = i + 1;

        // An answer outside the choices can never be labelled correct
        if !record.candidates.contains(&record.answer_word) {
            warnings.push(ValidationWarning {
                row,
                message: format!(
                    "answer '{}' is not among the candidates",
                    record.answer_word
                ),
            });
        }

        let unique: HashSet<&str> = record.candidates.iter().map(String::as_str).collect();
        if unique.len() < CANDIDATE_COUNT {
            warnings.push(ValidationWarning {
                row,
                message: "candidates contain duplicates".into(),
            });
        }
    }

    warnings
}
