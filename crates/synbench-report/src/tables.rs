//! CSV output tables.
//!
//! A per-question details table for each model run, and a shared summary
//! table that accumulates one row per model.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;

use synbench_core::model::{Label, Outcome, Summary};
use synbench_core::report::EvalReport;

/// One row of the details table.
#[derive(Debug, Serialize)]
struct DetailRow<'a> {
    question_word: &'a str,
    answer_word: &'a str,
    guessed_word: Option<&'a str>,
    label: Label,
}

impl<'a> From<&'a Outcome> for DetailRow<'a> {
    fn from(o: &'a Outcome) -> Self {
        Self {
            question_word: &o.question_word,
            answer_word: &o.answer_word,
            guessed_word: o.guessed_word.as_deref(),
            label: o.label,
        }
    }
}

/// Column names of the summary table, in order.
const SUMMARY_HEADER: [&str; 5] = [
    "model_name",
    "vocabulary_size",
    "correct_count",
    "scored_count",
    "accuracy",
];

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write the per-question details of a report.
///
/// Columns: `question_word, answer_word, guessed_word, label`; an absent
/// guess is an empty cell.
pub fn write_details_csv(report: &EvalReport, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for outcome in &report.outcomes {
        writer.serialize(DetailRow::from(outcome))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Write a summary table containing exactly `summaries`.
pub fn write_summary_csv(summaries: &[Summary], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Append one summary row to a shared table, writing the header only when
/// the file is new or empty.
///
/// Undefined accuracy is written as an empty cell.
pub fn append_summary_csv(summary: &Summary, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let is_new = file.metadata()?.len() == 0;
    if !is_new {
        check_summary_header(path)?;
    }

    let mut writer = WriterBuilder::new().has_headers(is_new).from_writer(file);
    writer.serialize(summary)?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Fail if an existing summary table was written with different columns.
fn check_summary_header(path: &Path) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?;
    if !headers.iter().eq(SUMMARY_HEADER) {
        anyhow::bail!(
            "{} has columns [{}], expected [{}]",
            path.display(),
            headers.iter().collect::<Vec<_>>().join(","),
            SUMMARY_HEADER.join(",")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use synbench_core::report::DatasetSummary;
    use synbench_core::statistics::summarize;

    fn outcome(question: &str, answer: &str, guessed: Option<&str>, label: Label) -> Outcome {
        Outcome {
            question_word: question.into(),
            answer_word: answer.into(),
            guessed_word: guessed.map(String::from),
            label,
        }
    }

    fn make_report() -> EvalReport {
        let outcomes = vec![
            outcome("car", "automobile", Some("automobile"), Label::Correct),
            outcome("car", "bicycle", Some("automobile"), Label::Wrong),
            outcome("xyzzy", "automobile", None, Label::Guess),
        ];
        EvalReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            dataset: DatasetSummary {
                name: "synonym".into(),
                row_count: 3,
            },
            summary: summarize("word2vec-google-news-300", 3_000_000, &outcomes),
            outcomes,
            duration_ms: 5,
        }
    }

    #[test]
    fn details_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("details.csv");
        write_details_csv(&make_report(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "question_word,answer_word,guessed_word,label");
        assert_eq!(lines[1], "car,automobile,automobile,correct");
        assert_eq!(lines[2], "car,bicycle,automobile,wrong");
        assert_eq!(lines[3], "xyzzy,automobile,,guess");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn summary_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/analysis.csv");
        write_summary_csv(&[make_report().summary], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "model_name,vocabulary_size,correct_count,scored_count,accuracy"
        );
        assert_eq!(lines[1], "word2vec-google-news-300,3000000,1,2,0.5");
    }

    #[test]
    fn append_writes_header_once_and_blank_undefined_accuracy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.csv");

        let first = make_report().summary;
        let undefined = Summary {
            model_name: "glove-tiny".into(),
            vocabulary_size: 10,
            correct_count: 0,
            scored_count: 0,
            accuracy: None,
        };
        append_summary_csv(&first, &path).unwrap();
        append_summary_csv(&undefined, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("model_name,"));
        assert!(lines[1].starts_with("word2vec-google-news-300,"));
        assert_eq!(lines[2], "glove-tiny,10,0,0,");
    }

    #[test]
    fn append_refuses_foreign_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.csv");
        std::fs::write(&path, "model,score\nold,0.9\n").unwrap();

        let err = append_summary_csv(&make_report().summary, &path).unwrap_err();
        assert!(err.to_string().contains("expected [model_name,"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "model,score\nold,0.9\n", "file must be left untouched");
    }

    #[test]
    fn summary_header_matches_serialized_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.csv");
        write_summary_csv(&[make_report().summary], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().next(), Some(SUMMARY_HEADER.join(",").as_str()));
    }
}
