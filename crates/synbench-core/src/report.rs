//! Eval report types with JSON persistence and regression detection.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Label, Outcome, Summary};
use crate::statistics::LabelCounts;

/// A complete eval report for one model over one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the dataset.
    pub dataset: DatasetSummary,
    /// Aggregate statistics.
    pub summary: Summary,
    /// Per-question outcomes, in dataset order.
    pub outcomes: Vec<Outcome>,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a dataset (without the questions themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    pub row_count: usize,
}

impl EvalReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvalReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Tally outcome labels.
    pub fn label_counts(&self) -> LabelCounts {
        LabelCounts::from_outcomes(&self.outcomes)
    }

    /// Compare this report against a baseline to detect regressions.
    ///
    /// Questions are matched on `(question_word, answer_word)`; the first
    /// occurrence wins when a dataset repeats a pair.
    pub fn compare(&self, baseline: &EvalReport, threshold: f64) -> RegressionReport {
        let label_map = |report: &EvalReport| -> HashMap<(String, String), Label> {
            let mut map = HashMap::new();
            for o in &report.outcomes {
                map.entry((o.question_word.clone(), o.answer_word.clone()))
                    .or_insert(o.label);
            }
            map
        };

        let baseline_labels = label_map(baseline);
        let current_labels = label_map(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_questions = 0usize;

        for ((question_word, answer_word), &current) in &current_labels {
            let key = (question_word.clone(), answer_word.clone());
            let Some(&previous) = baseline_labels.get(&key) else {
                new_questions += 1;
                continue;
            };
            let change = LabelChange {
                question_word: question_word.clone(),
                answer_word: answer_word.clone(),
                baseline: previous,
                current,
            };
            match (previous == Label::Correct, current == Label::Correct) {
                (true, false) => regressions.push(change),
                (false, true) => improvements.push(change),
                _ => unchanged += 1,
            }
        }

        let removed_questions = baseline_labels
            .keys()
            .filter(|k| !current_labels.contains_key(*k))
            .count();

        regressions.sort_by(|a, b| a.question_word.cmp(&b.question_word));
        improvements.sort_by(|a, b| a.question_word.cmp(&b.question_word));

        let accuracy_delta = match (self.summary.accuracy, baseline.summary.accuracy) {
            (Some(current), Some(previous)) => Some(current - previous),
            _ => None,
        };

        RegressionReport {
            baseline_model: baseline.summary.model_name.clone(),
            current_model: self.summary.model_name.clone(),
            baseline_accuracy: baseline.summary.accuracy,
            current_accuracy: self.summary.accuracy,
            accuracy_delta,
            threshold,
            regressions,
            improvements,
            unchanged,
            new_questions,
            removed_questions,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionReport {
    pub baseline_model: String,
    pub current_model: String,
    pub baseline_accuracy: Option<f64>,
    pub current_accuracy: Option<f64>,
    /// `current - baseline`, undefined if either accuracy is.
    pub accuracy_delta: Option<f64>,
    /// Accuracy drop tolerated before the run counts as regressed.
    pub threshold: f64,
    /// Questions that were correct and no longer are.
    pub regressions: Vec<LabelChange>,
    /// Questions that became correct.
    pub improvements: Vec<LabelChange>,
    /// Questions whose correctness did not change.
    pub unchanged: usize,
    /// Questions in current but not baseline.
    pub new_questions: usize,
    /// Questions in baseline but not current.
    pub removed_questions: usize,
}

/// A question whose label changed between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelChange {
    pub question_word: String,
    pub answer_word: String,
    pub baseline: Label,
    pub current: Label,
}

fn fmt_accuracy(acc: Option<f64>) -> String {
    acc.map(|a| format!("{:.1}%", a * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

impl RegressionReport {
    /// Format the regression report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Accuracy:** {} ({}) -> {} ({})",
            fmt_accuracy(self.baseline_accuracy),
            self.baseline_model,
            fmt_accuracy(self.current_accuracy),
            self.current_model,
        ));
        if let Some(delta) = self.accuracy_delta {
            md.push_str(&format!(" ({:+.1}%)", delta * 100.0));
        }
        md.push_str("\n\n");

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Question | Answer | Baseline | Current |\n");
            md.push_str("|----------|--------|----------|---------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    c.question_word, c.answer_word, c.baseline, c.current
                ));
            }
            md.push('\n');
        }

        md
    }

    /// True if any question regressed or accuracy fell by more than the threshold.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
            || self
                .accuracy_delta
                .is_some_and(|delta| delta < -self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::summarize;

    fn outcome(question: &str, answer: &str, guessed: Option<&str>) -> Outcome {
        let label = match guessed {
            None => Label::Guess,
            Some(g) if g == answer => Label::Correct,
            Some(_) => Label::Wrong,
        };
        Outcome {
            question_word: question.into(),
            answer_word: answer.into(),
            guessed_word: guessed.map(String::from),
            label,
        }
    }

    fn make_report(model: &str, outcomes: Vec<Outcome>) -> EvalReport {
        EvalReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            dataset: DatasetSummary {
                name: "test".into(),
                row_count: outcomes.len(),
            },
            summary: summarize(model, 100, &outcomes),
            outcomes,
            duration_ms: 0,
        }
    }

    #[test]
    fn compare_identical_reports() {
        let outcomes = vec![
            outcome("car", "auto", Some("auto")),
            outcome("big", "huge", Some("tiny")),
        ];
        let baseline = make_report("m", outcomes.clone());
        let current = make_report("m", outcomes);

        let report = current.compare(&baseline, 0.05);
        assert!(report.regressions.is_empty());
        assert!(report.improvements.is_empty());
        assert_eq!(report.unchanged, 2);
        assert_eq!(report.accuracy_delta, Some(0.0));
        assert!(!report.has_regressions());
    }

    #[test]
    fn compare_with_regression_and_improvement() {
        let baseline = make_report(
            "old",
            vec![
                outcome("car", "auto", Some("auto")),
                outcome("big", "huge", Some("tiny")),
            ],
        );
        let current = make_report(
            "new",
            vec![
                outcome("car", "auto", None),
                outcome("big", "huge", Some("huge")),
            ],
        );

        let report = current.compare(&baseline, 0.05);
        assert_eq!(report.regressions.len(), 1);
        assert_eq!(report.regressions[0].question_word, "car");
        assert_eq!(report.regressions[0].current, Label::Guess);
        assert_eq!(report.improvements.len(), 1);
        assert_eq!(report.improvements[0].question_word, "big");
        assert!(report.has_regressions());
    }

    #[test]
    fn accuracy_drop_beyond_threshold_is_a_regression() {
        let baseline = make_report(
            "m",
            vec![
                outcome("a", "x", Some("x")),
                outcome("b", "x", Some("x")),
            ],
        );
        // Same correct question, but an extra wrong one dilutes accuracy.
        let current = make_report(
            "m",
            vec![
                outcome("a", "x", Some("x")),
                outcome("b", "x", Some("x")),
                outcome("c", "x", Some("y")),
            ],
        );
        let report = current.compare(&baseline, 0.05);
        assert!(report.regressions.is_empty());
        assert_eq!(report.new_questions, 1);
        assert!(report.has_regressions());
        assert!(!current.compare(&baseline, 0.5).has_regressions());
    }

    #[test]
    fn undefined_accuracy_has_no_delta() {
        let baseline = make_report("m", vec![outcome("a", "x", None)]);
        let current = make_report("m", vec![outcome("a", "x", Some("x"))]);
        let report = current.compare(&baseline, 0.05);
        assert_eq!(report.baseline_accuracy, None);
        assert_eq!(report.accuracy_delta, None);
        assert_eq!(report.improvements.len(), 1);
        assert!(!report.has_regressions());
    }

    #[test]
    fn compare_with_new_and_removed() {
        let baseline = make_report("m", vec![outcome("old", "x", Some("x"))]);
        let current = make_report("m", vec![outcome("new", "x", Some("x"))]);

        let report = current.compare(&baseline, 0.05);
        assert_eq!(report.new_questions, 1);
        assert_eq!(report.removed_questions, 1);
    }

    #[test]
    fn label_counts_from_report() {
        let report = make_report(
            "m",
            vec![
                outcome("a", "x", Some("x")),
                outcome("b", "x", Some("y")),
                outcome("c", "x", None),
            ],
        );
        let counts = report.label_counts();
        assert_eq!((counts.correct, counts.wrong, counts.guess), (1, 1, 1));
    }

    #[test]
    fn json_roundtrip_keeps_undefined_accuracy() {
        let report = make_report("m", vec![outcome("a", "x", None)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/report.json");

        report.save_json(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"accuracy\": null"));

        let loaded = EvalReport::load_json(&path).unwrap();
        assert_eq!(loaded.dataset.name, "test");
        assert_eq!(loaded.summary.accuracy, None);
        assert_eq!(loaded.outcomes, report.outcomes);
    }

    #[test]
    fn markdown_output() {
        let baseline = make_report("m", vec![outcome("car", "auto", Some("auto"))]);
        let current = make_report("m", vec![outcome("car", "auto", Some("bus"))]);

        let md = current.compare(&baseline, 0.05).to_markdown();
        assert!(md.contains("Regressions"));
        assert!(md.contains("| car | auto | correct | wrong |"));
        assert!(md.contains("(-100.0%)"));
    }
}
