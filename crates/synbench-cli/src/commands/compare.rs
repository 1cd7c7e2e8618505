//! The `synbench compare` command.

use std::path::PathBuf;

use anyhow::Result;

use synbench_core::report::{EvalReport, LabelChange};

fn print_changes(title: &str, changes: &[LabelChange]) {
    if changes.is_empty() {
        return;
    }
    println!("\n{title}:");
    for c in changes {
        println!(
            "  {} -> {}: {} -> {}",
            c.question_word, c.answer_word, c.baseline, c.current
        );
    }
}

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    anyhow::ensure!(threshold >= 0.0, "threshold must not be negative");

    let baseline = EvalReport::load_json(&baseline_path)?;
    let current = EvalReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            let delta = report
                .accuracy_delta
                .map(|d| format!(" ({:+.1}%)", d * 100.0))
                .unwrap_or_default();
            println!(
                "Accuracy: {} -> {}{}",
                baseline.summary.accuracy_display(),
                current.summary.accuracy_display(),
                delta
            );
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            print_changes("Regressions", &report.regressions);
            print_changes("Improvements", &report.improvements);

            if report.new_questions > 0 {
                println!("\n{} new question(s)", report.new_questions);
            }
            if report.removed_questions > 0 {
                println!("{} removed question(s)", report.removed_questions);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
