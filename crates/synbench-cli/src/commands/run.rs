//! The `synbench run` command.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use synbench_core::dataset::load_dataset;
use synbench_core::engine::{EvalEngine, EvalEngineConfig, ProgressReporter};
use synbench_core::model::Summary;
use synbench_core::report::EvalReport;
use synbench_embeddings::config::{load_config_from, load_oracle};
use synbench_report::html::write_html_report;
use synbench_report::tables::{append_summary_csv, write_details_csv};

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_model_start(&self, model: &str, vocabulary_size: u64, questions: usize) {
        eprintln!("  Starting: {model} ({vocabulary_size} words) on {questions} questions");
    }

    fn on_chunk_complete(&self, model: &str, evaluated: usize, total: usize) {
        eprintln!("  {model}: {evaluated}/{total} evaluated");
    }

    fn on_model_complete(&self, summary: &Summary, elapsed: Duration) {
        eprintln!(
            "  Done: {} {}/{} correct, accuracy {} ({:.1}s)",
            summary.model_name,
            summary.correct_count,
            summary.scored_count,
            summary.accuracy_display(),
            elapsed.as_secs_f64()
        );
    }
}

/// Which optional outputs to write besides the CSV tables.
#[derive(Debug, Default, PartialEq)]
struct Outputs {
    json: bool,
    html: bool,
}

fn parse_formats(format: &str) -> Result<Outputs> {
    let mut outputs = Outputs::default();
    for fmt in format.split(',').map(str::trim) {
        match fmt {
            "csv" => {}
            "json" => outputs.json = true,
            "html" => outputs.html = true,
            "all" => {
                outputs.json = true;
                outputs.html = true;
            }
            other => {
                anyhow::bail!("unknown output format: '{other}' (expected csv, json, html, all)")
            }
        }
    }
    Ok(outputs)
}

/// Make a model name safe to use as a file name prefix.
fn file_stem(model: &str) -> String {
    model
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub async fn execute(
    dataset_path: PathBuf,
    models_str: Option<String>,
    parallelism: Option<usize>,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let outputs = parse_formats(&format)?;
    let config = load_config_from(config_path.as_deref())?;

    let parallelism = parallelism.unwrap_or(config.parallelism);
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let models: Vec<String> = match &models_str {
        Some(m) => m
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => vec![config.default_model.clone()],
    };
    anyhow::ensure!(!models.is_empty(), "no models given");

    // Fail on an unknown model before loading anything large
    for model in &models {
        if !config.models.contains_key(model) {
            anyhow::bail!(
                "model '{}' not found in config. Available: {:?}",
                model,
                config.models.keys().collect::<Vec<_>>()
            );
        }
    }

    let dataset = load_dataset(&dataset_path)?;

    eprintln!(
        "synbench v{} - Evaluating {} questions x {} models",
        env!("CARGO_PKG_VERSION"),
        dataset.len(),
        models.len()
    );
    eprintln!();

    let reporter = ConsoleReporter;
    let mut reports = Vec::with_capacity(models.len());

    for model in &models {
        let model_config = &config.models[model];
        let oracle = load_oracle(model, model_config)?;
        let engine = EvalEngine::new(oracle, EvalEngineConfig { parallelism });

        let report = engine
            .run(&dataset, &reporter)
            .await
            .with_context(|| format!("evaluation of model '{model}' failed"))?;
        reports.push(report);
    }

    print_summary(&reports);

    // Nothing is written until every model has been evaluated
    std::fs::create_dir_all(&output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?;
    // Summary rows first, so an incompatible analysis.csv aborts before any other write
    let analysis = output.join("analysis.csv");
    for report in &reports {
        append_summary_csv(&report.summary, &analysis)?;
    }
    tracing::debug!("appended {} summary rows to {}", reports.len(), analysis.display());
    for report in &reports {
        save_model_outputs(report, &output, outputs.json)?;
    }

    if outputs.html {
        let path = output.join("report.html");
        write_html_report(&reports, &path)?;
        eprintln!("HTML report: {}", path.display());
    }

    Ok(())
}

fn save_model_outputs(report: &EvalReport, output: &Path, json: bool) -> Result<()> {
    let stem = file_stem(&report.summary.model_name);

    let details = output.join(format!("{stem}-details.csv"));
    write_details_csv(report, &details)?;
    eprintln!("Details saved to: {}", details.display());

    if json {
        let path = output.join(format!("{stem}-report.json"));
        report.save_json(&path)?;
        eprintln!("Results saved to: {}", path.display());
    }
    Ok(())
}

fn print_summary(reports: &[EvalReport]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Model",
        "Vocabulary",
        "Correct",
        "Scored",
        "Guesses",
        "Accuracy",
    ]);

    for report in reports {
        let s = &report.summary;
        table.add_row(vec![
            Cell::new(&s.model_name),
            Cell::new(s.vocabulary_size),
            Cell::new(s.correct_count),
            Cell::new(s.scored_count),
            Cell::new(report.label_counts().guess),
            Cell::new(s.accuracy_display()),
        ]);
    }

    eprintln!("\n{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse() {
        assert_eq!(parse_formats("csv").unwrap(), Outputs::default());
        assert_eq!(
            parse_formats("csv,json").unwrap(),
            Outputs {
                json: true,
                html: false
            }
        );
        assert_eq!(
            parse_formats("all").unwrap(),
            Outputs {
                json: true,
                html: true
            }
        );
        assert!(parse_formats("parquet").is_err());
    }

    #[test]
    fn file_stem_replaces_separators() {
        assert_eq!(file_stem("word2vec-google-news-300"), "word2vec-google-news-300");
        assert_eq!(file_stem("glove/6B 300d"), "glove_6B_300d");
    }
}
