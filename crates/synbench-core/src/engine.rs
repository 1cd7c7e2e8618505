//! Central eval engine orchestrator.
//!
//! Runs a dataset against one oracle, fanning contiguous chunks of questions
//! out to blocking worker tasks and reassembling the outcomes in dataset
//! order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use futures::stream::{FuturesOrdered, StreamExt};
use uuid::Uuid;

use crate::dataset::Dataset;
use crate::evaluator::run_evaluation;
use crate::model::Summary;
use crate::report::{DatasetSummary, EvalReport};
use crate::statistics::summarize;
use crate::traits::SimilarityOracle;

/// Configuration for the eval engine.
#[derive(Debug, Clone)]
pub struct EvalEngineConfig {
    /// Maximum number of chunks evaluated concurrently.
    pub parallelism: usize,
}

impl Default for EvalEngineConfig {
    fn default() -> Self {
        Self { parallelism: 4 }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_model_start(&self, model: &str, vocabulary_size: u64, questions: usize);
    fn on_chunk_complete(&self, model: &str, evaluated: usize, total: usize);
    fn on_model_complete(&self, summary: &Summary, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_model_start(&self, _: &str, _: u64, _: usize) {}
    fn on_chunk_complete(&self, _: &str, _: usize, _: usize) {}
    fn on_model_complete(&self, _: &Summary, _: Duration) {}
}

/// The central eval engine.
pub struct EvalEngine {
    oracle: Arc<dyn SimilarityOracle>,
    config: EvalEngineConfig,
}

impl EvalEngine {
    pub fn new(oracle: Arc<dyn SimilarityOracle>, config: EvalEngineConfig) -> Self {
        Self { oracle, config }
    }

    /// Evaluate every question in `dataset` and summarize the run.
    ///
    /// The outcome order always matches the dataset order, whatever the
    /// parallelism. Any oracle failure aborts the whole run.
    pub async fn run(
        &self,
        dataset: &Dataset,
        progress: &dyn ProgressReporter,
    ) -> Result<EvalReport> {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let info = self.oracle.info();
        let total = dataset.len();

        progress.on_model_start(&info.name, info.vocabulary_size, total);
        tracing::info!(
            "evaluating {} questions from '{}' against {} ({} words)",
            total,
            dataset.name,
            info.name,
            info.vocabulary_size
        );

        let parallelism = self.config.parallelism.max(1);
        let outcomes = if parallelism == 1 || total < 2 {
            let outcomes = run_evaluation(&dataset.records, self.oracle.as_ref())?;
            progress.on_chunk_complete(&info.name, outcomes.len(), total);
            outcomes
        } else {
            let chunk_size = total.div_ceil(parallelism);
            let mut tasks: FuturesOrdered<_> = dataset
                .records
                .chunks(chunk_size)
                .map(|chunk| {
                    let chunk = chunk.to_vec();
                    let oracle = Arc::clone(&self.oracle);
                    tokio::task::spawn_blocking(move || run_evaluation(&chunk, oracle.as_ref()))
                })
                .collect();

            let mut outcomes = Vec::with_capacity(total);
            while let Some(joined) = tasks.next().await {
                let chunk = joined.context("evaluation task panicked")??;
                outcomes.extend(chunk);
                progress.on_chunk_complete(&info.name, outcomes.len(), total);
            }
            outcomes
        };

        let summary = summarize(&info.name, info.vocabulary_size, &outcomes);
        let elapsed = start.elapsed();
        progress.on_model_complete(&summary, elapsed);
        tracing::info!(
            "{}: {}/{} correct over scored questions, accuracy {}",
            summary.model_name,
            summary.correct_count,
            summary.scored_count,
            summary.accuracy_display()
        );

        Ok(EvalReport {
            id: run_id,
            created_at: chrono::Utc::now(),
            dataset: DatasetSummary {
                name: dataset.name.clone(),
                row_count: total,
            },
            summary,
            outcomes,
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}
