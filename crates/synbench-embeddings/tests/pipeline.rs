//! Evaluator pipeline tests against the mock and file-backed oracles.
//!
//! These exercise the full load -> evaluate -> summarize chain the CLI uses,
//! without going through the binary.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use synbench_core::dataset::parse_dataset_str;
use synbench_core::engine::{EvalEngine, EvalEngineConfig, NoopReporter};
use synbench_core::evaluator::{evaluate, run_evaluation};
use synbench_core::model::{Label, QuestionRecord};
use synbench_core::statistics::summarize;
use synbench_core::traits::SimilarityOracle;
use synbench_embeddings::mock::MockOracle;
use synbench_embeddings::vectors::read_word2vec_text;

fn car_oracle() -> MockOracle {
    MockOracle::new(&["car", "automobile", "bicycle", "truck"])
        .with_name("cars")
        .with_score("car", "automobile", 0.9)
        .with_score("car", "bicycle", 0.3)
        .with_score("car", "truck", 0.6)
}

const CANDIDATES: [&str; 4] = ["automobile", "bicycle", "truck", "submarine"];

#[test]
fn scenario_correct_pick() {
    let record = QuestionRecord::new("car", "automobile", CANDIDATES);
    let outcome = evaluate(&record, &car_oracle()).unwrap();
    assert_eq!(outcome.guessed_word.as_deref(), Some("automobile"));
    assert_eq!(outcome.label, Label::Correct);
}

#[test]
fn scenario_wrong_pick() {
    let record = QuestionRecord::new("car", "bicycle", CANDIDATES);
    let outcome = evaluate(&record, &car_oracle()).unwrap();
    assert_eq!(outcome.guessed_word.as_deref(), Some("automobile"));
    assert_eq!(outcome.label, Label::Wrong);
}

#[test]
fn scenario_unknown_question_word() {
    let oracle = car_oracle();
    let record = QuestionRecord::new("xyzzy", "automobile", CANDIDATES);
    let outcome = evaluate(&record, &oracle).unwrap();
    assert_eq!(outcome.label, Label::Guess);
    assert!(outcome.guessed_word.is_none());
    assert_eq!(oracle.call_count(), 0, "no scoring for unknown question words");
}

#[test]
fn unknown_candidates_are_never_scored() {
    let oracle = car_oracle();
    let record = QuestionRecord::new("car", "automobile", CANDIDATES);
    evaluate(&record, &oracle).unwrap();
    // "submarine" is filtered out before scoring.
    assert_eq!(oracle.call_count(), 3);
}

#[test]
fn outage_mid_run_fails_without_partial_results() {
    let oracle = car_oracle();
    let records = vec![
        QuestionRecord::new("car", "automobile", CANDIDATES),
        QuestionRecord::new("car", "truck", CANDIDATES),
    ];
    assert_eq!(run_evaluation(&records, &oracle).unwrap().len(), 2);

    oracle.set_unavailable(true);
    assert!(run_evaluation(&records, &oracle).is_err());
}

#[tokio::test]
async fn dataset_through_engine_with_word_vectors() {
    let vectors = "\
5 3
car 1.0 0.0 0.0
automobile 0.95 0.05 0.0
bicycle 0.2 0.9 0.1
truck 0.7 0.0 0.6
big 0.0 0.0 1.0
";
    let dataset = parse_dataset_str(
        "question,answer,0,1,2,3\n\
         car,automobile,automobile,bicycle,truck,submarine\n\
         car,truck,automobile,bicycle,truck,submarine\n\
         xyzzy,automobile,automobile,bicycle,truck,submarine\n\
         big,large,large,huge,vast,enormous\n",
        Path::new("mini.csv"),
    )
    .unwrap();

    let oracle: Arc<dyn SimilarityOracle> =
        Arc::new(read_word2vec_text("mini-vectors", Cursor::new(vectors), None).unwrap());
    let engine = EvalEngine::new(Arc::clone(&oracle), EvalEngineConfig { parallelism: 2 });
    let report = engine.run(&dataset, &NoopReporter).await.unwrap();

    let labels: Vec<Label> = report.outcomes.iter().map(|o| o.label).collect();
    assert_eq!(
        labels,
        vec![Label::Correct, Label::Wrong, Label::Guess, Label::Guess]
    );
    assert_eq!(report.summary.vocabulary_size, 5);
    assert_eq!(report.summary.scored_count, 2);
    assert_eq!(report.summary.correct_count, 1);
    assert_eq!(report.summary.accuracy, Some(0.5));

    let outcomes = run_evaluation(&dataset.records, oracle.as_ref()).unwrap();
    let direct = summarize("mini-vectors", 5, &outcomes);
    assert_eq!(direct, report.summary);
}
