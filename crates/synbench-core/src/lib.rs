//! synbench-core: Core synonym eval engine, oracle trait, and scoring.
//!
//! This crate defines the data model, the similarity oracle trait, the
//! per-question evaluator and the aggregation logic that the rest of synbench
//! builds on.

pub mod dataset;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod report;
pub mod statistics;
pub mod traits;
