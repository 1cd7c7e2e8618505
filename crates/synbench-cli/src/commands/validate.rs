//! The `synbench validate` command.

use std::path::PathBuf;

use anyhow::Result;

use synbench_core::dataset::{load_dataset, validate_dataset};

pub fn execute(dataset_path: PathBuf) -> Result<()> {
    let dataset = load_dataset(&dataset_path)?;
    println!("Dataset: {} ({} questions)", dataset.name, dataset.len());

    let warnings = validate_dataset(&dataset);
    for w in &warnings {
        println!("  [row {}] WARNING: {}", w.row, w.message);
    }

    if warnings.is_empty() {
        println!("Dataset valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
