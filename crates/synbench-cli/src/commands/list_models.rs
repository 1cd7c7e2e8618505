//! The `synbench list-models` command.

use std::path::PathBuf;

use anyhow::Result;

use synbench_embeddings::config::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    if config.models.is_empty() {
        println!("No models configured. Run `synbench init` to create a config file.");
        return Ok(());
    }

    for (name, model) in &config.models {
        let marker = if *name == config.default_model {
            " (default)"
        } else {
            ""
        };
        let limit = model
            .limit()
            .map(|l| format!(", first {l} words"))
            .unwrap_or_default();
        println!(
            "{name}{marker}: {} {}{limit}",
            model.format_name(),
            model.path()
        );
    }

    Ok(())
}
