//! synbench CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "synbench",
    version,
    about = "Synonym-question benchmark for word-embedding models"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate models on a synonym dataset
    Run {
        /// Path to the synonym CSV dataset
        #[arg(long)]
        dataset: PathBuf,

        /// Models to evaluate (comma-separated names from the config)
        #[arg(long)]
        models: Option<String>,

        /// Max concurrent evaluation chunks (defaults to the config value)
        #[arg(long)]
        parallelism: Option<usize>,

        /// Output directory (defaults to the config value)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: csv, json, html, all (comma-separated)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two JSON reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Accuracy drop tolerated before the run counts as a regression
        #[arg(long, default_value = "0.05")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate a synonym dataset
    Validate {
        /// Path to the synonym CSV dataset
        #[arg(long)]
        dataset: PathBuf,
    },

    /// List configured models
    ListModels {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample dataset
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "synbench=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            dataset,
            models,
            parallelism,
            output,
            format,
            config,
        } => commands::run::execute(dataset, models, parallelism, output, format, config).await,
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Validate { dataset } => commands::validate::execute(dataset),
        Commands::ListModels { config } => commands::list_models::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
