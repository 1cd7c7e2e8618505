//! Model configuration and oracle factory.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use synbench_core::traits::SimilarityOracle;

use crate::vectors::{read_glove_text, read_word2vec_binary, read_word2vec_text, WordVectors};

/// Where a pretrained model lives and how it is encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "kebab-case")]
pub enum ModelConfig {
    /// Original word2vec `.bin` layout.
    Word2vecBinary {
        path: String,
        #[serde(default)]
        limit: Option<usize>,
    },
    /// word2vec text layout with a count/dimension header.
    Word2vecText {
        path: String,
        #[serde(default)]
        limit: Option<usize>,
    },
    /// Headerless GloVe text layout.
    Glove {
        path: String,
        #[serde(default)]
        limit: Option<usize>,
    },
}

impl ModelConfig {
    pub fn path(&self) -> &str {
        match self {
            ModelConfig::Word2vecBinary { path, .. }
            | ModelConfig::Word2vecText { path, .. }
            | ModelConfig::Glove { path, .. } => path,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        match self {
            ModelConfig::Word2vecBinary { limit, .. }
            | ModelConfig::Word2vecText { limit, .. }
            | ModelConfig::Glove { limit, .. } => *limit,
        }
    }

    /// The `format` tag as written in the config file.
    pub fn format_name(&self) -> &'static str {
        match self {
            ModelConfig::Word2vecBinary { .. } => "word2vec-binary",
            ModelConfig::Word2vecText { .. } => "word2vec-text",
            ModelConfig::Glove { .. } => "glove",
        }
    }

    fn with_path(&self, path: String) -> Self {
        let limit = self.limit();
        match self {
            ModelConfig::Word2vecBinary { .. } => ModelConfig::Word2vecBinary { path, limit },
            ModelConfig::Word2vecText { .. } => ModelConfig::Word2vecText { path, limit },
            ModelConfig::Glove { .. } => ModelConfig::Glove { path, limit },
        }
    }
}

/// Top-level synbench configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynbenchConfig {
    /// Model configurations keyed by name.
    #[serde(default)]
    pub models: BTreeMap<String, ModelConfig>,
    /// Model used when `--models` is not given.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Max concurrent evaluation chunks.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Output directory for results.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_model() -> String {
    "word2vec-google-news-300".to_string()
}
fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./synbench-results")
}

impl Default for SynbenchConfig {
    fn default() -> Self {
        Self {
            models: BTreeMap::new(),
            default_model: default_model(),
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `synbench.toml` in the current directory
/// 2. `~/.config/synbench/config.toml`
///
/// Environment variable overrides: `SYNBENCH_OUTPUT_DIR`, `SYNBENCH_PARALLELISM`.
pub fn load_config() -> Result<SynbenchConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<SynbenchConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("synbench.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<SynbenchConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => SynbenchConfig::default(),
    };

    // Apply env var overrides
    if let Ok(dir) = std::env::var("SYNBENCH_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Ok(value) = std::env::var("SYNBENCH_PARALLELISM") {
        config.parallelism = value
            .trim()
            .parse()
            .with_context(|| format!("invalid SYNBENCH_PARALLELISM: '{value}'"))?;
    }

    // Resolve env vars and make relative model paths relative to the config file
    let base_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf);
    config.models = config
        .models
        .iter()
        .map(|(name, model)| {
            let resolved = resolve_env_vars(model.path());
            let path = match &base_dir {
                Some(base) if Path::new(&resolved).is_relative() => {
                    base.join(&resolved).to_string_lossy().into_owned()
                }
                _ => resolved,
            };
            (name.clone(), model.with_path(path))
        })
        .collect();

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("synbench"))
}

/// Load a configured model into memory as a similarity oracle.
pub fn load_oracle(name: &str, config: &ModelConfig) -> Result<Arc<dyn SimilarityOracle>> {
    let vectors = load_vectors(name, config)?;
    Ok(Arc::new(vectors))
}

/// Load a configured model into a concrete [`WordVectors`] table.
pub fn load_vectors(name: &str, config: &ModelConfig) -> Result<WordVectors> {
    let path = Path::new(config.path());
    let file = File::open(path)
        .with_context(|| format!("failed to open model '{name}': {}", path.display()))?;
    let reader = BufReader::with_capacity(1 << 20, file);

    tracing::info!(
        "loading {} model '{}' from {}",
        config.format_name(),
        name,
        path.display()
    );
    let start = Instant::now();

    let vectors = match config {
        ModelConfig::Word2vecBinary { limit, .. } => read_word2vec_binary(name, reader, *limit),
        ModelConfig::Word2vecText { limit, .. } => read_word2vec_text(name, reader, *limit),
        ModelConfig::Glove { limit, .. } => read_glove_text(name, reader, *limit),
    }
    .with_context(|| format!("failed to load model '{name}' from {}", path.display()))?;

    tracing::info!(
        "loaded '{}': {} words x {} dims in {:.1}s",
        name,
        vectors.len(),
        vectors.dim(),
        start.elapsed().as_secs_f64()
    );

    Ok(vectors)
}
