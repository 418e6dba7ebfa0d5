use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Known destination vocabulary used to infer a document's destination
    /// tag from its file name.
    #[serde(default = "default_destinations")]
    pub destinations: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            knowledge: KnowledgeConfig::default(),
            chunking: ChunkingConfig::default(),
            retrieval: RetrievalConfig::default(),
            embedding: EmbeddingConfig::default(),
            destinations: default_destinations(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// SQLite database file holding the persisted index. Parent directories
    /// are created on demand; absence on first run triggers creation.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./data/itinera.sqlite")
}

#[derive(Debug, Deserialize, Clone)]
pub struct KnowledgeConfig {
    /// Directory of UTF-8 text documents. When empty or absent, built-in
    /// default documents are written here before the first ingest.
    #[serde(default = "default_knowledge_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            dir: default_knowledge_dir(),
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
        }
    }
}

fn default_knowledge_dir() -> PathBuf {
    PathBuf::from("./data/travel_knowledge")
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.txt".to_string(), "**/*.md".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    /// Sliding window length in bytes (snapped to UTF-8 boundaries).
    #[serde(default = "default_window_chars")]
    pub window_chars: usize,
    /// Shared span between consecutive chunks of the same document.
    #[serde(default = "default_overlap_chars")]
    pub overlap_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            window_chars: default_window_chars(),
            overlap_chars: default_overlap_chars(),
        }
    }
}

fn default_window_chars() -> usize {
    1000
}

fn default_overlap_chars() -> usize {
    200
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    /// Default number of passages returned by a query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    /// `hash` (offline, deterministic), `openai`, or `disabled`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Remote model name; required for the `openai` provider.
    #[serde(default)]
    pub model: Option<String>,
    /// Embedding dimensionality.
    #[serde(default = "default_dims")]
    pub dims: usize,
    /// Request timeout for remote providers.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            dims: default_dims(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmbeddingConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

fn default_provider() -> String {
    "hash".to_string()
}

fn default_dims() -> usize {
    256
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_destinations() -> Vec<String> {
    [
        "Europe", "Italy", "France", "Paris", "Rome", "Venice", "Florence", "Milan", "Greece",
        "Santorini", "Athens", "Spain", "Barcelona", "Madrid", "London", "Amsterdam", "Japan",
        "Tokyo", "Kyoto", "Bali", "Maldives", "New York", "Thailand", "Bangkok",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Load configuration from a TOML file, falling back to built-in defaults
/// when the file does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")?
    } else {
        Config::default()
    };

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.chunking.window_chars == 0 {
        anyhow::bail!("chunking.window_chars must be > 0");
    }
    if config.chunking.overlap_chars >= config.chunking.window_chars {
        anyhow::bail!("chunking.overlap_chars must be smaller than chunking.window_chars");
    }
    if config.retrieval.top_k < 1 {
        anyhow::bail!("retrieval.top_k must be >= 1");
    }
    if config.embedding.dims == 0 {
        anyhow::bail!("embedding.dims must be > 0");
    }

    match config.embedding.provider.as_str() {
        "hash" | "disabled" => {}
        "openai" => {
            if config.embedding.model.is_none() {
                anyhow::bail!("embedding.model must be specified when provider is 'openai'");
            }
        }
        other => anyhow::bail!(
            "Unknown embedding provider: '{}'. Must be hash, openai, or disabled.",
            other
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
        assert_eq!(config.chunking.window_chars, 1000);
        assert_eq!(config.chunking.overlap_chars, 200);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.embedding.provider, "hash");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/itinera.toml")).unwrap();
        assert_eq!(config.embedding.provider, "hash");
        assert!(config.destinations.iter().any(|d| d == "Italy"));
    }

    #[test]
    fn parses_full_toml() {
        let toml_str = r#"
            destinations = ["Italy", "Iceland"]

            [store]
            path = "/tmp/kb.sqlite"

            [knowledge]
            dir = "/tmp/knowledge"
            include_globs = ["**/*.txt"]

            [chunking]
            window_chars = 800
            overlap_chars = 100

            [retrieval]
            top_k = 5

            [embedding]
            provider = "openai"
            model = "text-embedding-3-small"
            dims = 1536
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(validate(&config).is_ok());
        assert_eq!(config.store.path, PathBuf::from("/tmp/kb.sqlite"));
        assert_eq!(config.chunking.window_chars, 800);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.embedding.dims, 1536);
        assert_eq!(config.destinations, vec!["Italy", "Iceland"]);
    }

    #[test]
    fn rejects_overlap_not_smaller_than_window() {
        let mut config = Config::default();
        config.chunking.overlap_chars = config.chunking.window_chars;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_unknown_provider() {
        let mut config = Config::default();
        config.embedding.provider = "quantum".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn openai_provider_requires_model() {
        let mut config = Config::default();
        config.embedding.provider = "openai".to_string();
        config.embedding.model = None;
        assert!(validate(&config).is_err());
        config.embedding.model = Some("text-embedding-3-small".to_string());
        assert!(validate(&config).is_ok());
    }
}
