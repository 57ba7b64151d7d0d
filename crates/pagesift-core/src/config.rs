use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SiftError;
use crate::types::Distance;

/// Environment variable consulted when `[embedding].api_key` is unset.
pub const EMBED_API_KEY_ENV: &str = "PAGESIFT_EMBED_API_KEY";

/// Top-level configuration loaded from `.pagesift.toml`.
///
/// Supports layered resolution: CLI flags > env vars > local config > defaults.
///
/// # Examples
///
/// ```
/// use pagesift_core::SiftConfig;
///
/// let config = SiftConfig::default();
/// assert_eq!(config.ingest.max_words, 300);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiftConfig {
    /// Export ingestion and chunking settings.
    #[serde(default)]
    pub ingest: IngestConfig,
    /// Search index settings.
    #[serde(default)]
    pub index: IndexConfig,
    /// Embedding endpoint settings.
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

impl SiftConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Io`] if the file cannot be read, or
    /// [`SiftError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pagesift_core::SiftConfig;
    /// use std::path::Path;
    ///
    /// let config = SiftConfig::from_file(Path::new(".pagesift.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, SiftError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagesift_core::SiftConfig;
    ///
    /// let toml = r#"
    /// [ingest]
    /// max_words = 200
    /// "#;
    /// let config = SiftConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.ingest.max_words, 200);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, SiftError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Export ingestion and chunking configuration.
///
/// # Examples
///
/// ```
/// use pagesift_core::IngestConfig;
///
/// let config = IngestConfig::default();
/// assert_eq!(config.max_words, 300);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Root of the exported page tree (default: `"notion_export"`).
    #[serde(default = "default_folder")]
    pub folder: PathBuf,
    /// Where chunk records are written (default: `"chunks.jsonl"`).
    #[serde(default = "default_chunks_path")]
    pub chunks_path: PathBuf,
    /// Word-count threshold that triggers a chunk flush (default: 300).
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

fn default_folder() -> PathBuf {
    PathBuf::from("notion_export")
}

fn default_chunks_path() -> PathBuf {
    PathBuf::from("chunks.jsonl")
}

fn default_max_words() -> usize {
    300
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            chunks_path: default_chunks_path(),
            max_words: default_max_words(),
        }
    }
}

/// Search index configuration.
///
/// # Examples
///
/// ```
/// use pagesift_core::{Distance, IndexConfig};
///
/// let config = IndexConfig::default();
/// assert_eq!(config.dimensions, 384);
/// assert_eq!(config.distance, Distance::Cosine);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// SQLite database path (default: `".pagesift/index.db"`).
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Distance convention, pinned into the index at creation.
    #[serde(default)]
    pub distance: Distance,
    /// Embedding dimensions (default: 384).
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(".pagesift/index.db")
}

fn default_dimensions() -> usize {
    384
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            distance: Distance::default(),
            dimensions: default_dimensions(),
        }
    }
}

/// Configuration for the embedding endpoint.
///
/// The endpoint is any OpenAI-compatible `/embeddings` server; the default
/// points at a local one, which needs no API key.
///
/// # Examples
///
/// ```
/// use pagesift_core::EmbeddingConfig;
///
/// let config = EmbeddingConfig::default();
/// assert_eq!(config.model, "all-MiniLM-L6-v2");
/// assert_eq!(config.base_url, "http://localhost:8080/v1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model name (default: `"all-MiniLM-L6-v2"`).
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Base URL of the embeddings API (default: `"http://localhost:8080/v1"`).
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,
    /// API key; falls back to the `PAGESIFT_EMBED_API_KEY` env var, and may
    /// be absent entirely for local servers.
    pub api_key: Option<String>,
}

fn default_embedding_model() -> String {
    "all-MiniLM-L6-v2".into()
}

fn default_embedding_base_url() -> String {
    "http://localhost:8080/v1".into()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
            base_url: default_embedding_base_url(),
            api_key: None,
        }
    }
}
