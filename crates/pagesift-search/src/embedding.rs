//! OpenAI-compatible embeddings API client.
//!
//! Works against any server exposing `POST {base_url}/embeddings` with the
//! OpenAI request/response shape — a local text-embeddings server by default.

use async_trait::async_trait;
use pagesift_core::{EmbeddingConfig, SiftError, EMBED_API_KEY_ENV};
use serde::{Deserialize, Serialize};

const BATCH_SIZE: usize = 64;
const BATCH_DELAY_MS: u64 = 200;

/// Anything that can turn text into embedding vectors.
///
/// The retrieval façade takes this trait so tests can inject deterministic
/// embedders instead of a live HTTP endpoint.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts. Returns vectors in the same order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, SiftError>;

    /// Embed a single query string.
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, SiftError>;
}

/// HTTP client for an OpenAI-compatible embeddings endpoint.
///
/// # Examples
///
/// ```
/// use pagesift_search::EmbeddingClient;
///
/// let client = EmbeddingClient::new("http://localhost:8080/v1", "all-MiniLM-L6-v2");
/// assert_eq!(client.model(), "all-MiniLM-L6-v2");
/// ```
pub struct EmbeddingClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for EmbeddingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedDataItem>,
}

#[derive(Deserialize)]
struct EmbedDataItem {
    embedding: Vec<f32>,
}

impl EmbeddingClient {
    /// Create a client for `base_url` (without the `/embeddings` suffix).
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
        }
    }

    /// Create a client from an [`EmbeddingConfig`].
    ///
    /// Falls back to the `PAGESIFT_EMBED_API_KEY` env var when the config has
    /// no key; a missing key is fine for local servers, the `Authorization`
    /// header is simply omitted.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagesift_core::EmbeddingConfig;
    /// use pagesift_search::EmbeddingClient;
    ///
    /// let client = EmbeddingClient::with_config(&EmbeddingConfig::default());
    /// assert_eq!(client.model(), "all-MiniLM-L6-v2");
    /// ```
    pub fn with_config(config: &EmbeddingConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(EMBED_API_KEY_ENV).ok());

        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        }
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, SiftError> {
        let request = EmbedRequest {
            model: self.model.clone(),
            input,
        };

        let mut builder = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SiftError::Embedding(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".into());
            return Err(SiftError::Embedding(format!(
                "embeddings API returned {status}: {body}"
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| SiftError::Embedding(format!("failed to parse response: {e}")))?;

        Ok(embed_response
            .data
            .into_iter()
            .map(|item| item.embedding)
            .collect())
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    /// Embed a batch of texts, split into sub-batches of 64 with 200ms
    /// delays for rate limiting.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, SiftError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_embeddings = Vec::with_capacity(texts.len());
        for (i, batch) in texts.chunks(BATCH_SIZE).enumerate() {
            if i > 0 {
                tokio::time::sleep(tokio::time::Duration::from_millis(BATCH_DELAY_MS)).await;
            }
            let embeddings = self.request(batch.to_vec()).await?;
            if embeddings.len() != batch.len() {
                return Err(SiftError::Embedding(format!(
                    "API returned {} embeddings for {} inputs",
                    embeddings.len(),
                    batch.len()
                )));
            }
            all_embeddings.extend(embeddings);
        }

        Ok(all_embeddings)
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, SiftError> {
        let mut embeddings = self.request(vec![query.to_string()]).await?;
        if embeddings.is_empty() {
            return Err(SiftError::Embedding(
                "API returned no embedding for query".into(),
            ));
        }
        Ok(embeddings.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let client = EmbeddingClient::new("http://localhost:8080/v1/", "m");
        assert_eq!(client.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn with_config_prefers_configured_key() {
        let config = EmbeddingConfig {
            api_key: Some("from-config".into()),
            ..EmbeddingConfig::default()
        };
        let client = EmbeddingClient::with_config(&config);
        assert_eq!(client.api_key.as_deref(), Some("from-config"));
    }

    #[test]
    fn request_serializes_openai_shape() {
        let request = EmbedRequest {
            model: "all-MiniLM-L6-v2".into(),
            input: vec!["hello".into()],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "all-MiniLM-L6-v2");
        assert_eq!(json["input"][0], "hello");
    }

    #[test]
    fn response_parses_openai_shape() {
        let body = r#"{"data":[{"embedding":[0.1,0.2]},{"embedding":[0.3,0.4]}]}"#;
        let response: EmbedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[1].embedding, vec![0.3, 0.4]);
    }
}
