//! Embedding API client for OpenAI-compatible and Ollama endpoints

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::Embedder;
use crate::config::EmbeddingsConfig;
use crate::config::Provider;
use crate::errors::RagError;
use crate::errors::Result;

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct OllamaResponse {
    embedding: Vec<f32>,
}

/// Client for generating embeddings from a remote model
pub struct EmbeddingClient {
    provider: Provider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    dimension: usize,
    client: Client,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(
        provider: Provider,
        model: String,
        endpoint: String,
        api_key: Option<String>,
        dimension: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            provider,
            model,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            dimension,
            client,
        })
    }

    /// Create from the `[embeddings]` config section
    pub fn from_config(config: &EmbeddingsConfig) -> Result<Self> {
        Self::new(
            config.provider,
            config.model.clone(),
            config.endpoint.clone(),
            config.api_key.clone(),
            config.dimension,
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Generate embedding for a single text
    ///
    /// # Errors
    /// - Empty input text
    /// - API request failures (network errors, timeouts, authentication failures)
    /// - Invalid API responses (malformed JSON, wrong embedding dimensions)
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Err(RagError::EmbeddingError("Cannot embed empty text".to_string()));
        }

        let embedding = match self.provider {
            Provider::OpenAI => self.generate_openai(text).await?,
            Provider::Ollama => self.generate_ollama(text).await?,
        };

        check_dimension(self.dimension, embedding)
    }

    /// Generate embedding using `OpenAI` API
    async fn generate_openai(&self, text: &str) -> Result<Vec<f32>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| RagError::ConfigError("OpenAI API key not provided".to_string()))?;

        let url = format!("{}/embeddings", self.endpoint);
        debug!("Calling OpenAI embeddings API: {}", url);

        let request = OpenAIRequest {
            input: text,
            model: &self.model,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagError::EmbeddingError(format!(
                "OpenAI API error ({status}): {error_text}"
            )));
        }

        let body = response.text().await?;
        parse_openai_response(&body)
    }

    /// Generate embedding using Ollama API
    async fn generate_ollama(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.endpoint);
        debug!("Calling Ollama embeddings API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagError::EmbeddingError(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| RagError::EmbeddingError(format!("Failed to parse response: {e}")))?;

        Ok(result.embedding)
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.generate(text).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn parse_openai_response(body: &str) -> Result<Vec<f32>> {
    let result: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| RagError::EmbeddingError(format!("Failed to parse response: {e}")))?;

    result
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or_else(|| RagError::EmbeddingError("No embedding in response".to_string()))
}

/// Reject vectors that would not fit the backend's column width
pub(crate) fn check_dimension(expected: usize, embedding: Vec<f32>) -> Result<Vec<f32>> {
    if embedding.len() == expected {
        Ok(embedding)
    } else {
        Err(RagError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(provider: Provider, api_key: Option<&str>) -> EmbeddingClient {
        EmbeddingClient::new(
            provider,
            "text-embedding-ada-002".to_string(),
            "http://localhost:1/v1/".to_string(),
            api_key.map(str::to_string),
            3,
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_openai_response() {
        let body = r#"{"object":"list","data":[{"object":"embedding","index":0,"embedding":[0.1,0.2,0.3]}],"model":"text-embedding-ada-002"}"#;
        assert_eq!(parse_openai_response(body).unwrap(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_parse_openai_response_without_data() {
        let err = parse_openai_response(r#"{"data":[]}"#).unwrap_err();
        assert!(err.to_string().contains("No embedding"));
    }

    #[test]
    fn test_check_dimension() {
        assert!(check_dimension(3, vec![1.0, 2.0, 3.0]).is_ok());
        assert!(matches!(
            check_dimension(3, vec![1.0]),
            Err(RagError::DimensionMismatch {
                expected: 3,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let client = client(Provider::Ollama, None);
        assert_eq!(client.endpoint, "http://localhost:1/v1");
        assert_eq!(client.dimension(), 3);
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_request() {
        let client = client(Provider::Ollama, None);
        let err = client.embed("").await.unwrap_err();
        assert!(matches!(err, RagError::EmbeddingError(_)));
    }

    #[tokio::test]
    async fn test_openai_without_key_is_config_error() {
        let client = client(Provider::OpenAI, None);
        let err = client.embed("hello").await.unwrap_err();
        assert!(matches!(err, RagError::ConfigError(_)));
    }

    #[tokio::test]
    #[ignore = "Requires API key"]
    async fn test_openai_embedding() {
        let client = EmbeddingClient::new(
            Provider::OpenAI,
            "text-embedding-ada-002".to_string(),
            "https://api.openai.com/v1".to_string(),
            std::env::var("OPENAI_API_KEY").ok(),
            1536,
            Duration::from_secs(30),
        )
        .unwrap();

        let embedding = client.embed("Hello, world!").await.unwrap();
        assert_eq!(embedding.len(), 1536);
    }
}
