//! Chat-completion client for OpenAI-compatible and Ollama endpoints

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::ChatMessage;
use super::ChatModel;
use super::ChatRequest;
use crate::config::LlmConfig;
use crate::config::Provider;
use crate::errors::RagError;
use crate::errors::Result;

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: ResponseMessage,
}

/// Client for a remote chat-completion model
pub struct LlmClient {
    provider: Provider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl LlmClient {
    pub fn new(
        provider: Provider,
        model: String,
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            provider,
            model,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Create from the `[llm]` config section
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        Self::new(
            config.provider,
            config.model.clone(),
            config.endpoint.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    async fn complete_openai(&self, request: &ChatRequest) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| RagError::ConfigError("OpenAI API key not provided".to_string()))?;

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling OpenAI chat API: {} (model {})", url, self.model);

        let body = OpenAIChatRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RagError::LlmError(format!(
                "OpenAI API error ({status}): {error_text}"
            )));
        }

        parse_openai_response(&response.text().await?)
    }

    async fn complete_ollama(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/api/chat", self.endpoint);
        debug!("Calling Ollama chat API: {} (model {})", url, self.model);

        let body = OllamaChatRequest {
            model: &self.model,
            messages: &request.messages,
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RagError::LlmError(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| RagError::LlmError(format!("Failed to parse response: {e}")))?;

        result
            .message
            .content
            .ok_or_else(|| RagError::LlmError("Empty message in response".to_string()))
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        match self.provider {
            Provider::OpenAI => self.complete_openai(request).await,
            Provider::Ollama => self.complete_ollama(request).await,
        }
    }
}

fn parse_openai_response(body: &str) -> Result<String> {
    let result: OpenAIChatResponse = serde_json::from_str(body)
        .map_err(|e| RagError::LlmError(format!("Failed to parse response: {e}")))?;

    result
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| RagError::LlmError("No choices in response".to_string()))
}
