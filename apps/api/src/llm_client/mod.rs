//! LLM Client: the single point of entry for text-generation calls.
//!
//! No other module talks to the upstream API directly.
//!
//! Speaks the OpenAI-compatible chat-completions protocol. Every call is a
//! single request: no retries, no streaming, no conversation memory.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{validate_api_key, ConfigError, LlmConfig};

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 200;

/// Upstream text-generation failure.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication rejected by upstream (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Rate limited by upstream: {message}")]
    RateLimited { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl LlmResponse {
    /// Text of the first choice. `None` only when there is no choice or its
    /// content is null; blank text is still an answer.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Wraps the chat-completions endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl LlmClient {
    /// Validates the credential and builds the HTTP client. Fails before any
    /// request is attempted when the key cannot possibly work.
    pub fn new(config: &LlmConfig) -> Result<Self, ConfigError> {
        validate_api_key(&config.api_key)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| http_client_error(config.timeout, e))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes one chat-completion call and returns the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("LLM API returned {status}");
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Unauthorized {
                    status: status.as_u16(),
                    message,
                },
                429 => LlmError::RateLimited { message },
                code => LlmError::Api {
                    status: code,
                    message,
                },
            });
        }

        let body = response.bytes().await?;
        let llm_response: LlmResponse = serde_json::from_slice(&body)?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(llm_response)
    }

    /// Calls the LLM and returns only the generated text.
    pub async fn call_text(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

// The timeout is the only setting handed to the builder, so it is the only
// key a build failure can be blamed on.
fn http_client_error(timeout: Option<Duration>, e: impl std::fmt::Display) -> ConfigError {
    match timeout {
        Some(_) => ConfigError::Invalid {
            key: "LLM_TIMEOUT_SECS",
            reason: format!("could not build HTTP client: {e}"),
        },
        None => ConfigError::HttpClient(e.to_string()),
    }
}
