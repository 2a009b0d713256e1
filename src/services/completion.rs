//! Chat-completion API client
//!
//! Thin wrapper over an OpenAI-compatible chat completion endpoint (Groq).
//! One outbound call per invocation; no retry, no caching.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Completion client errors
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Chat-completion API client
///
/// Built once at startup and shared across handlers; the underlying
/// reqwest::Client pools connections internally.
pub struct CompletionClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Result<Self, CompletionError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Send a single-turn completion request and return the first choice's text
    pub async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        };

        tracing::debug!(model = %self.model, max_tokens, "Requesting completion");

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api(status.as_u16(), error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::MalformedResponse("no choices in response".to_string()))?;

        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CompletionClient::new("https://api.groq.com/openai/v1/", "key", "model");
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_response_decoding() {
        let raw = r#"{"choices":[{"message":{"content":"Score: 7/10"}}]}"#;
        let decoded: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(decoded.choices[0].message.content, "Score: 7/10");
    }

    #[test]
    fn test_request_encoding() {
        let body = ChatRequest {
            model: "llama-3.3-70b-versatile",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            max_tokens: 700,
        };
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(encoded["model"], "llama-3.3-70b-versatile");
        assert_eq!(encoded["messages"][0]["role"], "user");
        assert_eq!(encoded["max_tokens"], 700);
    }
}
