//! REST client for the OpenAI HTTP endpoints.
//!
//! Wraps the chat completions, moderations, and image generation
//! endpoints using [`reqwest`], and implements the [`crate::provider`]
//! traits on top of the raw calls.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::OpenAiConfig;
use crate::image::IMAGE_MODEL;
use crate::provider::{
    ChatProvider, Completion, ImageProvider, ModerationProvider, ProviderError, TokenUsage,
};

/// HTTP client for the OpenAI API.
pub struct OpenAiApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response returned by the `/chat/completions` endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub content: String,
}

/// Token accounting block on a completion response.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

/// Response returned by the `/moderations` endpoint.
#[derive(Debug, Deserialize)]
pub struct ModerationResponse {
    pub results: Vec<ModerationVerdict>,
}

#[derive(Debug, Deserialize)]
pub struct ModerationVerdict {
    pub flagged: bool,
}

/// Response returned by the `/images/generations` endpoint.
#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    pub data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
pub struct ImageDatum {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl OpenAiApi {
    /// Create a new API client from configuration.
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Request a chat completion for a single user message.
    pub async fn chat_completion(
        &self,
        model: &str,
        prompt: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let body = serde_json::json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": temperature,
            "max_tokens": max_tokens,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Run the moderation endpoint over a piece of text.
    pub async fn moderation(&self, input: &str) -> Result<ModerationResponse, ProviderError> {
        let body = serde_json::json!({ "input": input });

        let response = self
            .client
            .post(format!("{}/moderations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Generate a single image at the given size and quality tier.
    pub async fn image_generation(
        &self,
        model: &str,
        prompt: &str,
        size: &str,
        quality: &str,
    ) -> Result<ImageResponse, ProviderError> {
        let body = serde_json::json!({
            "model": model,
            "prompt": prompt,
            "size": size,
            "quality": quality,
            "n": 1,
        });

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ProviderError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

// ---------------------------------------------------------------------------
// Provider trait implementations
// ---------------------------------------------------------------------------

#[async_trait]
impl ChatProvider for OpenAiApi {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<Completion, ProviderError> {
        let response = self
            .chat_completion(model, prompt, temperature, max_tokens)
            .await?;

        let usage = TokenUsage {
            prompt_tokens: response.usage.prompt_tokens,
            completion_tokens: response.usage.completion_tokens,
            total_tokens: response.usage.total_tokens,
        };
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            ProviderError::Malformed("chat completion returned no choices".to_string())
        })?;

        Ok(Completion {
            content: choice.message.content,
            usage,
        })
    }
}

#[async_trait]
impl ModerationProvider for OpenAiApi {
    async fn moderate(&self, text: &str) -> Result<bool, ProviderError> {
        let response = self.moderation(text).await?;
        let verdict = response.results.first().ok_or_else(|| {
            ProviderError::Malformed("moderation returned no results".to_string())
        })?;
        Ok(verdict.flagged)
    }
}

#[async_trait]
impl ImageProvider for OpenAiApi {
    async fn generate_image(
        &self,
        prompt: &str,
        size: &str,
        quality: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .image_generation(IMAGE_MODEL, prompt, size, quality)
            .await?;
        let datum = response.data.into_iter().next().ok_or_else(|| {
            ProviderError::Malformed("image generation returned no data".to_string())
        })?;
        Ok(datum.url)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_completion_response_parses() {
        let json = r#"{
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "Había una vez..." } }
            ],
            "usage": { "prompt_tokens": 42, "completion_tokens": 310, "total_tokens": 352 }
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Había una vez...");
        assert_eq!(parsed.usage.total_tokens, 352);
    }

    #[test]
    fn moderation_response_parses() {
        let json = r#"{ "results": [ { "flagged": true, "categories": {} } ] }"#;
        let parsed: ModerationResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.results[0].flagged);
    }

    #[test]
    fn image_response_parses() {
        let json = r#"{ "created": 1700000000, "data": [ { "url": "https://img.example/1.png" } ] }"#;
        let parsed: ImageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data[0].url, "https://img.example/1.png");
    }
}
