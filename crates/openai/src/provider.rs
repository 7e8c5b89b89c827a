//! Provider traits consumed by the generators.
//!
//! The traits mirror the three upstream collaborator interfaces: chat
//! completion, content moderation, and image generation. Production code
//! uses [`crate::api::OpenAiApi`] for all three; tests substitute fakes.

use async_trait::async_trait;

/// Errors surfaced by a provider call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("provider error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider returned a 2xx response missing expected fields.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Token usage reported by a completion call.
#[derive(Debug, Clone, Copy)]
pub struct TokenUsage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

/// A successful completion: the generated text plus its token usage.
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub usage: TokenUsage,
}

/// Chat-completion provider.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<Completion, ProviderError>;
}

/// Content moderation provider. Returns whether the text was flagged.
#[async_trait]
pub trait ModerationProvider: Send + Sync {
    async fn moderate(&self, text: &str) -> Result<bool, ProviderError>;
}

/// Image generation provider. Returns the URL of the generated image.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate_image(
        &self,
        prompt: &str,
        size: &str,
        quality: &str,
    ) -> Result<String, ProviderError>;
}
