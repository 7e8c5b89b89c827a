//! Story text generation with moderation gating and model fallback.
//!
//! [`StoryGenerator`] tries each configured model in order, bounded by a
//! per-attempt timeout, and returns the first completion that passes
//! output moderation. The prompt is moderated once before any model is
//! called. Moderation itself is fail-open: a moderation *provider* error
//! never fails the request, only a flagged verdict does.

use std::sync::Arc;
use std::time::{Duration, Instant};

use fable_core::metrics::GenerationMetrics;
use fable_core::story::AgeRange;
use fable_core::{pricing, prompt};

use crate::provider::{ChatProvider, ModerationProvider};

/// Sampling temperature for story completions.
pub const STORY_TEMPERATURE: f64 = 0.8;
/// Completion token budget for a story.
pub const STORY_MAX_TOKENS: u32 = 600;

/// Errors from story generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The story prompt itself was flagged; no model was called.
    #[error("story prompt rejected by content moderation")]
    InputRejected,

    /// A model's output was flagged; the fallback chain moves on.
    #[error("output of model {model} rejected by content moderation")]
    OutputRejected { model: String },

    /// A model attempt exceeded the configured timeout.
    #[error("model {model} timed out after {timeout_secs}s")]
    Timeout { model: String, timeout_secs: u64 },

    /// The provider returned an error for a model attempt.
    #[error("model {model} failed: {message}")]
    Provider { model: String, message: String },

    /// Every configured model failed or was rejected.
    #[error("all configured models failed or were rejected")]
    AllModelsExhausted,
}

/// Generates story text via an ordered model fallback chain.
pub struct StoryGenerator {
    chat: Arc<dyn ChatProvider>,
    moderation: Arc<dyn ModerationProvider>,
    /// Models tried in order: `[primary, fallback]`.
    models: Vec<String>,
    timeout: Duration,
}

impl StoryGenerator {
    pub fn new(
        chat: Arc<dyn ChatProvider>,
        moderation: Arc<dyn ModerationProvider>,
        primary_model: String,
        fallback_model: String,
        timeout: Duration,
    ) -> Self {
        Self {
            chat,
            moderation,
            models: vec![primary_model, fallback_model],
            timeout,
        }
    }

    /// Generate a story for a child.
    ///
    /// Builds the prompt, gates it through moderation, then walks the
    /// model chain. Each attempt makes exactly one completion call; a
    /// failed or rejected attempt moves on to the next model. Returns
    /// the story text and its metrics on the first clean success.
    pub async fn generate(
        &self,
        name: &str,
        age_range: AgeRange,
        theme: Option<&str>,
    ) -> Result<(String, GenerationMetrics), GenerationError> {
        let prompt = prompt::build_story_prompt(age_range, name, theme);

        if self.moderate(&prompt).await {
            return Err(GenerationError::InputRejected);
        }

        for model in &self.models {
            match self.attempt(model, &prompt).await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    tracing::warn!(model = %model, error = %err, "model attempt failed, trying next");
                }
            }
        }

        Err(GenerationError::AllModelsExhausted)
    }

    /// One bounded completion attempt against a single model.
    async fn attempt(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<(String, GenerationMetrics), GenerationError> {
        let start = Instant::now();

        let completion = match tokio::time::timeout(
            self.timeout,
            self.chat
                .complete(model, prompt, STORY_TEMPERATURE, STORY_MAX_TOKENS),
        )
        .await
        {
            Ok(Ok(completion)) => completion,
            Ok(Err(err)) => {
                return Err(GenerationError::Provider {
                    model: model.to_string(),
                    message: err.to_string(),
                })
            }
            Err(_) => {
                return Err(GenerationError::Timeout {
                    model: model.to_string(),
                    timeout_secs: self.timeout.as_secs(),
                })
            }
        };

        let latency_seconds = start.elapsed().as_secs_f64();
        let cost_usd = pricing::completion_cost(
            model,
            completion.usage.prompt_tokens,
            completion.usage.completion_tokens,
        );

        if self.moderate(&completion.content).await {
            return Err(GenerationError::OutputRejected {
                model: model.to_string(),
            });
        }

        let metrics = GenerationMetrics {
            tokens_prompt: completion.usage.prompt_tokens,
            tokens_completion: completion.usage.completion_tokens,
            tokens_total: completion.usage.total_tokens,
            latency_seconds,
            cost_usd,
            model_used: model.to_string(),
            moderation_flagged: false,
            image: None,
        };

        Ok((completion.content, metrics))
    }

    /// Fail-open moderation: a provider error counts as not flagged.
    async fn moderate(&self, text: &str) -> bool {
        match self.moderation.moderate(text).await {
            Ok(flagged) => flagged,
            Err(err) => {
                tracing::warn!(error = %err, "moderation call failed, treating as not flagged");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
