//! Generation metric types.
//!
//! One [`GenerationMetrics`] value is produced per pipeline invocation and
//! never mutated afterwards, apart from the single merge of image metrics
//! performed by the orchestrator.

use serde::Serialize;

/// Metrics captured while generating a story's text, with optional image
/// metrics merged in when illustration succeeds.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationMetrics {
    pub tokens_prompt: i64,
    pub tokens_completion: i64,
    pub tokens_total: i64,
    pub latency_seconds: f64,
    pub cost_usd: f64,
    pub model_used: String,
    pub moderation_flagged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageMetrics>,
}

impl GenerationMetrics {
    /// All-zero metrics for failure responses.
    pub fn zeroed() -> Self {
        Self {
            tokens_prompt: 0,
            tokens_completion: 0,
            tokens_total: 0,
            latency_seconds: 0.0,
            cost_usd: 0.0,
            model_used: String::new(),
            moderation_flagged: false,
            image: None,
        }
    }
}

/// Metrics for a single image generation attempt.
#[derive(Debug, Clone, Serialize)]
pub struct ImageMetrics {
    /// Wall-clock generation time, rounded to centiseconds.
    pub generation_seconds: f64,
    pub model: String,
    pub cost_usd: f64,
}
