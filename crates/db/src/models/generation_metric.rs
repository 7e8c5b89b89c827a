//! Generation metric entity model.
//!
//! Stores the token counts, latency, cost, and moderation flag for one
//! pipeline run, plus the optional image generation metrics.

use fable_core::types::{StoryId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted metrics row, 1:1 with a story.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenerationMetricRecord {
    pub id: Uuid,
    pub story_id: StoryId,
    pub tokens_prompt: i64,
    pub tokens_completion: i64,
    pub tokens_total: i64,
    pub latency_seconds: f64,
    pub cost_usd: f64,
    pub model_used: String,
    pub moderation_flagged: bool,
    pub image_generation_seconds: Option<f64>,
    pub image_model: Option<String>,
    pub image_cost_usd: Option<f64>,
    pub created_at: Timestamp,
}
