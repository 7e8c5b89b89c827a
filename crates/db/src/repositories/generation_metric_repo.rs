//! Repository for the `generation_metrics` table.

use fable_core::metrics::GenerationMetrics;
use fable_core::types::StoryId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::generation_metric::GenerationMetricRecord;

/// Column list for `generation_metrics` SELECT queries.
const COLUMNS: &str = "\
    id, story_id, tokens_prompt, tokens_completion, tokens_total, \
    latency_seconds, cost_usd, model_used, moderation_flagged, \
    image_generation_seconds, image_model, image_cost_usd, created_at";

/// Provides query operations for generation metrics.
pub struct GenerationMetricRepo;

impl GenerationMetricRepo {
    /// Insert the metrics captured for a story, generating the row UUID.
    /// The optional image metrics flatten into nullable columns.
    pub async fn insert(
        pool: &PgPool,
        story_id: StoryId,
        metrics: &GenerationMetrics,
    ) -> Result<GenerationMetricRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO generation_metrics \
                (id, story_id, tokens_prompt, tokens_completion, tokens_total, \
                 latency_seconds, cost_usd, model_used, moderation_flagged, \
                 image_generation_seconds, image_model, image_cost_usd) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenerationMetricRecord>(&query)
            .bind(Uuid::new_v4())
            .bind(story_id)
            .bind(metrics.tokens_prompt)
            .bind(metrics.tokens_completion)
            .bind(metrics.tokens_total)
            .bind(metrics.latency_seconds)
            .bind(metrics.cost_usd)
            .bind(&metrics.model_used)
            .bind(metrics.moderation_flagged)
            .bind(metrics.image.as_ref().map(|i| i.generation_seconds))
            .bind(metrics.image.as_ref().map(|i| i.model.as_str()))
            .bind(metrics.image.as_ref().map(|i| i.cost_usd))
            .fetch_one(pool)
            .await
    }

    /// Find the metrics row for a story.
    pub async fn find_by_story(
        pool: &PgPool,
        story_id: StoryId,
    ) -> Result<Option<GenerationMetricRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generation_metrics WHERE story_id = $1");
        sqlx::query_as::<_, GenerationMetricRecord>(&query)
            .bind(story_id)
            .fetch_optional(pool)
            .await
    }
}
