//! The pipeline's persistence seam.
//!
//! The orchestrator treats storage as an opaque record store with two
//! write operations, so it consumes the [`StoryStore`] trait rather than
//! the repositories directly. [`PgStoryStore`] is the production
//! implementation; tests substitute in-memory fakes.

use async_trait::async_trait;
use fable_core::metrics::GenerationMetrics;
use fable_core::types::StoryId;

use crate::models::story::{NewStory, Story};
use crate::repositories::{GenerationMetricRepo, StoryRepo};
use crate::DbPool;

/// Errors surfaced by a story store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Opaque persistence for stories and their metrics.
#[async_trait]
pub trait StoryStore: Send + Sync {
    /// Persist a story, returning the stored row with its generated id.
    async fn save_story(&self, story: &NewStory) -> Result<Story, StoreError>;

    /// Persist the metrics for a previously saved story.
    async fn save_metrics(
        &self,
        story_id: StoryId,
        metrics: &GenerationMetrics,
    ) -> Result<(), StoreError>;
}

/// PostgreSQL-backed [`StoryStore`] delegating to the repositories.
pub struct PgStoryStore {
    pool: DbPool,
}

impl PgStoryStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoryStore for PgStoryStore {
    async fn save_story(&self, story: &NewStory) -> Result<Story, StoreError> {
        let stored = StoryRepo::insert(&self.pool, story).await?;
        tracing::debug!(story_id = %stored.id, "story persisted");
        Ok(stored)
    }

    async fn save_metrics(
        &self,
        story_id: StoryId,
        metrics: &GenerationMetrics,
    ) -> Result<(), StoreError> {
        GenerationMetricRepo::insert(&self.pool, story_id, metrics).await?;
        tracing::debug!(story_id = %story_id, "metrics persisted");
        Ok(())
    }
}
