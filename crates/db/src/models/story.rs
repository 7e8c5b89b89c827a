//! Story entity model and insert DTO.

use fable_core::types::{StoryId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A persisted story row. The image fields are null when illustration was
/// skipped or failed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Story {
    pub id: StoryId,
    pub child_name: String,
    pub age_range: String,
    pub content: String,
    pub theme: Option<String>,
    pub custom_elements: Option<String>,
    pub image_url: Option<String>,
    pub image_prompt: Option<String>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Everything needed to insert a story row. The id and created_at are
/// generated at insert time.
#[derive(Debug, Clone)]
pub struct NewStory {
    pub child_name: String,
    pub age_range: String,
    pub content: String,
    pub theme: Option<String>,
    pub custom_elements: Option<String>,
    pub image_url: Option<String>,
    pub image_prompt: Option<String>,
}
