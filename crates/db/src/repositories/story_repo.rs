//! Repository for the `stories` table.

use fable_core::types::StoryId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::story::{NewStory, Story};

/// Column list for `stories` SELECT queries.
const COLUMNS: &str = "\
    id, child_name, age_range, content, theme, custom_elements, \
    image_url, image_prompt, created_at";

/// Provides query operations for stories.
pub struct StoryRepo;

impl StoryRepo {
    /// Insert a story, generating its UUID. Returns the full row.
    pub async fn insert(pool: &PgPool, story: &NewStory) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories \
                (id, child_name, age_range, content, theme, custom_elements, \
                 image_url, image_prompt) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(Uuid::new_v4())
            .bind(&story.child_name)
            .bind(&story.age_range)
            .bind(&story.content)
            .bind(&story.theme)
            .bind(&story.custom_elements)
            .bind(&story.image_url)
            .bind(&story.image_prompt)
            .fetch_one(pool)
            .await
    }

    /// Find a story by id.
    pub async fn find_by_id(pool: &PgPool, id: StoryId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
