//! Integration tests for the story and metrics repositories.
//!
//! Exercises the repository layer against a real database:
//! - Insert and fetch stories with and without image fields
//! - Insert and fetch metrics with and without image metrics
//! - Missing rows return `None`

use fable_core::metrics::{GenerationMetrics, ImageMetrics};
use fable_db::models::story::NewStory;
use fable_db::repositories::{GenerationMetricRepo, StoryRepo};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_story(name: &str) -> NewStory {
    NewStory {
        child_name: name.to_string(),
        age_range: "5-7".to_string(),
        content: "Había una vez...".to_string(),
        theme: Some("piratas".to_string()),
        custom_elements: None,
        image_url: None,
        image_prompt: None,
    }
}

fn text_metrics() -> GenerationMetrics {
    GenerationMetrics {
        tokens_prompt: 42,
        tokens_completion: 310,
        tokens_total: 352,
        latency_seconds: 2.8,
        cost_usd: 0.019_86,
        model_used: "gpt-4".to_string(),
        moderation_flagged: false,
        image: None,
    }
}

// ---------------------------------------------------------------------------
// Stories
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn insert_and_fetch_story(pool: PgPool) {
    let stored = StoryRepo::insert(&pool, &new_story("Lucía")).await.unwrap();

    let found = StoryRepo::find_by_id(&pool, stored.id)
        .await
        .unwrap()
        .expect("story should exist");

    assert_eq!(found.child_name, "Lucía");
    assert_eq!(found.age_range, "5-7");
    assert_eq!(found.theme.as_deref(), Some("piratas"));
    assert_eq!(found.image_url, None);
}

#[sqlx::test]
async fn insert_story_with_image_fields(pool: PgPool) {
    let mut story = new_story("Mateo");
    story.image_url = Some("https://images.example/mateo.png".to_string());
    story.image_prompt = Some("Safe for kids...".to_string());

    let stored = StoryRepo::insert(&pool, &story).await.unwrap();

    let found = StoryRepo::find_by_id(&pool, stored.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        found.image_url.as_deref(),
        Some("https://images.example/mateo.png")
    );
    assert!(found.image_prompt.is_some());
}

#[sqlx::test]
async fn missing_story_returns_none(pool: PgPool) {
    let found = StoryRepo::find_by_id(&pool, Uuid::new_v4()).await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test]
async fn inserted_stories_get_distinct_ids(pool: PgPool) {
    let a = StoryRepo::insert(&pool, &new_story("Ana")).await.unwrap();
    let b = StoryRepo::insert(&pool, &new_story("Ana")).await.unwrap();
    assert_ne!(a.id, b.id);
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn insert_metrics_without_image(pool: PgPool) {
    let story = StoryRepo::insert(&pool, &new_story("Leo")).await.unwrap();

    GenerationMetricRepo::insert(&pool, story.id, &text_metrics())
        .await
        .unwrap();

    let found = GenerationMetricRepo::find_by_story(&pool, story.id)
        .await
        .unwrap()
        .expect("metrics should exist");

    assert_eq!(found.tokens_total, 352);
    assert_eq!(found.model_used, "gpt-4");
    assert!(!found.moderation_flagged);
    assert_eq!(found.image_model, None);
    assert_eq!(found.image_cost_usd, None);
}

#[sqlx::test]
async fn insert_metrics_with_image(pool: PgPool) {
    let story = StoryRepo::insert(&pool, &new_story("Sofía")).await.unwrap();

    let mut metrics = text_metrics();
    metrics.image = Some(ImageMetrics {
        generation_seconds: 11.52,
        model: "dall-e-3".to_string(),
        cost_usd: 0.080,
    });

    GenerationMetricRepo::insert(&pool, story.id, &metrics)
        .await
        .unwrap();

    let found = GenerationMetricRepo::find_by_story(&pool, story.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.image_model.as_deref(), Some("dall-e-3"));
    assert_eq!(found.image_generation_seconds, Some(11.52));
    assert_eq!(found.image_cost_usd, Some(0.080));
}

#[sqlx::test]
async fn metrics_for_unknown_story_returns_none(pool: PgPool) {
    let found = GenerationMetricRepo::find_by_story(&pool, Uuid::new_v4())
        .await
        .unwrap();
    assert!(found.is_none());
}
