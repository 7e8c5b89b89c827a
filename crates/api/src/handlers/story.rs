//! Handlers for story generation and retrieval.
//!
//! Routes:
//! - `POST /api/v1/generate-story` — run the generation pipeline
//! - `GET  /api/v1/stories/{id}`   — fetch a persisted story

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use fable_core::error::CoreError;
use fable_core::story::StoryRequest;
use fable_core::types::StoryId;
use fable_db::repositories::StoryRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/generate-story
///
/// Validates the request, runs the pipeline, and returns the
/// `StoryResponse`. A pipeline failure maps to a 500 whose detail is the
/// pipeline's error text; the caller never sees a half-populated body.
pub async fn generate_story(
    State(state): State<AppState>,
    Json(request): Json<StoryRequest>,
) -> AppResult<impl IntoResponse> {
    request.validate().map_err(AppError::Core)?;

    let response = state.pipeline.run(&request).await;

    if !response.success {
        let detail = response
            .error
            .unwrap_or_else(|| "story generation failed".to_string());
        return Err(AppError::Pipeline(detail));
    }

    Ok(Json(response))
}

/// GET /api/v1/stories/{id}
///
/// Fetch a previously generated story by id.
pub async fn get_story(
    State(state): State<AppState>,
    Path(story_id): Path<StoryId>,
) -> AppResult<impl IntoResponse> {
    let story = StoryRepo::find_by_id(&state.pool, story_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Story",
            id: story_id,
        }))?;

    Ok(Json(DataResponse { data: story }))
}
