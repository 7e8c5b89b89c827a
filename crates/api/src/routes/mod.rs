pub mod health;
pub mod story;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /generate-story      run the story generation pipeline (POST)
/// /stories/{id}        fetch a persisted story (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(story::router())
}
