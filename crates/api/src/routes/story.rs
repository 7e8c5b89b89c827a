//! Route definitions for story generation and retrieval.
//!
//! ```text
//! POST   /generate-story       generate_story
//! GET    /stories/{id}         get_story
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::story;
use crate::state::AppState;

/// Routes mounted under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-story", post(story::generate_story))
        .route("/stories/{id}", get(story::get_story))
}
