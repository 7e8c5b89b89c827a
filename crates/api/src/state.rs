use std::sync::Arc;

use fable_pipeline::StoryPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Everything here is read-only after startup; no per-request state is shared.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fable_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The story generation pipeline with its provider clients.
    pub pipeline: Arc<StoryPipeline>,
}
