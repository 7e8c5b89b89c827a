//! Shared harness for API integration tests.
//!
//! Builds the full application router with the production middleware
//! stack, wiring the pipeline to fake providers so no network calls are
//! made. The database pool is real (provided by `#[sqlx::test]`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fable_api::config::ServerConfig;
use fable_api::router::build_app_router;
use fable_api::state::AppState;
use fable_db::store::PgStoryStore;
use fable_openai::generator::StoryGenerator;
use fable_openai::image::ImageGenerator;
use fable_openai::provider::{
    ChatProvider, Completion, ImageProvider, ModerationProvider, ProviderError, TokenUsage,
};
use fable_pipeline::{PersistenceFailurePolicy, StoryPipeline};

/// Story text returned by the fake chat provider. Contains theme
/// keywords so illustration prompts are exercised end-to-end.
pub const FAKE_STORY: &str = "El dragón y su amiga cuidaban el bosque encantado.";

/// Image URL returned by the fake image provider.
pub const FAKE_IMAGE_URL: &str = "https://img.example/fable.png";

// ---------------------------------------------------------------------------
// Fake providers
// ---------------------------------------------------------------------------

/// Chat fake: always succeeds, or always fails when `healthy` is false.
struct FakeChat {
    healthy: bool,
}

#[async_trait]
impl ChatProvider for FakeChat {
    async fn complete(
        &self,
        _model: &str,
        _prompt: &str,
        _temperature: f64,
        _max_tokens: u32,
    ) -> Result<Completion, ProviderError> {
        if !self.healthy {
            return Err(ProviderError::Api {
                status: 500,
                body: "upstream unavailable".to_string(),
            });
        }
        Ok(Completion {
            content: FAKE_STORY.to_string(),
            usage: TokenUsage {
                prompt_tokens: 40,
                completion_tokens: 200,
                total_tokens: 240,
            },
        })
    }
}

/// Moderation fake: never flags.
struct FakeModeration;

#[async_trait]
impl ModerationProvider for FakeModeration {
    async fn moderate(&self, _text: &str) -> Result<bool, ProviderError> {
        Ok(false)
    }
}

/// Image fake: always succeeds.
struct FakeImages;

#[async_trait]
impl ImageProvider for FakeImages {
    async fn generate_image(
        &self,
        _prompt: &str,
        _size: &str,
        _quality: &str,
    ) -> Result<String, ProviderError> {
        Ok(FAKE_IMAGE_URL.to_string())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        persistence_failure_policy: PersistenceFailurePolicy::Fail,
    }
}

fn build_app(pool: PgPool, chat_healthy: bool) -> Router {
    let config = test_config();

    let generator = StoryGenerator::new(
        Arc::new(FakeChat {
            healthy: chat_healthy,
        }),
        Arc::new(FakeModeration),
        "gpt-4".to_string(),
        "gpt-3.5-turbo".to_string(),
        Duration::from_secs(45),
    );
    let illustrator = ImageGenerator::new(Arc::new(FakeImages), Duration::from_secs(60));
    let store = Arc::new(PgStoryStore::new(pool.clone()));
    let pipeline = Arc::new(StoryPipeline::new(
        generator,
        illustrator,
        store,
        config.persistence_failure_policy,
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        pipeline,
    };

    build_app_router(state, &config)
}

/// Application with healthy fake providers.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, true)
}

/// Application whose chat provider fails every call, exhausting the
/// model fallback chain.
pub fn build_failing_test_app(pool: PgPool) -> Router {
    build_app(pool, false)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response status, panicking with the body text for context.
pub async fn assert_status(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, expected, "unexpected status, body: {json}");
    json
}
