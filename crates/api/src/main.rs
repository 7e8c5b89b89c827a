use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fable_api::config::ServerConfig;
use fable_api::router::build_app_router;
use fable_api::state::AppState;
use fable_db::store::PgStoryStore;
use fable_openai::api::OpenAiApi;
use fable_openai::generator::StoryGenerator;
use fable_openai::image::ImageGenerator;
use fable_openai::OpenAiConfig;
use fable_pipeline::StoryPipeline;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fable_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = fable_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    fable_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    fable_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Provider clients ---
    // One HTTP client serves all three provider roles (chat, moderation,
    // images); it holds configuration only and is shared via Arc.
    let openai_config = OpenAiConfig::from_env();
    let openai = Arc::new(OpenAiApi::new(&openai_config));
    tracing::info!(
        primary = %openai_config.primary_model,
        fallback = %openai_config.fallback_model,
        "OpenAI client configured"
    );

    let chat: Arc<dyn fable_openai::provider::ChatProvider> = Arc::clone(&openai) as _;
    let moderation: Arc<dyn fable_openai::provider::ModerationProvider> = Arc::clone(&openai) as _;
    let image: Arc<dyn fable_openai::provider::ImageProvider> = Arc::clone(&openai) as _;

    let generator = StoryGenerator::new(
        chat,
        moderation,
        openai_config.primary_model.clone(),
        openai_config.fallback_model.clone(),
        Duration::from_secs(openai_config.text_timeout_secs),
    );
    let illustrator = ImageGenerator::new(
        image,
        Duration::from_secs(openai_config.image_timeout_secs),
    );

    // --- Pipeline ---
    let store = Arc::new(PgStoryStore::new(pool.clone()));
    let pipeline = Arc::new(StoryPipeline::new(
        generator,
        illustrator,
        store,
        config.persistence_failure_policy,
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        pipeline,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
