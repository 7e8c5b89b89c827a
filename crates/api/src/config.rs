use std::str::FromStr;

use fable_pipeline::PersistenceFailurePolicy;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `90`; must exceed the
    /// combined text and image generation timeouts).
    pub request_timeout_secs: u64,
    /// What to do when a store write fails after generation succeeded.
    pub persistence_failure_policy: PersistenceFailurePolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                    |
    /// |-------------------------------|----------------------------|
    /// | `HOST`                        | `0.0.0.0`                  |
    /// | `PORT`                        | `8000`                     |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`        | `90`                       |
    /// | `PERSISTENCE_FAILURE_POLICY`  | `fail`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "90".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let persistence_failure_policy = PersistenceFailurePolicy::from_str(
            &std::env::var("PERSISTENCE_FAILURE_POLICY").unwrap_or_else(|_| "fail".into()),
        )
        .expect("PERSISTENCE_FAILURE_POLICY must be 'fail' or 'warn'");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            persistence_failure_policy,
        }
    }
}
