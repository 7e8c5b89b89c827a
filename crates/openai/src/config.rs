/// OpenAI client configuration loaded from environment variables.
///
/// The API key is required; everything else has a default suitable for
/// production use against the public API.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Bearer token for all OpenAI calls.
    pub api_key: String,
    /// API base URL (default: `https://api.openai.com/v1`).
    pub base_url: String,
    /// Model tried first (default: `gpt-4`).
    pub primary_model: String,
    /// Model tried when the primary fails (default: `gpt-3.5-turbo`).
    pub fallback_model: String,
    /// Per-attempt completion timeout in seconds (default: `45`).
    pub text_timeout_secs: u64,
    /// Image generation timeout in seconds (default: `60`; image
    /// synthesis is slower than text).
    pub image_timeout_secs: u64,
}

impl OpenAiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                     |
    /// |-------------------------|-----------------------------|
    /// | `OPENAI_API_KEY`        | (required)                  |
    /// | `OPENAI_BASE_URL`       | `https://api.openai.com/v1` |
    /// | `OPENAI_MODEL_PRIMARY`  | `gpt-4`                     |
    /// | `OPENAI_MODEL_FALLBACK` | `gpt-3.5-turbo`             |
    /// | `OPENAI_TIMEOUT_SECS`   | `45`                        |
    /// | `IMAGE_TIMEOUT_SECS`    | `60`                        |
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set");

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());

        let primary_model =
            std::env::var("OPENAI_MODEL_PRIMARY").unwrap_or_else(|_| "gpt-4".into());

        let fallback_model =
            std::env::var("OPENAI_MODEL_FALLBACK").unwrap_or_else(|_| "gpt-3.5-turbo".into());

        let text_timeout_secs: u64 = std::env::var("OPENAI_TIMEOUT_SECS")
            .unwrap_or_else(|_| "45".into())
            .parse()
            .expect("OPENAI_TIMEOUT_SECS must be a valid u64");

        let image_timeout_secs: u64 = std::env::var("IMAGE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("IMAGE_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url,
            primary_model,
            fallback_model,
            text_timeout_secs,
            image_timeout_secs,
        }
    }
}
