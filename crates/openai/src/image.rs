//! Illustration generation.
//!
//! [`ImageGenerator`] makes a single bounded attempt at the fixed
//! model/resolution/quality tier. There is no retry and no fallback;
//! every failure mode collapses into [`ImageError::GenerationFailed`]
//! because the pipeline treats illustration as best-effort either way.

use std::sync::Arc;
use std::time::{Duration, Instant};

use fable_core::metrics::ImageMetrics;
use fable_core::pricing::IMAGE_COST_USD;

use crate::provider::ImageProvider;

/// Image model identifier.
pub const IMAGE_MODEL: &str = "dall-e-3";
/// Fixed output resolution.
pub const IMAGE_SIZE: &str = "1024x1024";
/// Fixed quality tier.
pub const IMAGE_QUALITY: &str = "hd";

/// Errors from image generation.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Timeout, provider failure, or malformed response.
    #[error("image generation failed: {0}")]
    GenerationFailed(String),
}

/// Generates story illustrations with a single bounded attempt.
pub struct ImageGenerator {
    provider: Arc<dyn ImageProvider>,
    timeout: Duration,
}

impl ImageGenerator {
    pub fn new(provider: Arc<dyn ImageProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Generate one image for the given prompt.
    ///
    /// Returns the image URL and its metrics. The cost is the fixed
    /// constant for the fixed tier, not derived from the response.
    pub async fn generate(&self, prompt: &str) -> Result<(String, ImageMetrics), ImageError> {
        let start = Instant::now();

        let url = match tokio::time::timeout(
            self.timeout,
            self.provider.generate_image(prompt, IMAGE_SIZE, IMAGE_QUALITY),
        )
        .await
        {
            Ok(Ok(url)) => url,
            Ok(Err(err)) => return Err(ImageError::GenerationFailed(err.to_string())),
            Err(_) => {
                return Err(ImageError::GenerationFailed(format!(
                    "timed out after {}s",
                    self.timeout.as_secs()
                )))
            }
        };

        let elapsed = start.elapsed().as_secs_f64();
        let metrics = ImageMetrics {
            generation_seconds: (elapsed * 100.0).round() / 100.0,
            model: IMAGE_MODEL.to_string(),
            cost_usd: IMAGE_COST_USD,
        };

        Ok((url, metrics))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::provider::ProviderError;

    struct FakeImages {
        outcome: Result<&'static str, ()>,
        hang: bool,
    }

    #[async_trait]
    impl ImageProvider for FakeImages {
        async fn generate_image(
            &self,
            _prompt: &str,
            size: &str,
            quality: &str,
        ) -> Result<String, ProviderError> {
            assert_eq!(size, IMAGE_SIZE);
            assert_eq!(quality, IMAGE_QUALITY);
            if self.hang {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            match self.outcome {
                Ok(url) => Ok(url.to_string()),
                Err(()) => Err(ProviderError::Api {
                    status: 500,
                    body: "image backend down".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn success_returns_url_and_fixed_cost() {
        let gen = ImageGenerator::new(
            Arc::new(FakeImages {
                outcome: Ok("https://img.example/story.png"),
                hang: false,
            }),
            Duration::from_secs(60),
        );

        let (url, metrics) = gen.generate("a friendly dragon").await.unwrap();

        assert_eq!(url, "https://img.example/story.png");
        assert_eq!(metrics.model, IMAGE_MODEL);
        assert_eq!(metrics.cost_usd, IMAGE_COST_USD);
    }

    #[tokio::test]
    async fn provider_failure_maps_to_generation_failed() {
        let gen = ImageGenerator::new(
            Arc::new(FakeImages {
                outcome: Err(()),
                hang: false,
            }),
            Duration::from_secs(60),
        );

        let err = gen.generate("a friendly dragon").await.unwrap_err();
        let ImageError::GenerationFailed(message) = err;
        assert!(message.contains("image backend down"));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_maps_to_generation_failed() {
        let gen = ImageGenerator::new(
            Arc::new(FakeImages {
                outcome: Ok("https://img.example/late.png"),
                hang: true,
            }),
            Duration::from_secs(60),
        );

        let err = gen.generate("a friendly dragon").await.unwrap_err();
        let ImageError::GenerationFailed(message) = err;
        assert!(message.contains("timed out after 60s"));
    }
}
