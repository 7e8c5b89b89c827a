//! The story generation pipeline.
//!
//! [`StoryPipeline`] sequences text generation, best-effort illustration,
//! and persistence, and converts every internal error into a structured
//! failure response -- callers always receive a well-formed
//! [`StoryResponse`], never an error.
//!
//! Two deliberately different failure policies live here and must stay
//! visibly distinct: illustration is best-effort (failures are swallowed
//! and the story ships without an image), while persistence failures are
//! governed by [`PersistenceFailurePolicy`].

use std::str::FromStr;
use std::sync::Arc;

use fable_core::illustration;
use fable_core::metrics::ImageMetrics;
use fable_core::story::StoryRequest;
use fable_db::models::story::NewStory;
use fable_db::store::{StoreError, StoryStore};
use fable_openai::generator::{GenerationError, StoryGenerator};
use fable_openai::image::ImageGenerator;

mod response;

pub use response::StoryResponse;

// ---------------------------------------------------------------------------
// Persistence policy
// ---------------------------------------------------------------------------

/// What to do when a store write fails after generation already succeeded.
///
/// `Fail` discards the paid-for generation and reports failure to the
/// caller. `WarnAndSucceed` logs the store error and still returns the
/// story. The default is `Fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistenceFailurePolicy {
    #[default]
    Fail,
    WarnAndSucceed,
}

impl FromStr for PersistenceFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(PersistenceFailurePolicy::Fail),
            "warn" => Ok(PersistenceFailurePolicy::WarnAndSucceed),
            other => Err(format!(
                "unknown persistence failure policy '{other}', expected 'fail' or 'warn'"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Internal pipeline errors, converted into failure responses at the top
/// level of [`StoryPipeline::run`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("failed to persist story: {0}")]
    Persistence(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// A successfully generated illustration.
struct Illustration {
    url: String,
    prompt: String,
    metrics: ImageMetrics,
}

/// Orchestrates one story generation from request to response.
///
/// Holds only long-lived, configuration-bearing collaborators; all
/// per-request state lives on the stack of [`run`](Self::run).
pub struct StoryPipeline {
    generator: StoryGenerator,
    illustrator: ImageGenerator,
    store: Arc<dyn StoryStore>,
    persistence_policy: PersistenceFailurePolicy,
}

impl StoryPipeline {
    pub fn new(
        generator: StoryGenerator,
        illustrator: ImageGenerator,
        store: Arc<dyn StoryStore>,
        persistence_policy: PersistenceFailurePolicy,
    ) -> Self {
        Self {
            generator,
            illustrator,
            store,
            persistence_policy,
        }
    }

    /// Run the pipeline for a validated request.
    ///
    /// Never returns an error: any internal failure becomes a failure
    /// response carrying the error's display text and zeroed metrics.
    pub async fn run(&self, request: &StoryRequest) -> StoryResponse {
        match self.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, child_name = %request.child_name, "story pipeline failed");
                StoryResponse::failure(request, err.to_string())
            }
        }
    }

    async fn execute(&self, request: &StoryRequest) -> Result<StoryResponse, PipelineError> {
        let age_range = request.age_range();

        // Stage 1: text generation. Failure here is fatal for the request.
        let (content, mut metrics) = self
            .generator
            .generate(&request.child_name, age_range, request.theme.as_deref())
            .await?;

        // Stage 2: best-effort illustration. Failure is swallowed; the
        // story ships without image fields and without image metrics.
        let illustration = self.illustrate(request, &content).await;
        if let Some(ill) = &illustration {
            metrics.image = Some(ill.metrics.clone());
        }

        // Stage 3: persist story, then metrics. Two sequential writes,
        // no transaction; a metrics-write failure does not roll back the
        // story row.
        let new_story = NewStory {
            child_name: request.child_name.clone(),
            age_range: age_range.as_str().to_string(),
            content: content.clone(),
            theme: request.theme.clone(),
            custom_elements: request.custom_elements.clone(),
            image_url: illustration.as_ref().map(|i| i.url.clone()),
            image_prompt: illustration.as_ref().map(|i| i.prompt.clone()),
        };

        let story_id = match self.store.save_story(&new_story).await {
            Ok(story) => Some(story.id),
            Err(err) => match self.persistence_policy {
                PersistenceFailurePolicy::Fail => return Err(err.into()),
                PersistenceFailurePolicy::WarnAndSucceed => {
                    tracing::error!(error = %err, "story write failed, returning unpersisted story");
                    None
                }
            },
        };

        if let Some(id) = story_id {
            if let Err(err) = self.store.save_metrics(id, &metrics).await {
                match self.persistence_policy {
                    PersistenceFailurePolicy::Fail => return Err(err.into()),
                    PersistenceFailurePolicy::WarnAndSucceed => {
                        tracing::error!(error = %err, story_id = %id, "metrics write failed");
                    }
                }
            }
        }

        Ok(StoryResponse::success(
            story_id,
            content,
            request,
            metrics,
            illustration.map(|i| (i.url, i.prompt)),
        ))
    }

    /// Derive the image prompt and generate the illustration.
    ///
    /// Any failure is logged and swallowed -- the only best-effort stage
    /// in the pipeline.
    async fn illustrate(&self, request: &StoryRequest, content: &str) -> Option<Illustration> {
        let prompt =
            illustration::build_image_prompt(&request.child_name, request.age_range(), content);

        match self.illustrator.generate(&prompt).await {
            Ok((url, metrics)) => Some(Illustration {
                url,
                prompt,
                metrics,
            }),
            Err(err) => {
                tracing::warn!(error = %err, "illustration failed, continuing without image");
                None
            }
        }
    }
}
