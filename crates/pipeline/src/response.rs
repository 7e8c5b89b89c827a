//! The caller-facing pipeline result.

use fable_core::metrics::GenerationMetrics;
use fable_core::story::StoryRequest;
use fable_core::types::{StoryId, Timestamp};
use serde::Serialize;

/// Result of one pipeline invocation.
///
/// Exactly one of two shapes, chosen by constructor: a success carrying
/// the stored id, content, and metrics, or a failure carrying an error
/// message with zeroed metrics. Never partially populated.
#[derive(Debug, Clone, Serialize)]
pub struct StoryResponse {
    /// Absent on failure, and under the warn persistence policy when the
    /// story row could not be written.
    pub story_id: Option<StoryId>,
    pub content: String,
    pub child_name: String,
    pub age_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_elements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    pub metrics: GenerationMetrics,
    pub created_at: Timestamp,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StoryResponse {
    /// A successful result.
    pub fn success(
        story_id: Option<StoryId>,
        content: String,
        request: &StoryRequest,
        metrics: GenerationMetrics,
        image: Option<(String, String)>,
    ) -> Self {
        let (image_url, image_prompt) = match image {
            Some((url, prompt)) => (Some(url), Some(prompt)),
            None => (None, None),
        };
        Self {
            story_id,
            content,
            child_name: request.child_name.clone(),
            age_range: request.age_range().as_str().to_string(),
            theme: request.theme.clone(),
            custom_elements: request.custom_elements.clone(),
            image_url,
            image_prompt,
            metrics,
            created_at: chrono::Utc::now(),
            success: true,
            error: None,
        }
    }

    /// A failure result with zeroed metrics and no persisted fields.
    pub fn failure(request: &StoryRequest, error: String) -> Self {
        Self {
            story_id: None,
            content: String::new(),
            child_name: request.child_name.clone(),
            age_range: request.age_range().as_str().to_string(),
            theme: request.theme.clone(),
            custom_elements: request.custom_elements.clone(),
            image_url: None,
            image_prompt: None,
            metrics: GenerationMetrics::zeroed(),
            created_at: chrono::Utc::now(),
            success: false,
            error: Some(error),
        }
    }
}
