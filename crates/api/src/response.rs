//! Shared response envelope types for API handlers.
//!
//! Read-side endpoints use a `{ "data": ... }` envelope. The
//! generate-story endpoint returns the pipeline's `StoryResponse`
//! directly, matching the service's original wire contract.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
