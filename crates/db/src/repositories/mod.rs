//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod generation_metric_repo;
pub mod story_repo;

pub use generation_metric_repo::GenerationMetricRepo;
pub use story_repo::StoryRepo;
