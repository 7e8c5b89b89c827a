//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts

pub mod generation_metric;
pub mod story;

pub use generation_metric::GenerationMetricRecord;
pub use story::{NewStory, Story};
