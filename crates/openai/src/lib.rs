//! OpenAI provider clients for the fable service.
//!
//! [`api::OpenAiApi`] wraps the REST endpoints (chat completions,
//! moderations, image generation). The pipeline-facing surface is
//! [`generator::StoryGenerator`] (moderation-gated two-model fallback)
//! and [`image::ImageGenerator`] (single bounded attempt), both built on
//! the provider traits in [`provider`] so tests can substitute fakes.

pub mod api;
pub mod config;
pub mod generator;
pub mod image;
pub mod provider;

pub use config::OpenAiConfig;
