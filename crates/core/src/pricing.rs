//! Token and image cost model.
//!
//! Completion cost is a linear function of prompt and completion token
//! counts with a per-model-family rate pair. Image cost is a fixed
//! constant for the fixed resolution/quality tier.

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

/// Per-prompt-token rate for gpt-4-family models (USD).
pub const GPT4_PROMPT_RATE: f64 = 0.000_03;
/// Per-completion-token rate for gpt-4-family models (USD).
pub const GPT4_COMPLETION_RATE: f64 = 0.000_06;
/// Per-prompt-token rate for all other models (USD).
pub const BASE_PROMPT_RATE: f64 = 0.000_001;
/// Per-completion-token rate for all other models (USD).
pub const BASE_COMPLETION_RATE: f64 = 0.000_002;

/// Fixed cost of one 1024x1024 hd image (USD).
pub const IMAGE_COST_USD: f64 = 0.080;

// ---------------------------------------------------------------------------
// Cost calculation
// ---------------------------------------------------------------------------

/// Cost in USD of a completion call.
///
/// Models whose identifier contains `gpt-4` are billed at the gpt-4-family
/// rates; everything else at the base rates.
pub fn completion_cost(model: &str, prompt_tokens: i64, completion_tokens: i64) -> f64 {
    let (prompt_rate, completion_rate) = if model.contains("gpt-4") {
        (GPT4_PROMPT_RATE, GPT4_COMPLETION_RATE)
    } else {
        (BASE_PROMPT_RATE, BASE_COMPLETION_RATE)
    };
    prompt_tokens as f64 * prompt_rate + completion_tokens as f64 * completion_rate
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
