//! Illustration prompt derivation.
//!
//! Extracts up to three theme labels from generated story text via fixed
//! keyword sets, looks up an age-appropriate art style, and assembles the
//! image generation prompt. Deterministic, no I/O.

use crate::story::AgeRange;

// ---------------------------------------------------------------------------
// Fixed vocabulary
// ---------------------------------------------------------------------------

/// Prefix prepended to every illustration prompt.
pub const SAFETY_PREFIX: &str = "Safe for kids, child-friendly, colorful illustration: ";

/// Phrase used when no theme keyword matches.
const DEFAULT_THEMES: &str = "a wonderful adventure";

/// Maximum number of theme labels included in the prompt.
const MAX_THEMES: usize = 3;

/// Theme labels with their keyword sets, in dictionary order. Matching
/// walks this slice in order, so the collected labels keep this order
/// rather than any frequency ranking.
const THEME_KEYWORDS: &[(&str, &[&str])] = &[
    ("adventure", &["aventura", "viaje", "explorar", "descubrir"]),
    ("friendship", &["amigo", "amistad", "juntos"]),
    ("magic", &["magia", "mágico", "hechizo", "poder"]),
    ("nature", &["bosque", "árbol", "animal", "naturaleza"]),
    ("fantasy", &["dragón", "hada", "castillo", "príncipe", "princesa"]),
];

// ---------------------------------------------------------------------------
// Theme extraction
// ---------------------------------------------------------------------------

/// Extract a comma-joined list of up to three theme labels from story text.
///
/// The text is lowercased and each theme's keyword set is tested for
/// substring membership. Falls back to a default phrase when nothing
/// matches.
pub fn extract_themes(story: &str) -> String {
    let lower = story.to_lowercase();
    let labels: Vec<&str> = THEME_KEYWORDS
        .iter()
        .filter(|(_, words)| words.iter().any(|word| lower.contains(word)))
        .map(|(label, _)| *label)
        .take(MAX_THEMES)
        .collect();

    if labels.is_empty() {
        DEFAULT_THEMES.to_string()
    } else {
        labels.join(", ")
    }
}

// ---------------------------------------------------------------------------
// Style lookup
// ---------------------------------------------------------------------------

/// Art style guidance for an age bucket.
///
/// The early-reader style doubles as the fallback for unknown buckets.
pub fn style_for_age(age_range: AgeRange) -> &'static str {
    match age_range {
        AgeRange::Preschool => {
            "Simple shapes, bright primary colors, large friendly characters, minimal details"
        }
        AgeRange::MiddleGrade => {
            "Rich illustration style, detailed characters, immersive scenes, fantasy elements"
        }
        AgeRange::EarlyReader | AgeRange::Default => {
            "Colorful cartoon style, expressive characters, clear scenes, moderate detail"
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt assembly
// ---------------------------------------------------------------------------

/// Build the full illustration prompt for a story.
pub fn build_image_prompt(name: &str, age_range: AgeRange, story: &str) -> String {
    format!(
        "{SAFETY_PREFIX}{} Illustration of {name}'s story about {}. \
         Warm, friendly, magical atmosphere.",
        style_for_age(age_range),
        extract_themes(story),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Theme extraction --

    #[test]
    fn extracts_fantasy_and_nature_keywords() {
        let themes = extract_themes("El dragón voló sobre el bosque encantado.");
        assert_eq!(themes, "nature, fantasy");
    }

    #[test]
    fn labels_keep_dictionary_order_not_text_order() {
        // "castillo" (fantasy) appears before "amigo" (friendship) in the
        // text, but the label order follows the fixed keyword table.
        let themes = extract_themes("En el castillo conoció a un amigo.");
        assert_eq!(themes, "friendship, fantasy");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let themes = extract_themes("LA MAGIA DEL VIAJE");
        assert_eq!(themes, "adventure, magic");
    }

    #[test]
    fn caps_at_three_themes() {
        let story = "Una aventura con amigos, magia, animales del bosque y un dragón.";
        let themes = extract_themes(story);
        assert_eq!(themes.split(", ").count(), 3);
        assert_eq!(themes, "adventure, friendship, magic");
    }

    #[test]
    fn no_match_falls_back_to_default_phrase() {
        assert_eq!(extract_themes("Hola mundo."), "a wonderful adventure");
    }

    // -- Style lookup --

    #[test]
    fn unknown_bucket_uses_early_reader_style() {
        assert_eq!(
            style_for_age(AgeRange::Default),
            style_for_age(AgeRange::EarlyReader)
        );
    }

    // -- Prompt assembly --

    #[test]
    fn prompt_contains_safety_prefix_and_style() {
        let prompt = build_image_prompt(
            "Lucía",
            AgeRange::Preschool,
            "El dragón cuidaba el bosque.",
        );
        assert!(prompt.starts_with(SAFETY_PREFIX));
        assert!(prompt.contains(style_for_age(AgeRange::Preschool)));
        assert!(prompt.contains("Lucía's story about nature, fantasy"));
        assert!(prompt.ends_with("Warm, friendly, magical atmosphere."));
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let a = build_image_prompt("Leo", AgeRange::MiddleGrade, "Un viaje mágico.");
        let b = build_image_prompt("Leo", AgeRange::MiddleGrade, "Un viaje mágico.");
        assert_eq!(a, b);
    }
}
