//! Story prompt construction.
//!
//! Maps an age bucket, child name, and optional theme to the completion
//! prompt sent to the text model. Deterministic -- identical inputs yield
//! byte-identical output.

use crate::story::AgeRange;

/// Instruction appended to every story prompt.
const TRAILING_INSTRUCTION: &str = " Educativo y positivo.";

/// Build the completion prompt for a story.
///
/// Each age bucket has a fixed template controlling sentence complexity
/// and target word count; unknown buckets fall back to a generic template.
/// The optional theme is appended as a ` Tema: {theme}.` suffix before the
/// fixed trailing instruction.
pub fn build_story_prompt(age_range: AgeRange, name: &str, theme: Option<&str>) -> String {
    let mut prompt = match age_range {
        AgeRange::Preschool => {
            format!("Cuento simple para {name}, frases cortas, 200 palabras.")
        }
        AgeRange::EarlyReader => {
            format!("Cuento para {name}, lenguaje sencillo, 350 palabras.")
        }
        AgeRange::MiddleGrade => {
            format!("Cuento para {name}, tramas complejas, 500 palabras.")
        }
        AgeRange::Default => format!("Cuento para {name}"),
    };
    if let Some(theme) = theme {
        prompt.push_str(&format!(" Tema: {theme}."));
    }
    prompt.push_str(TRAILING_INSTRUCTION);
    prompt
}
