//! Story request validation and age bucketing.
//!
//! A [`StoryRequest`] is immutable once constructed; [`StoryRequest::validate`]
//! enforces the field bounds and [`StoryRequest::age_range`] derives the
//! discrete [`AgeRange`] bucket that drives both the story tone and the
//! illustration style.

use serde::Deserialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field bounds
// ---------------------------------------------------------------------------

/// Maximum length of a child's name in characters.
pub const MAX_CHILD_NAME_CHARS: usize = 50;
/// Youngest supported age (inclusive).
pub const MIN_AGE: u8 = 3;
/// Oldest supported age (inclusive).
pub const MAX_AGE: u8 = 10;
/// Maximum length of the optional theme in characters.
pub const MAX_THEME_CHARS: usize = 100;
/// Maximum length of the optional custom elements in characters.
pub const MAX_CUSTOM_ELEMENTS_CHARS: usize = 500;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Incoming request for a generated story.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryRequest {
    pub child_name: String,
    pub age: u8,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub custom_elements: Option<String>,
}

impl StoryRequest {
    /// Validate all field bounds.
    ///
    /// - `child_name` must be 1..=50 characters and not blank.
    /// - `age` must be within `[3, 10]`.
    /// - `theme`, when present, must be at most 100 characters.
    /// - `custom_elements`, when present, must be at most 500 characters.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.child_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "child_name must not be empty".to_string(),
            ));
        }
        if self.child_name.chars().count() > MAX_CHILD_NAME_CHARS {
            return Err(CoreError::Validation(format!(
                "child_name must be at most {MAX_CHILD_NAME_CHARS} characters"
            )));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(CoreError::Validation(format!(
                "age must be between {MIN_AGE} and {MAX_AGE}, got {}",
                self.age
            )));
        }
        if let Some(ref theme) = self.theme {
            if theme.chars().count() > MAX_THEME_CHARS {
                return Err(CoreError::Validation(format!(
                    "theme must be at most {MAX_THEME_CHARS} characters"
                )));
            }
        }
        if let Some(ref custom) = self.custom_elements {
            if custom.chars().count() > MAX_CUSTOM_ELEMENTS_CHARS {
                return Err(CoreError::Validation(format!(
                    "custom_elements must be at most {MAX_CUSTOM_ELEMENTS_CHARS} characters"
                )));
            }
        }
        Ok(())
    }

    /// The age bucket for this request.
    pub fn age_range(&self) -> AgeRange {
        AgeRange::from_age(self.age)
    }
}

// ---------------------------------------------------------------------------
// Age buckets
// ---------------------------------------------------------------------------

/// Discrete age bucket driving story tone and illustration style.
///
/// Buckets follow inclusive/exclusive boundary rules on the numeric age:
/// `[3, 5]` -> `3-5`, `(5, 7]` -> `5-7`, `(7, 10]` -> `7-10`, anything
/// else falls into the generic bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeRange {
    /// Ages 3 through 5.
    Preschool,
    /// Ages 6 and 7.
    EarlyReader,
    /// Ages 8 through 10.
    MiddleGrade,
    /// Unknown or out-of-band age.
    Default,
}

impl AgeRange {
    /// Derive the bucket from a numeric age.
    pub fn from_age(age: u8) -> Self {
        match age {
            3..=5 => AgeRange::Preschool,
            6..=7 => AgeRange::EarlyReader,
            8..=10 => AgeRange::MiddleGrade,
            _ => AgeRange::Default,
        }
    }

    /// Wire/storage representation of the bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRange::Preschool => "3-5",
            AgeRange::EarlyReader => "5-7",
            AgeRange::MiddleGrade => "7-10",
            AgeRange::Default => "default",
        }
    }
}

impl std::fmt::Display for AgeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn request(age: u8) -> StoryRequest {
        StoryRequest {
            child_name: "Lucía".to_string(),
            age,
            theme: None,
            custom_elements: None,
        }
    }

    // -- Age bucketing --

    #[test]
    fn ages_three_to_five_bucket_as_preschool() {
        for age in 3..=5 {
            assert_eq!(AgeRange::from_age(age), AgeRange::Preschool);
        }
    }

    #[test]
    fn ages_six_and_seven_bucket_as_early_reader() {
        for age in 6..=7 {
            assert_eq!(AgeRange::from_age(age), AgeRange::EarlyReader);
        }
    }

    #[test]
    fn ages_eight_to_ten_bucket_as_middle_grade() {
        for age in 8..=10 {
            assert_eq!(AgeRange::from_age(age), AgeRange::MiddleGrade);
        }
    }

    #[test]
    fn out_of_band_ages_bucket_as_default() {
        assert_eq!(AgeRange::from_age(2), AgeRange::Default);
        assert_eq!(AgeRange::from_age(11), AgeRange::Default);
        assert_eq!(AgeRange::from_age(0), AgeRange::Default);
    }

    #[test]
    fn age_range_wire_strings() {
        assert_eq!(AgeRange::Preschool.as_str(), "3-5");
        assert_eq!(AgeRange::EarlyReader.as_str(), "5-7");
        assert_eq!(AgeRange::MiddleGrade.as_str(), "7-10");
        assert_eq!(AgeRange::Default.as_str(), "default");
    }

    // -- Validation --

    #[test]
    fn valid_request_passes() {
        assert!(request(6).validate().is_ok());
    }

    #[test]
    fn age_below_minimum_rejected() {
        assert!(request(2).validate().is_err());
    }

    #[test]
    fn age_above_maximum_rejected() {
        assert!(request(11).validate().is_err());
    }

    #[test]
    fn blank_name_rejected() {
        let mut req = request(5);
        req.child_name = "   ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn overlong_name_rejected() {
        let mut req = request(5);
        req.child_name = "x".repeat(MAX_CHILD_NAME_CHARS + 1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn name_at_limit_accepted() {
        let mut req = request(5);
        req.child_name = "x".repeat(MAX_CHILD_NAME_CHARS);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn overlong_theme_rejected() {
        let mut req = request(5);
        req.theme = Some("t".repeat(MAX_THEME_CHARS + 1));
        assert!(req.validate().is_err());
    }

    #[test]
    fn overlong_custom_elements_rejected() {
        let mut req = request(5);
        req.custom_elements = Some("c".repeat(MAX_CUSTOM_ELEMENTS_CHARS + 1));
        assert!(req.validate().is_err());
    }
}
