//! Target-count extraction from skill description text.
//!
//! The EN skill descriptions state target counts in one of two narrow
//! phrasings, selected by the skill's range icon:
//!
//! - exact count: `<digit> ally|allies|enemies`, e.g. "Deal damage to 3 enemies"
//! - ranged count: `<digit> to|or <digit>`, e.g. "Heal 2 to 4 allies"
//!
//! Anything outside that grammar is a hard failure for the record: the
//! caller reports it against the skill id and leaves targets unset instead
//! of guessing.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EXACT_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d) (?:ally|allies|enemies)").expect("exact-count pattern"));

static RANGED_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d) (?:to|or) (\d)").expect("ranged-count pattern"));

/// Inclusive target-count range extracted from a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRange {
    pub min: u32,
    pub max: u32,
}

impl TargetRange {
    /// Single-target range, used when the range icon says so outright.
    pub const SINGLE: Self = Self { min: 1, max: 1 };
}

/// Extraction failure for one description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetParseError {
    #[error("no exact-count phrase in {description:?}")]
    NoExactCount { description: String },

    #[error("no ranged-count phrase in {description:?}")]
    NoRangedCount { description: String },
}

/// Extract an exact target count (`min == max`) from a description.
pub fn exact_count(description: &str) -> Result<TargetRange, TargetParseError> {
    let captures = EXACT_COUNT
        .captures(description)
        .ok_or_else(|| TargetParseError::NoExactCount {
            description: description.to_string(),
        })?;
    let count = digit(&captures[1]);
    Ok(TargetRange {
        min: count,
        max: count,
    })
}

/// Extract a `min to/or max` target range from a description.
pub fn ranged_count(description: &str) -> Result<TargetRange, TargetParseError> {
    let captures = RANGED_COUNT
        .captures(description)
        .ok_or_else(|| TargetParseError::NoRangedCount {
            description: description.to_string(),
        })?;
    Ok(TargetRange {
        min: digit(&captures[1]),
        max: digit(&captures[2]),
    })
}

// Captures are single ASCII digits by construction.
fn digit(capture: &str) -> u32 {
    capture.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_count() {
        let range = exact_count("Deal damage to 3 enemies").unwrap();
        assert_eq!(range, TargetRange { min: 3, max: 3 });

        let range = exact_count("Restores HP of 1 ally.").unwrap();
        assert_eq!(range, TargetRange { min: 1, max: 1 });
    }

    #[test]
    fn test_ranged_count() {
        let range = ranged_count("Heal 2 to 4 allies").unwrap();
        assert_eq!(range, TargetRange { min: 2, max: 4 });

        let range = ranged_count("Deals damage to 1 or 2 enemies.").unwrap();
        assert_eq!(range, TargetRange { min: 1, max: 2 });
    }

    #[test]
    fn test_no_match_is_an_error() {
        let err = exact_count("Greatly raises physical attack.").unwrap_err();
        assert!(matches!(err, TargetParseError::NoExactCount { .. }));

        let err = ranged_count("Deal damage to 3 enemies").unwrap_err();
        assert!(matches!(err, TargetParseError::NoRangedCount { .. }));
    }
}
