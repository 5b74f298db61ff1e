// scrapeqa-core/src/domain/qa/thresholds.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::DomainError;

/// Tolerances applied by the cross-check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct QaThresholds {
    /// Fraction of the reported count (0.02 = 2%).
    #[validate(range(min = 0.0, max = 1.0))]
    pub item_count_variance: f64,

    /// Number of items.
    pub item_count_absolute: u64,

    pub timestamp_deviation_seconds: u64,

    /// Fraction, compared against percentage points (0.05 = 5 points).
    #[validate(range(min = 0.0, max = 1.0))]
    pub field_completeness_variance: f64,
}

impl Default for QaThresholds {
    fn default() -> Self {
        Self {
            item_count_variance: 0.02,
            item_count_absolute: 3,
            timestamp_deviation_seconds: 60,
            field_completeness_variance: 0.05,
        }
    }
}

impl QaThresholds {
    pub fn checked(self) -> Result<Self, DomainError> {
        self.validate()?;
        Ok(self)
    }
}

/// Parses a percentage tolerance such as `"2%"`, `"2"` or `"0.5%"` into a
/// fraction (`0.02`, `0.02`, `0.005`).
pub fn parse_tolerance(raw: &str) -> Result<f64, DomainError> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    let percent: f64 = number
        .parse()
        .map_err(|_| DomainError::InvalidTolerance(raw.to_string()))?;

    if !percent.is_finite() || percent < 0.0 {
        return Err(DomainError::InvalidTolerance(raw.to_string()));
    }

    Ok(percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = QaThresholds::default();
        assert_eq!(t.item_count_variance, 0.02);
        assert_eq!(t.item_count_absolute, 3);
        assert_eq!(t.timestamp_deviation_seconds, 60);
        assert_eq!(t.field_completeness_variance, 0.05);
        assert!(t.checked().is_ok());
    }

    #[test]
    fn test_parse_tolerance() {
        assert_eq!(parse_tolerance("2%").ok(), Some(0.02));
        assert_eq!(parse_tolerance("2").ok(), Some(0.02));
        assert_eq!(parse_tolerance(" 10 % ").ok(), Some(0.1));
        assert!(parse_tolerance("abc").is_err());
        assert!(parse_tolerance("-1%").is_err());
    }

    #[test]
    fn test_out_of_range_fraction_is_rejected() {
        let t = QaThresholds {
            field_completeness_variance: 1.5,
            ..QaThresholds::default()
        };
        assert!(matches!(t.checked(), Err(DomainError::InvalidThresholds(_))));
    }
}
