// scrapeqa-core/src/domain/scrape/completeness.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::rounding::round_to;

/// Fields whose completeness is tracked, in report order.
pub const TRACKED_FIELDS: [&str; 4] = ["title", "price", "image_urls", "description"];

/// What counts as "present" when measuring completeness.
///
/// The cross-check compares against what scrapers self-report, which is the
/// structural rule. Output validation uses the stricter content rule, the
/// post-scraping report the truthy one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceRule {
    /// Not null, not an empty string, not an empty list.
    Structural,
    /// Non-blank text, a price with a positive amount, at least one image.
    Content,
    /// Structural, plus `false`, `0` and `{}` count as missing.
    Truthy,
}

impl PresenceRule {
    pub fn is_present(self, item: &Value, field: &str) -> bool {
        let Some(value) = item.get(field) else {
            return false;
        };

        match self {
            PresenceRule::Structural => match value {
                Value::Null => false,
                Value::String(s) => !s.is_empty(),
                Value::Array(a) => !a.is_empty(),
                _ => true,
            },
            PresenceRule::Truthy => match value {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
                Value::String(s) => !s.is_empty(),
                Value::Array(a) => !a.is_empty(),
                Value::Object(o) => !o.is_empty(),
            },
            PresenceRule::Content => match field {
                "price" => value
                    .get("amount")
                    .and_then(Value::as_f64)
                    .is_some_and(|amount| amount > 0.0),
                "image_urls" => value.as_array().is_some_and(|urls| !urls.is_empty()),
                _ => value.as_str().is_some_and(|s| !s.trim().is_empty()),
            },
        }
    }
}

/// Percentage (0-100) of items carrying each tracked field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, PartialEq, Default)]
pub struct FieldCompleteness {
    #[validate(range(min = 0.0, max = 100.0))]
    pub title: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub price: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub image_urls: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub description: f64,
}

impl FieldCompleteness {
    pub fn get(&self, field: &str) -> Option<f64> {
        match field {
            "title" => Some(self.title),
            "price" => Some(self.price),
            "image_urls" => Some(self.image_urls),
            "description" => Some(self.description),
            _ => None,
        }
    }
}

pub fn measure_completeness(items: &[Value], rule: PresenceRule) -> FieldCompleteness {
    if items.is_empty() {
        return FieldCompleteness::default();
    }

    let total = items.len() as f64;
    let pct = |field: &str| {
        let present = items
            .iter()
            .filter(|item| rule.is_present(item, field))
            .count();
        present as f64 / total * 100.0
    };

    FieldCompleteness {
        title: pct("title"),
        price: pct("price"),
        image_urls: pct("image_urls"),
        description: pct("description"),
    }
}

/// Weighted score: title 30%, price 30%, images 20%, description 20%.
pub fn weighted_quality_score(completeness: &FieldCompleteness) -> f64 {
    let score = completeness.title * 0.3
        + completeness.price * 0.3
        + completeness.image_urls * 0.2
        + completeness.description * 0.2;
    round_to(score, 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QualityAssessment {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl QualityAssessment {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 75.0 {
            Self::Good
        } else if score >= 60.0 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}
