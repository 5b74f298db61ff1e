// scrapeqa-core/src/domain/qa/checks/completeness.rs

use serde_json::Value;
use tracing::warn;

use crate::domain::qa::input::CrossCheckInput;
use crate::domain::qa::report::{CheckDetails, CheckKind, CheckResult, FieldMismatch};
use crate::domain::qa::thresholds::QaThresholds;
use crate::domain::rounding::round_to;
use crate::domain::scrape::{PresenceRule, TRACKED_FIELDS, measure_completeness};

const KIND: CheckKind = CheckKind::FieldCompletenessAlignment;

/// Self-reported field completeness vs. completeness measured on the items.
pub fn check_field_completeness_alignment(
    input: &CrossCheckInput,
    thresholds: &QaThresholds,
) -> CheckResult {
    let Some(items) = input.item_list() else {
        return CheckResult::unavailable(KIND, "Items file has no 'items' list");
    };
    if items.is_empty() {
        return CheckResult::unavailable(KIND, "No items to validate");
    }
    let Some(reported) = input.reported_completeness() else {
        return CheckResult::unavailable(KIND, "Metadata file is missing field_completeness");
    };

    let actual = measure_completeness(items, PresenceRule::Structural);
    let allowed = thresholds.field_completeness_variance * 100.0;

    let mut mismatches = Vec::new();
    let mut max_difference: f64 = 0.0;

    for field in TRACKED_FIELDS {
        let Some(reported_pct) = reported.get(field).and_then(Value::as_f64) else {
            warn!(field, "reported completeness missing or not numeric, skipping");
            continue;
        };
        let actual_pct = actual.get(field).unwrap_or_default();
        let difference = (reported_pct - actual_pct).abs();
        max_difference = max_difference.max(difference);

        if difference > allowed {
            mismatches.push(FieldMismatch {
                field: field.to_string(),
                reported: round_to(reported_pct, 2),
                actual: round_to(actual_pct, 2),
                difference: round_to(difference, 2),
            });
        }
    }

    let max_difference = round_to(max_difference, 2);
    let tolerance = round_to(allowed, 2);

    if mismatches.is_empty() {
        return CheckResult::pass(
            KIND,
            CheckDetails::CompletenessAligned {
                max_difference,
                tolerance,
            },
        );
    }

    CheckResult::fail(
        KIND,
        CheckDetails::CompletenessMismatched {
            mismatches,
            max_difference,
            tolerance,
        },
    )
}
