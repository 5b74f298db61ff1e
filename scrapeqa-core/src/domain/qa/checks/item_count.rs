// scrapeqa-core/src/domain/qa/checks/item_count.rs

use crate::domain::qa::input::CrossCheckInput;
use crate::domain::qa::report::{CheckDetails, CheckKind, CheckResult};
use crate::domain::qa::thresholds::QaThresholds;
use crate::domain::rounding::round_to;

const KIND: CheckKind = CheckKind::ItemCountConsistency;

/// Reported item count vs. items actually present.
///
/// Fails only when the difference exceeds BOTH the percentage and the
/// absolute tolerance.
pub fn check_item_count_consistency(
    input: &CrossCheckInput,
    thresholds: &QaThresholds,
) -> CheckResult {
    let Some(items) = input.item_list() else {
        return CheckResult::unavailable(KIND, "Items file has no 'items' list");
    };
    let Some(reported) = input.reported_total() else {
        return CheckResult::unavailable(
            KIND,
            "Metadata file is missing items_summary.total_items_found",
        );
    };

    let actual = items.len() as u64;
    let variance_abs = reported.abs_diff(actual);
    let variance_pct = if reported == 0 {
        0.0
    } else {
        variance_abs as f64 / reported as f64
    };

    let tolerance_exceeded = variance_pct > thresholds.item_count_variance
        && variance_abs > thresholds.item_count_absolute;

    if tolerance_exceeded {
        return CheckResult::fail(
            KIND,
            CheckDetails::ItemCountExceeded {
                reported,
                actual,
                variance_pct: round_to(variance_pct * 100.0, 2),
                variance_abs,
                tolerance_pct: round_to(thresholds.item_count_variance * 100.0, 2),
                tolerance_abs: thresholds.item_count_absolute,
            },
        );
    }

    CheckResult::pass(
        KIND,
        CheckDetails::ItemCountWithin {
            reported,
            actual,
            variance: round_to(variance_pct * 100.0, 2),
        },
    )
}
