// scrapeqa-core/src/domain/qa/checks/timestamps.rs

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::qa::input::CrossCheckInput;
use crate::domain::qa::report::{CheckDetails, CheckKind, CheckResult, InvalidTimestamp};
use crate::domain::qa::thresholds::QaThresholds;
use crate::domain::rounding::round_to;
use crate::domain::scrape::parse_timestamp;

const KIND: CheckKind = CheckKind::TimestampConsistency;

/// At most this many offending items are listed in the report.
pub const MAX_REPORTED_INVALID: usize = 10;

/// Seconds between `ts` and the closed window `[start, end]`; 0 inside it.
pub fn deviation_seconds(ts: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = if ts < start {
        start - ts
    } else if ts > end {
        ts - end
    } else {
        return 0.0;
    };
    delta.num_milliseconds() as f64 / 1000.0
}

pub fn check_timestamp_consistency(input: &CrossCheckInput, thresholds: &QaThresholds) -> CheckResult {
    let Some((start, end)) = input.session_window() else {
        return CheckResult::unavailable(
            KIND,
            "Metadata file has a missing or invalid scraping session window",
        );
    };
    let Some(items) = input.item_list() else {
        return CheckResult::unavailable(KIND, "Items file has no 'items' list");
    };

    let tolerance = thresholds.timestamp_deviation_seconds as f64;
    let mut invalid_items = Vec::new();
    let mut max_deviation: f64 = 0.0;

    for (item_index, item) in items.iter().enumerate() {
        let raw = item.get("scraped_at").and_then(Value::as_str);

        let Some(ts) = raw.and_then(parse_timestamp) else {
            invalid_items.push(InvalidTimestamp {
                item_index,
                item_timestamp: raw.map(str::to_string),
                deviation_seconds: None,
                error: Some("missing or unparseable scraped_at".to_string()),
            });
            continue;
        };

        let deviation = deviation_seconds(ts, start, end);
        max_deviation = max_deviation.max(deviation);

        if deviation > tolerance {
            invalid_items.push(InvalidTimestamp {
                item_index,
                item_timestamp: raw.map(str::to_string),
                deviation_seconds: Some(round_to(deviation, 2)),
                error: None,
            });
        }
    }

    let max_deviation_seconds = round_to(max_deviation, 2);
    let tolerance_seconds = thresholds.timestamp_deviation_seconds;

    if invalid_items.is_empty() {
        return CheckResult::pass(
            KIND,
            CheckDetails::TimestampsWithin {
                max_deviation_seconds,
                tolerance_seconds,
            },
        );
    }

    let total_invalid = invalid_items.len();
    invalid_items.truncate(MAX_REPORTED_INVALID);

    CheckResult::fail(
        KIND,
        CheckDetails::TimestampsOutside {
            invalid_items,
            total_invalid,
            max_deviation_seconds,
            tolerance_seconds,
        },
    )
}
