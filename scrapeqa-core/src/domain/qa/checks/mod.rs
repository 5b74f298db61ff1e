// scrapeqa-core/src/domain/qa/checks/mod.rs
//
// The four consistency checks. Each one is a pure function of the loaded
// documents and the thresholds; none of them aborts the others.

pub mod completeness;
pub mod item_count;
pub mod references;
pub mod timestamps;

pub use completeness::check_field_completeness_alignment;
pub use item_count::check_item_count_consistency;
pub use references::check_bidirectional_references;
pub use timestamps::check_timestamp_consistency;

use super::input::CrossCheckInput;
use super::report::{CheckKind, CheckResult};
use super::thresholds::QaThresholds;

pub fn run_check(kind: CheckKind, input: &CrossCheckInput, thresholds: &QaThresholds) -> CheckResult {
    let result = match kind {
        CheckKind::ItemCountConsistency => check_item_count_consistency(input, thresholds),
        CheckKind::BidirectionalReferences => check_bidirectional_references(input),
        CheckKind::TimestampConsistency => check_timestamp_consistency(input, thresholds),
        CheckKind::FieldCompletenessAlignment => {
            check_field_completeness_alignment(input, thresholds)
        }
    };
    tracing::debug!(check = %kind, status = %result.status, "check finished");
    result
}

/// Runs every check in report order.
pub fn run_checks(input: &CrossCheckInput, thresholds: &QaThresholds) -> Vec<CheckResult> {
    CheckKind::ALL
        .iter()
        .map(|kind| run_check(*kind, input, thresholds))
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    use super::super::input::CrossCheckInput;

    pub const ITEMS_NAME: &str = "shop_items_20250101_000000.json";
    pub const METADATA_NAME: &str = "shop_metadata_20250101_000000.json";

    pub fn item(idx: usize) -> Value {
        json!({
            "id": format!("sku-{idx}"),
            "title": format!("Product {idx}"),
            "price": {"amount": 10.0, "currency": "EUR"},
            "image_urls": [format!("https://cdn.example.com/{idx}.jpg")],
            "url": format!("https://shop.example.com/p/{idx}"),
            "description": "A product",
            "scraped_at": "2025-01-01T00:02:00Z"
        })
    }

    pub fn metadata(total: u64) -> Value {
        json!({
            "scraping_session": {
                "source_url": "https://shop.example.com",
                "source_name": "shop",
                "scrape_timestamp_start": "2025-01-01T00:00:00Z",
                "scrape_timestamp_end": "2025-01-01T00:05:00Z",
                "duration_seconds": 300.0,
                "scraping_method": "browser"
            },
            "items_summary": {
                "total_items_found": total,
                "items_successfully_scraped": total,
                "items_with_errors": 0,
                "data_quality_percentage": 100.0
            },
            "field_completeness": {
                "title": 100.0, "price": 100.0, "image_urls": 100.0, "description": 100.0
            },
            "output_files": {"items_file": ITEMS_NAME, "metadata_file": METADATA_NAME}
        })
    }

    pub fn input_with(items: Vec<Value>, metadata: Value) -> CrossCheckInput {
        CrossCheckInput::new(
            json!({"metadata_file": METADATA_NAME, "items": items}),
            metadata,
            format!("out/{ITEMS_NAME}"),
            format!("out/{METADATA_NAME}"),
        )
    }

    /// Consistent pair of `count` items.
    pub fn consistent(count: usize) -> CrossCheckInput {
        input_with((0..count).map(item).collect(), metadata(count as u64))
    }
}
