// scrapeqa-core/src/domain/qa/checks/references.rs

use crate::domain::qa::input::CrossCheckInput;
use crate::domain::qa::report::{CheckDetails, CheckKind, CheckResult};

const KIND: CheckKind = CheckKind::BidirectionalReferences;

/// Items → metadata first, then metadata → items. The first broken
/// direction is reported.
pub fn check_bidirectional_references(input: &CrossCheckInput) -> CheckResult {
    let actual_metadata_file = input.metadata_file_name();
    let referenced_metadata = input.referenced_metadata_file();

    if referenced_metadata != Some(actual_metadata_file.as_str()) {
        return CheckResult::fail(
            KIND,
            CheckDetails::WrongMetadataReference {
                items_references: referenced_metadata.map(str::to_string),
                actual_metadata_file,
                error: "Items file references wrong metadata file".to_string(),
            },
        );
    }

    let actual_items_file = input.items_file_name();
    let referenced_items = input.referenced_items_file();

    if referenced_items != Some(actual_items_file.as_str()) {
        return CheckResult::fail(
            KIND,
            CheckDetails::WrongItemsReference {
                metadata_references: referenced_items.map(str::to_string),
                actual_items_file,
                error: "Metadata file references wrong items file".to_string(),
            },
        );
    }

    CheckResult::pass(
        KIND,
        CheckDetails::ReferencesMatched {
            items_file: actual_items_file,
            metadata_file: actual_metadata_file,
        },
    )
}
