// scrapeqa-core/src/domain/qa/root_cause.rs
//
// Rule-based diagnosis, derived only from the failed checks' payloads.

use super::report::{CheckDetails, CheckResult, CheckStatus, RootCause, RootCauseIssue};

pub fn analyze_root_causes(checks: &[CheckResult]) -> Vec<RootCause> {
    let mut root_causes = Vec::new();

    for check in checks.iter().filter(|c| c.status == CheckStatus::Fail) {
        match &check.details {
            CheckDetails::ItemCountExceeded {
                reported, actual, ..
            } => {
                if actual < reported {
                    root_causes.push(RootCause {
                        issue: RootCauseIssue::PaginationEndCondition,
                        field: None,
                        description: format!(
                            "Pagination logic stopped early (missing {} items)",
                            reported - actual
                        ),
                        recommendation: "Review pagination end condition in scraper code"
                            .to_string(),
                    });
                } else if actual > reported {
                    root_causes.push(RootCause {
                        issue: RootCauseIssue::DuplicateItems,
                        field: None,
                        description: format!(
                            "More items scraped than expected ({} extra)",
                            actual - reported
                        ),
                        recommendation: "Check for duplicate items or incorrect counting logic"
                            .to_string(),
                    });
                }
            }
            CheckDetails::CompletenessMismatched { mismatches, .. } => {
                for mismatch in mismatches {
                    let field = &mismatch.field;
                    root_causes.push(RootCause {
                        issue: RootCauseIssue::SelectorAccuracy,
                        field: Some(field.clone()),
                        description: format!("Selector for '{field}' not matching all variants"),
                        recommendation: format!("Add fallback selector for {field} field"),
                    });
                }
            }
            _ => {}
        }
    }

    root_causes
}
