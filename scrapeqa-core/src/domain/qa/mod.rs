// scrapeqa-core/src/domain/qa/mod.rs
//
// QA cross-check: consistency between an items document and its metadata.

pub mod checks;
pub mod input;
pub mod report;
pub mod root_cause;
pub mod thresholds;

pub use checks::run_checks;
pub use input::CrossCheckInput;
pub use report::{
    CheckDetails, CheckKind, CheckResult, CheckStatus, FieldMismatch, InvalidTimestamp, QaReport,
    RootCause, RootCauseIssue,
};
pub use root_cause::analyze_root_causes;
pub use thresholds::{QaThresholds, parse_tolerance};
