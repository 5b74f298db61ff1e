// scrapeqa-core/src/domain/qa/report.rs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::root_cause::analyze_root_causes;
use crate::domain::rounding::round_to;

// ── Check Results ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    ItemCountConsistency,
    BidirectionalReferences,
    TimestampConsistency,
    FieldCompletenessAlignment,
}

impl CheckKind {
    /// Run order of the cross-check.
    pub const ALL: [CheckKind; 4] = [
        CheckKind::ItemCountConsistency,
        CheckKind::BidirectionalReferences,
        CheckKind::TimestampConsistency,
        CheckKind::FieldCompletenessAlignment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckKind::ItemCountConsistency => "item_count_consistency",
            CheckKind::BidirectionalReferences => "bidirectional_references",
            CheckKind::TimestampConsistency => "timestamp_consistency",
            CheckKind::FieldCompletenessAlignment => "field_completeness_alignment",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    pub fn is_pass(self) -> bool {
        self == CheckStatus::Pass
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => f.write_str("PASS"),
            CheckStatus::Fail => f.write_str("FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidTimestamp {
    pub item_index: usize,
    pub item_timestamp: Option<String>,
    pub deviation_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMismatch {
    pub field: String,
    pub reported: f64,
    pub actual: f64,
    pub difference: f64,
}

/// Payload of a check. Each variant serializes to the flat JSON object
/// consumers of the report expect for that check outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CheckDetails {
    ItemCountWithin {
        reported: u64,
        actual: u64,
        variance: f64,
    },
    ItemCountExceeded {
        reported: u64,
        actual: u64,
        variance_pct: f64,
        variance_abs: u64,
        tolerance_pct: f64,
        tolerance_abs: u64,
    },
    ReferencesMatched {
        items_file: String,
        metadata_file: String,
    },
    WrongMetadataReference {
        items_references: Option<String>,
        actual_metadata_file: String,
        error: String,
    },
    WrongItemsReference {
        metadata_references: Option<String>,
        actual_items_file: String,
        error: String,
    },
    TimestampsWithin {
        max_deviation_seconds: f64,
        tolerance_seconds: u64,
    },
    TimestampsOutside {
        invalid_items: Vec<InvalidTimestamp>,
        total_invalid: usize,
        max_deviation_seconds: f64,
        tolerance_seconds: u64,
    },
    CompletenessAligned {
        max_difference: f64,
        tolerance: f64,
    },
    CompletenessMismatched {
        mismatches: Vec<FieldMismatch>,
        max_difference: f64,
        tolerance: f64,
    },
    /// The check could not be computed (missing field, no items).
    Unavailable { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub check_name: CheckKind,
    pub status: CheckStatus,
    pub details: CheckDetails,
}

impl CheckResult {
    pub fn pass(check_name: CheckKind, details: CheckDetails) -> Self {
        Self {
            check_name,
            status: CheckStatus::Pass,
            details,
        }
    }

    pub fn fail(check_name: CheckKind, details: CheckDetails) -> Self {
        Self {
            check_name,
            status: CheckStatus::Fail,
            details,
        }
    }

    pub fn unavailable(check_name: CheckKind, error: impl Into<String>) -> Self {
        Self::fail(
            check_name,
            CheckDetails::Unavailable {
                error: error.into(),
            },
        )
    }
}

// ── Root Causes ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootCauseIssue {
    PaginationEndCondition,
    DuplicateItems,
    SelectorAccuracy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootCause {
    pub issue: RootCauseIssue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub description: String,
    pub recommendation: String,
}

// ── Report ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct QaReport {
    pub status: CheckStatus,
    #[serde(serialize_with = "serialize_checks")]
    pub checks: Vec<CheckResult>,
    pub data_quality_score: f64,
    pub timestamp: String,
    pub root_cause_analysis: Option<Vec<RootCause>>,
    pub recommended_actions: Option<Vec<String>>,
}

impl QaReport {
    /// Builds the final report from the results of a full run. The report is
    /// not meant to be modified afterwards.
    pub fn assemble(checks: Vec<CheckResult>, generated_at: DateTime<Utc>) -> Self {
        let status = if checks.iter().all(|c| c.status.is_pass()) {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        };

        // null tant qu'aucune cause n'est dérivée, y compris sur FAIL
        let causes = match status {
            CheckStatus::Pass => Vec::new(),
            CheckStatus::Fail => analyze_root_causes(&checks),
        };
        let (root_cause_analysis, recommended_actions) = if causes.is_empty() {
            (None, None)
        } else {
            let actions = causes.iter().map(|c| c.recommendation.clone()).collect();
            (Some(causes), Some(actions))
        };

        Self {
            status,
            data_quality_score: data_quality_score(&checks),
            checks,
            timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            root_cause_analysis,
            recommended_actions,
        }
    }

    pub fn check(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.check_name == kind)
    }

    pub fn passed(&self) -> bool {
        self.status.is_pass()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Percentage of passing checks, one decimal. An empty run scores 0.
pub fn data_quality_score(checks: &[CheckResult]) -> f64 {
    if checks.is_empty() {
        return 0.0;
    }
    let passed = checks.iter().filter(|c| c.status.is_pass()).count();
    round_to(passed as f64 / checks.len() as f64 * 100.0, 1)
}

// Keyed by check name, in run order.
fn serialize_checks<S: Serializer>(checks: &[CheckResult], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(checks.len()))?;
    for check in checks {
        map.serialize_entry(check.check_name.as_str(), check)?;
    }
    map.end()
}
