// scrapeqa-core/src/application/crosscheck.rs

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::qa::{CrossCheckInput, QaReport, QaThresholds, run_checks};
use crate::domain::scrape::paired_metadata_name;
use crate::error::ScrapeQaError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::DocumentSource;

/// Loads both artifacts, runs the four checks and assembles the report.
///
/// Loading errors are fatal; check failures are part of the report.
#[instrument(skip(source, thresholds))]
pub async fn run_crosscheck(
    source: &dyn DocumentSource,
    items_path: &Path,
    metadata_path: &Path,
    thresholds: QaThresholds,
) -> Result<QaReport, ScrapeQaError> {
    let thresholds = thresholds.checked()?;

    // 1. LOAD (les deux fichiers en parallèle)
    let (items, metadata) =
        futures::try_join!(source.load(items_path), source.load(metadata_path))?;

    // 2. CHECKS
    let input = CrossCheckInput::new(items, metadata, items_path, metadata_path);
    let report = evaluate(&input, &thresholds, Utc::now());

    if report.passed() {
        info!(score = report.data_quality_score, "QA cross-check passed");
    } else {
        warn!(
            score = report.data_quality_score,
            root_causes = report.root_cause_analysis.as_ref().map_or(0, Vec::len),
            "QA cross-check failed"
        );
    }

    Ok(report)
}

/// Pure part of the cross-check, once both documents are in memory.
pub fn evaluate(
    input: &CrossCheckInput,
    thresholds: &QaThresholds,
    generated_at: DateTime<Utc>,
) -> QaReport {
    QaReport::assemble(run_checks(input, thresholds), generated_at)
}

/// Metadata file paired with `items_path`, in the same directory.
pub fn derive_metadata_path(items_path: &Path) -> Result<PathBuf, ScrapeQaError> {
    let name = items_path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(paired_metadata_name)
        .ok_or_else(|| {
            InfrastructureError::MetadataPathUnderivable(items_path.display().to_string())
        })?;
    Ok(items_path.with_file_name(name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::qa::{CheckKind, CheckStatus, RootCauseIssue};
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::HashMap;

    struct InMemorySource(HashMap<PathBuf, Value>);

    #[async_trait]
    impl DocumentSource for InMemorySource {
        async fn load(&self, path: &Path) -> Result<Value, InfrastructureError> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| InfrastructureError::InputNotFound(path.display().to_string()))
        }
    }

    const ITEMS: &str = "out/shop_items_20250101_000000.json";
    const METADATA: &str = "out/shop_metadata_20250101_000000.json";

    fn pair(actual: usize, reported: u64) -> InMemorySource {
        let items: Vec<Value> = (0..actual)
            .map(|i| {
                json!({
                    "title": format!("P{i}"),
                    "price": {"amount": 1.0, "currency": "EUR"},
                    "image_urls": ["x"],
                    "description": "d",
                    "scraped_at": "2025-01-01T00:01:00Z"
                })
            })
            .collect();
        let metadata = json!({
            "scraping_session": {
                "scrape_timestamp_start": "2025-01-01T00:00:00Z",
                "scrape_timestamp_end": "2025-01-01T00:02:00Z"
            },
            "items_summary": {"total_items_found": reported},
            "field_completeness": {"title": 100, "price": 100, "image_urls": 100, "description": 100},
            "output_files": {"items_file": "shop_items_20250101_000000.json"}
        });
        InMemorySource(HashMap::from([
            (
                PathBuf::from(ITEMS),
                json!({"metadata_file": "shop_metadata_20250101_000000.json", "items": items}),
            ),
            (PathBuf::from(METADATA), metadata),
        ]))
    }

    #[tokio::test]
    async fn test_consistent_pair_passes() -> anyhow::Result<()> {
        let report = run_crosscheck(
            &pair(100, 100),
            Path::new(ITEMS),
            Path::new(METADATA),
            QaThresholds::default(),
        )
        .await?;
        assert!(report.passed());
        assert_eq!(report.data_quality_score, 100.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_short_scrape_fails_with_pagination_cause() -> anyhow::Result<()> {
        let report = run_crosscheck(
            &pair(95, 100),
            Path::new(ITEMS),
            Path::new(METADATA),
            QaThresholds::default(),
        )
        .await?;
        assert_eq!(report.status, CheckStatus::Fail);
        assert_eq!(report.data_quality_score, 75.0);
        assert_eq!(
            report.check(CheckKind::ItemCountConsistency).map(|c| c.status),
            Some(CheckStatus::Fail)
        );
        let causes = report.root_cause_analysis.unwrap();
        assert_eq!(causes[0].issue, RootCauseIssue::PaginationEndCondition);
        assert_eq!(report.recommended_actions.map(|a| a.len()), Some(causes.len()));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_document_is_an_input_error() {
        let err = run_crosscheck(
            &pair(1, 1),
            Path::new(ITEMS),
            Path::new("out/absent.json"),
            QaThresholds::default(),
        )
        .await
        .unwrap_err();
        assert!(err.is_input_error());
    }

    #[tokio::test]
    async fn test_invalid_thresholds_are_rejected_before_loading() {
        let thresholds = QaThresholds {
            item_count_variance: 2.0,
            ..QaThresholds::default()
        };
        let err = run_crosscheck(
            &InMemorySource(HashMap::new()),
            Path::new(ITEMS),
            Path::new(METADATA),
            thresholds,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScrapeQaError::Domain(_)));
    }

    #[test]
    fn test_derive_metadata_path() {
        assert_eq!(
            derive_metadata_path(Path::new(ITEMS)).unwrap(),
            PathBuf::from(METADATA)
        );
        let err = derive_metadata_path(Path::new("out/items.json")).unwrap_err();
        assert!(err.is_input_error());
        assert!(matches!(
            &err,
            ScrapeQaError::Infrastructure(InfrastructureError::MetadataPathUnderivable(p))
                if p == "out/items.json"
        ));
        assert!(err.to_string().starts_with("Cannot derive a metadata file"));
    }
}
