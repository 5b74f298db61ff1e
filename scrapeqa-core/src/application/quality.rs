// scrapeqa-core/src/application/quality.rs

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::{instrument, warn};

use crate::domain::rounding::round_to;
use crate::domain::scrape::{
    FieldCompleteness, ItemsDocument, PresenceRule, QualityAssessment, item_schema_errors,
    measure_completeness, truncate_chars, weighted_quality_score,
};
use crate::error::ScrapeQaError;
use crate::ports::DocumentSource;

use super::validation::MIN_QUALITY_SCORE;

const REQUIRED_FIELDS: [&str; 3] = ["title", "price", "image_urls"];
const MAX_PROBLEMATIC_ITEMS: usize = 10;
const MAX_SCHEMA_ERRORS: usize = 5;
const MAX_SCHEMA_ERROR_LEN: usize = 100;
const MAX_TITLE_LEN: usize = 50;

/// Hook budget, in milliseconds.
pub const HOOK_TIME_LIMIT_MS: f64 = 5000.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProblematicItem {
    pub item_index: usize,
    pub item_id: String,
    pub missing_fields: Vec<&'static str>,
    pub item_title: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QualitySchemaSummary {
    pub passed: bool,
    pub error_count: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExecutionMetadata {
    pub scraping_duration_seconds: Option<f64>,
    pub hook_execution_time_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub timestamp: String,
    pub items_file: String,
    pub total_items: usize,
    pub field_completeness: FieldCompleteness,
    pub quality_score: f64,
    pub quality_assessment: QualityAssessment,
    pub items_with_missing_fields: usize,
    pub problematic_items: Vec<ProblematicItem>,
    pub schema_validation: QualitySchemaSummary,
    pub execution_metadata: ExecutionMetadata,
}

impl QualityReport {
    pub fn passed(&self) -> bool {
        self.quality_score >= MIN_QUALITY_SCORE && self.schema_validation.error_count == 0
    }
}

#[instrument(skip(source))]
pub async fn run_quality_report(
    source: &dyn DocumentSource,
    items_path: &Path,
    scraping_duration_seconds: Option<f64>,
) -> Result<QualityReport, ScrapeQaError> {
    let raw = source.load(items_path).await?;
    build_quality_report(&raw, items_path, scraping_duration_seconds)
}

pub fn build_quality_report(
    raw: &Value,
    items_path: &Path,
    scraping_duration_seconds: Option<f64>,
) -> Result<QualityReport, ScrapeQaError> {
    let started = Instant::now();
    let items = ItemsDocument::parse(raw)?.items;

    let completeness = measure_completeness(items, PresenceRule::Truthy);
    let quality_score = weighted_quality_score(&completeness);
    let problematic = problematic_items(items);
    let schema_errors = item_schema_errors(items);

    let hook_execution_time_ms = round_to(started.elapsed().as_secs_f64() * 1000.0, 2);
    if hook_execution_time_ms > HOOK_TIME_LIMIT_MS {
        warn!(
            hook_execution_time_ms,
            limit_ms = HOOK_TIME_LIMIT_MS,
            "Post-scraping hook exceeded its time budget"
        );
    }

    Ok(QualityReport {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        items_file: items_path.display().to_string(),
        total_items: items.len(),
        field_completeness: completeness,
        quality_score,
        quality_assessment: QualityAssessment::from_score(quality_score),
        items_with_missing_fields: problematic.len(),
        problematic_items: problematic.into_iter().take(MAX_PROBLEMATIC_ITEMS).collect(),
        schema_validation: QualitySchemaSummary {
            passed: schema_errors.is_empty(),
            error_count: schema_errors.len(),
            errors: schema_errors
                .iter()
                .take(MAX_SCHEMA_ERRORS)
                .map(|(idx, e)| format!("Item {idx}: {}", truncate_chars(e, MAX_SCHEMA_ERROR_LEN)))
                .collect(),
        },
        execution_metadata: ExecutionMetadata {
            scraping_duration_seconds,
            hook_execution_time_ms,
        },
    })
}

fn problematic_items(items: &[Value]) -> Vec<ProblematicItem> {
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            let missing_fields: Vec<&'static str> = REQUIRED_FIELDS
                .into_iter()
                .filter(|field| is_missing(item, field))
                .collect();
            if missing_fields.is_empty() {
                return None;
            }

            let item_id = match item.get("id") {
                Some(Value::String(id)) => id.clone(),
                Some(Value::Null) | None => format!("item_{idx}"),
                Some(other) => other.to_string(),
            };
            let title = item.get("title").and_then(Value::as_str).unwrap_or("(no title)");

            Some(ProblematicItem {
                item_index: idx,
                item_id,
                missing_fields,
                item_title: truncate_chars(title, MAX_TITLE_LEN).to_string(),
            })
        })
        .collect()
}

// null partout ; liste vide pour les images ; texte blanc pour le titre
fn is_missing(item: &Value, field: &str) -> bool {
    match item.get(field) {
        None | Some(Value::Null) => true,
        Some(value) => match field {
            "image_urls" => value.as_array().is_none_or(Vec::is_empty),
            "title" => value.as_str().is_none_or(|t| t.trim().is_empty()),
            _ => false,
        },
    }
}
