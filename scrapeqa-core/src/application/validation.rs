// scrapeqa-core/src/application/validation.rs

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::domain::scrape::{
    FieldCompleteness, ItemsDocument, ItemsOutput, MetadataOutput, PresenceRule, QualityAssessment,
    cross_reference_errors, ellipsize, measure_completeness, validate_items,
    weighted_quality_score,
};
use crate::error::ScrapeQaError;
use crate::ports::DocumentSource;

const MAX_ITEM_ERROR_LEN: usize = 150;

/// Below this weighted score, the output is rejected.
pub const MIN_QUALITY_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SchemaValidation {
    pub passed: bool,
    pub errors: Vec<String>,
}

impl SchemaValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            passed: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemsValidationReport {
    pub file: String,
    pub schema_validation: SchemaValidation,
    pub total_items: Option<usize>,
    pub field_completeness: Option<FieldCompleteness>,
    pub quality_score: Option<f64>,
    pub quality_assessment: Option<QualityAssessment>,
    pub metadata_file_ref: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetadataValidationReport {
    pub file: String,
    pub schema_validation: SchemaValidation,
    pub items_file_ref: Option<String>,
    pub quality_score_from_metadata: Option<f64>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputValidation {
    pub items: ItemsValidationReport,
    pub metadata: Option<MetadataValidationReport>,
    pub cross_reference_errors: Vec<String>,
}

impl OutputValidation {
    /// Both schemas valid and a weighted score of at least 50.
    ///
    /// Cross-reference problems are reported but do not reject the output.
    pub fn passed(&self) -> bool {
        let metadata_passed = self
            .metadata
            .as_ref()
            .is_none_or(|m| m.schema_validation.passed);
        self.items.schema_validation.passed
            && metadata_passed
            && self
                .items
                .quality_score
                .is_some_and(|score| score >= MIN_QUALITY_SCORE)
    }
}

/// Validates an items file and, when given, its metadata file.
#[instrument(skip(source))]
pub async fn validate_outputs(
    source: &dyn DocumentSource,
    items_path: &Path,
    metadata_path: Option<&Path>,
    strict: bool,
) -> Result<OutputValidation, ScrapeQaError> {
    let items_raw = source.load(items_path).await?;
    let items = validate_items_document(&items_raw, items_path, strict);

    let (metadata, cross_reference_errors) = match metadata_path {
        Some(path) => {
            let metadata_raw = source.load(path).await?;
            let metadata = validate_metadata_document(&metadata_raw, path);
            let errors = cross_reference_errors(
                items.metadata_file_ref.as_deref(),
                &file_name(path),
                metadata.items_file_ref.as_deref(),
                &file_name(items_path),
            );
            (Some(metadata), errors)
        }
        None => (None, Vec::new()),
    };

    let validation = OutputValidation {
        items,
        metadata,
        cross_reference_errors,
    };

    if validation.passed() {
        info!(score = ?validation.items.quality_score, "Output validation passed");
    } else {
        warn!(score = ?validation.items.quality_score, "Output validation failed");
    }
    Ok(validation)
}

pub fn validate_items_document(raw: &Value, path: &Path, strict: bool) -> ItemsValidationReport {
    let mut report = ItemsValidationReport {
        file: path.display().to_string(),
        schema_validation: SchemaValidation::from_errors(Vec::new()),
        total_items: None,
        field_completeness: None,
        quality_score: None,
        quality_assessment: None,
        metadata_file_ref: None,
        timestamp: now(),
    };

    let document = match ItemsDocument::parse(raw) {
        Ok(doc) => doc,
        Err(e) => {
            report.schema_validation = SchemaValidation::from_errors(vec![e.to_string()]);
            return report;
        }
    };

    // Les métriques sont calculées même si le schéma échoue
    let completeness = measure_completeness(document.items, PresenceRule::Content);
    let score = weighted_quality_score(&completeness);

    // L'enveloppe {metadata_file, items} n'est exigée que pour un objet
    let mut errors: Vec<String> = raw
        .is_object()
        .then(|| ItemsOutput::from_value(raw).err())
        .flatten()
        .map(|e| format!("Items file: {}", ellipsize(&e, MAX_ITEM_ERROR_LEN)))
        .into_iter()
        .collect();
    errors.extend(validate_items(document.items, strict, MAX_ITEM_ERROR_LEN));

    report.schema_validation = SchemaValidation::from_errors(errors);
    report.total_items = Some(document.items.len());
    report.field_completeness = Some(completeness);
    report.quality_score = Some(score);
    report.quality_assessment = Some(QualityAssessment::from_score(score));
    report.metadata_file_ref = document.metadata_file.map(str::to_string);
    report
}

pub fn validate_metadata_document(raw: &Value, path: &Path) -> MetadataValidationReport {
    let (schema_validation, quality) = match MetadataOutput::from_value(raw) {
        Ok(metadata) => (
            SchemaValidation::from_errors(Vec::new()),
            Some(metadata.items_summary.data_quality_percentage),
        ),
        Err(e) => (
            SchemaValidation::from_errors(vec![format!(
                "Validation error: {}",
                ellipsize(&e, MAX_ITEM_ERROR_LEN)
            )]),
            None,
        ),
    };

    MetadataValidationReport {
        file: path.display().to_string(),
        schema_validation,
        items_file_ref: raw
            .pointer("/output_files/items_file")
            .and_then(Value::as_str)
            .map(str::to_string),
        quality_score_from_metadata: quality,
        timestamp: now(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
