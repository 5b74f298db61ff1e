// scrapeqa-core/src/domain/scrape/models.rs
//
// Typed schema of the artifacts written by the scraper templates.
// The cross-check never goes through these (it reads raw JSON defensively);
// they back the strict `validate` / `quality` use cases.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use super::completeness::FieldCompleteness;
use super::naming::{ITEMS_FILE_PATTERN, METADATA_FILE_PATTERN};
use super::timestamp::parse_timestamp;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ScrapingMethod {
    Api,
    Browser,
}

// --- ITEMS ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Price {
    #[validate(range(min = 0.0, message = "price amount must not be negative"))]
    pub amount: f64,

    #[validate(length(equal = 3, message = "currency must be a 3-letter ISO 4217 code"))]
    pub currency: String,

    #[serde(default)]
    pub display_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScrapedItem {
    #[serde(default)]
    pub id: Option<String>,

    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,

    #[validate(nested)]
    #[serde(default)]
    pub price: Option<Price>,

    #[serde(default)]
    pub image_urls: Vec<String>,

    pub url: String,

    #[serde(default)]
    pub description: Option<String>,

    #[validate(custom(function = "validate_iso8601"))]
    pub scraped_at: String,
}

impl ScrapedItem {
    /// Deserializes and validates one raw item. The error is a flat,
    /// human-readable message.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let item: ScrapedItem = serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
        item.validate().map_err(|e| e.to_string())?;
        Ok(item)
    }

    /// Extra checks applied in strict mode, as warnings.
    pub fn strict_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.title.trim().is_empty() {
            warnings.push("title is empty or whitespace");
        }
        if self.price.as_ref().is_some_and(|p| p.amount <= 0.0) {
            warnings.push("price amount is zero or negative");
        }
        if self.image_urls.is_empty() {
            warnings.push("no image URLs");
        }
        warnings
    }
}

/// Envelope of an items file. Items stay raw so that each one is reported
/// on its own by the item schema.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemsOutput {
    #[validate(length(min = 1, message = "metadata_file cannot be empty"))]
    pub metadata_file: String,

    pub items: Vec<Value>,
}

impl ItemsOutput {
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let output: ItemsOutput =
            serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
        output.validate().map_err(|e| e.to_string())?;
        Ok(output)
    }
}

// --- METADATA ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScrapingSession {
    #[validate(custom(function = "validate_http_url"))]
    pub source_url: String,

    #[validate(length(min = 1))]
    pub source_name: String,

    #[validate(custom(function = "validate_iso8601"))]
    pub scrape_timestamp_start: String,

    #[validate(custom(function = "validate_iso8601"))]
    pub scrape_timestamp_end: String,

    #[validate(range(exclusive_min = 0.0, message = "duration must be positive"))]
    pub duration_seconds: f64,

    pub scraping_method: ScrapingMethod,

    #[serde(default = "default_page_type")]
    pub page_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaginationInfo {
    #[serde(rename = "type")]
    pub pagination_type: String,

    #[validate(range(min = 1))]
    #[serde(default)]
    pub total_pages: Option<u32>,

    #[validate(range(min = 1))]
    #[serde(default)]
    pub items_per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemsSummary {
    pub total_items_found: u64,
    pub items_successfully_scraped: u64,
    #[serde(default)]
    pub items_with_errors: u64,

    #[validate(range(min = 0.0, max = 100.0))]
    pub data_quality_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationNotes {
    #[serde(default)]
    pub api_endpoints_found: Vec<String>,
    pub api_used: bool,
    #[serde(default)]
    pub fallback_reason: Option<String>,
    #[serde(default)]
    pub platform_detected: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutputFiles {
    #[validate(regex(path = *ITEMS_FILE_PATTERN, message = "expected <name>_items_YYYYMMDD_HHMMSS.json"))]
    pub items_file: String,

    #[validate(regex(path = *METADATA_FILE_PATTERN, message = "expected <name>_metadata_YYYYMMDD_HHMMSS.json"))]
    pub metadata_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MetadataOutput {
    #[validate(nested)]
    pub scraping_session: ScrapingSession,

    #[validate(nested)]
    pub pagination_info: PaginationInfo,

    #[validate(nested)]
    pub items_summary: ItemsSummary,

    #[validate(nested)]
    pub field_completeness: FieldCompleteness,

    pub investigation_notes: InvestigationNotes,

    #[validate(nested)]
    pub output_files: OutputFiles,
}

impl MetadataOutput {
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let metadata: MetadataOutput =
            serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
        metadata.validate().map_err(|e| e.to_string())?;
        Ok(metadata)
    }
}

fn default_page_type() -> String {
    "listing_page".to_string()
}

fn validate_iso8601(value: &str) -> Result<(), ValidationError> {
    if parse_timestamp(value).is_some() {
        return Ok(());
    }
    Err(ValidationError::new("iso8601")
        .with_message(Cow::Owned(format!("Invalid ISO 8601 timestamp: {value}"))))
}

fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let has_host = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if has_host {
        return Ok(());
    }
    Err(ValidationError::new("url").with_message(Cow::Borrowed("expected an http(s) URL")))
}
