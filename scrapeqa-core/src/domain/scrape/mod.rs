// scrapeqa-core/src/domain/scrape/mod.rs
//
// Scraper output artifacts: schema models, naming rules and completeness scoring.

pub mod completeness;
pub mod models;
pub mod naming;
pub mod schema;
pub mod timestamp;

pub use completeness::{
    FieldCompleteness, PresenceRule, QualityAssessment, TRACKED_FIELDS, measure_completeness,
    weighted_quality_score,
};
pub use models::{ItemsOutput, MetadataOutput, Price, ScrapedItem, ScrapingMethod};
pub use naming::paired_metadata_name;
pub use schema::{
    ItemsDocument, cross_reference_errors, ellipsize, item_schema_errors, truncate_chars,
    validate_items,
};
pub use timestamp::parse_timestamp;
