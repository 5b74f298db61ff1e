// scrapeqa-core/src/domain/qa/input.rs
//
// Defensive read access over the two raw documents. Every accessor returns
// `None` instead of failing so that each check can report what it is missing
// while the others still run.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::domain::scrape::parse_timestamp;

#[derive(Debug, Clone)]
pub struct CrossCheckInput {
    pub items: Value,
    pub metadata: Value,
    pub items_path: PathBuf,
    pub metadata_path: PathBuf,
}

impl CrossCheckInput {
    pub fn new(
        items: Value,
        metadata: Value,
        items_path: impl Into<PathBuf>,
        metadata_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            items,
            metadata,
            items_path: items_path.into(),
            metadata_path: metadata_path.into(),
        }
    }

    pub fn item_list(&self) -> Option<&[Value]> {
        self.items.get("items")?.as_array().map(Vec::as_slice)
    }

    pub fn reported_total(&self) -> Option<u64> {
        self.metadata
            .pointer("/items_summary/total_items_found")
            .and_then(Value::as_u64)
    }

    /// `metadata_file` as written in the items document.
    pub fn referenced_metadata_file(&self) -> Option<&str> {
        self.items.get("metadata_file").and_then(Value::as_str)
    }

    /// `output_files.items_file` as written in the metadata document.
    pub fn referenced_items_file(&self) -> Option<&str> {
        self.metadata
            .pointer("/output_files/items_file")
            .and_then(Value::as_str)
    }

    pub fn session_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let bound = |name: &str| {
            self.metadata
                .pointer(&format!("/scraping_session/{name}"))
                .and_then(Value::as_str)
                .and_then(parse_timestamp)
        };
        Some((bound("scrape_timestamp_start")?, bound("scrape_timestamp_end")?))
    }

    pub fn reported_completeness(&self) -> Option<&Map<String, Value>> {
        self.metadata.get("field_completeness")?.as_object()
    }

    pub fn items_file_name(&self) -> String {
        file_name(&self.items_path)
    }

    pub fn metadata_file_name(&self) -> String {
        file_name(&self.metadata_path)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors_on_partial_documents() {
        let input = CrossCheckInput::new(
            json!({"items": "not a list"}),
            json!({"items_summary": {"total_items_found": -4}}),
            "out/a_items_20250101_000000.json",
            "out/b.json",
        );
        assert!(input.item_list().is_none());
        assert!(input.reported_total().is_none());
        assert!(input.referenced_metadata_file().is_none());
        assert!(input.session_window().is_none());
        assert!(input.reported_completeness().is_none());
        assert_eq!(input.items_file_name(), "a_items_20250101_000000.json");
        assert_eq!(input.metadata_file_name(), "b.json");
    }
}
