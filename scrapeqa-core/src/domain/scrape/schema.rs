// scrapeqa-core/src/domain/scrape/schema.rs

use serde_json::Value;

use super::models::ScrapedItem;
use crate::domain::error::DomainError;

/// Items file as written by the templates (`{metadata_file, items}`) or as a
/// bare list of items.
#[derive(Debug, Clone, Copy)]
pub struct ItemsDocument<'a> {
    pub items: &'a [Value],
    pub metadata_file: Option<&'a str>,
}

impl<'a> ItemsDocument<'a> {
    pub fn parse(value: &'a Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) => match map.get("items") {
                Some(Value::Array(items)) => Ok(Self {
                    items,
                    metadata_file: map.get("metadata_file").and_then(Value::as_str),
                }),
                _ => Err(DomainError::UnexpectedItemsStructure(
                    "object without an 'items' list".to_string(),
                )),
            },
            Value::Array(items) => Ok(Self {
                items,
                metadata_file: None,
            }),
            other => Err(DomainError::UnexpectedItemsStructure(
                json_type_name(other).to_string(),
            )),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Schema errors for each item, in items order.
pub fn item_schema_errors(items: &[Value]) -> Vec<(usize, String)> {
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, raw)| ScrapedItem::from_value(raw).err().map(|e| (idx, e)))
        .collect()
}

/// Schema validation of a full item list. Messages longer than
/// `max_message_len` chars are cut and suffixed with `...`.
///
/// In strict mode, the item warnings come after the schema errors.
pub fn validate_items(items: &[Value], strict: bool, max_message_len: usize) -> Vec<String> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for (idx, raw) in items.iter().enumerate() {
        match ScrapedItem::from_value(raw) {
            Ok(item) if strict => {
                warnings.extend(
                    item.strict_warnings()
                        .into_iter()
                        .map(|w| format!("Item {idx}: {w}")),
                );
            }
            Ok(_) => {}
            Err(message) => {
                errors.push(format!("Item {idx}: {}", ellipsize(&message, max_message_len)));
            }
        }
    }

    errors.extend(warnings);
    errors
}

/// First `max` chars of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

pub fn ellipsize(s: &str, max: usize) -> String {
    let cut = truncate_chars(s, max);
    if cut.len() < s.len() {
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

/// Human-readable problems with the references between the two files.
pub fn cross_reference_errors(
    metadata_ref: Option<&str>,
    metadata_file_name: &str,
    items_ref: Option<&str>,
    items_file_name: &str,
) -> Vec<String> {
    let mut errors = Vec::new();

    match metadata_ref {
        None | Some("") => errors.push("Items file missing metadata_file reference".to_string()),
        Some(r) if r != metadata_file_name => errors.push(format!(
            "Items file references '{r}' but metadata file is '{metadata_file_name}'"
        )),
        Some(_) => {}
    }

    match items_ref {
        None | Some("") => errors.push("Metadata file missing items_file reference".to_string()),
        Some(r) if r != items_file_name => errors.push(format!(
            "Metadata file references '{r}' but items file is '{items_file_name}'"
        )),
        Some(_) => {}
    }

    errors
}
