// scrapeqa-core/src/domain/scrape/naming.rs
//
// Output files are named `<source>_items_YYYYMMDD_HHMMSS.json` and
// `<source>_metadata_YYYYMMDD_HHMMSS.json`, sharing the session start stamp.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)] // literal pattern
pub static ITEMS_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.+_items_\d{8}_\d{6}\.json$").expect("items file pattern")
});

#[allow(clippy::expect_used)] // literal pattern
pub static METADATA_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.+_metadata_\d{8}_\d{6}\.json$").expect("metadata file pattern")
});

#[allow(clippy::expect_used)] // literal pattern
static ITEMS_STEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<source>.+)_items_(?P<stamp>\d{8}_\d{6})\.json$").expect("items stem pattern")
});

/// Metadata file name paired with an items file name, if the latter follows
/// the naming convention.
pub fn paired_metadata_name(items_file: &str) -> Option<String> {
    let caps = ITEMS_STEM.captures(items_file)?;
    Some(format!("{}_metadata_{}.json", &caps["source"], &caps["stamp"]))
}
