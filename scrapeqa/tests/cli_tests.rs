use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const ITEMS_NAME: &str = "shop_items_20250101_000000.json";
const METADATA_NAME: &str = "shop_metadata_20250101_000000.json";

/// Scraper output directory with an items / metadata pair.
struct ScrapeOutputEnv {
    tmp: TempDir,
}

impl ScrapeOutputEnv {
    fn new(actual: usize, reported: u64) -> Result<Self> {
        let env = Self {
            tmp: tempfile::tempdir()?,
        };
        let items: Vec<Value> = (0..actual).map(item).collect();
        env.write(
            ITEMS_NAME,
            &json!({"metadata_file": METADATA_NAME, "items": items}),
        )?;
        env.write(METADATA_NAME, &metadata(reported))?;
        Ok(env)
    }

    fn write(&self, name: &str, value: &Value) -> Result<()> {
        std::fs::write(self.path(name), serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn scrapeqa(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("scrapeqa"));
        cmd.current_dir(self.root());
        cmd.env_remove("SCRAPEQA_ITEM_COUNT_VARIANCE")
            .env_remove("SCRAPEQA_ITEM_COUNT_ABSOLUTE")
            .env_remove("SCRAPEQA_TIMESTAMP_DEVIATION_SECONDS")
            .env_remove("SCRAPEQA_FIELD_COMPLETENESS_VARIANCE");
        cmd
    }
}

fn item(idx: usize) -> Value {
    json!({
        "id": format!("sku-{idx}"),
        "title": format!("Product {idx}"),
        "price": {"amount": 19.9, "currency": "EUR"},
        "image_urls": [format!("https://cdn.example.com/{idx}.jpg")],
        "url": format!("https://shop.example.com/p/{idx}"),
        "description": "A product",
        "scraped_at": "2025-01-01T00:02:00Z"
    })
}

fn metadata(reported: u64) -> Value {
    json!({
        "scraping_session": {
            "source_url": "https://shop.example.com",
            "source_name": "shop",
            "scrape_timestamp_start": "2025-01-01T00:00:00Z",
            "scrape_timestamp_end": "2025-01-01T00:05:00Z",
            "duration_seconds": 300.0,
            "scraping_method": "browser"
        },
        "pagination_info": {"type": "numbered", "total_pages": 5},
        "items_summary": {
            "total_items_found": reported,
            "items_successfully_scraped": reported,
            "data_quality_percentage": 100.0
        },
        "field_completeness": {"title": 100.0, "price": 100.0, "image_urls": 100.0, "description": 100.0},
        "investigation_notes": {"api_used": false},
        "output_files": {"items_file": ITEMS_NAME, "metadata_file": METADATA_NAME}
    })
}

fn stdout_json(output: &std::process::Output) -> Result<Value> {
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_crosscheck_consistent_pair_exits_zero() -> Result<()> {
    let env = ScrapeOutputEnv::new(100, 100)?;

    let output = env
        .scrapeqa()
        .args(["crosscheck", "--items-file", ITEMS_NAME, "--metadata-file", METADATA_NAME])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let report = stdout_json(&output)?;
    assert_eq!(report["status"], "PASS");
    assert_eq!(report["data_quality_score"], 100.0);
    assert_eq!(report["checks"]["item_count_consistency"]["details"]["variance"], 0.0);
    assert!(report["root_cause_analysis"].is_null());
    Ok(())
}

#[test]
fn test_crosscheck_missing_items_exits_one_with_diagnosis() -> Result<()> {
    let env = ScrapeOutputEnv::new(90, 100)?;

    let output = env
        .scrapeqa()
        .args(["crosscheck", "--items-file", ITEMS_NAME])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output)?;
    assert_eq!(report["status"], "FAIL");
    assert_eq!(report["root_cause_analysis"][0]["issue"], "pagination_end_condition");
    assert_eq!(
        report["recommended_actions"][0],
        "Review pagination end condition in scraper code"
    );
    Ok(())
}

#[test]
fn test_crosscheck_tolerance_flag_overrides_default() -> Result<()> {
    // 10% d'écart : accepté avec --tolerance 15%
    let env = ScrapeOutputEnv::new(90, 100)?;

    env.scrapeqa()
        .args(["crosscheck", "--items-file", ITEMS_NAME, "--tolerance", "15%"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn test_crosscheck_config_file_and_env_layering() -> Result<()> {
    let env = ScrapeOutputEnv::new(90, 100)?;
    std::fs::write(
        env.path("qa.yaml"),
        "thresholds:\n  item_count_variance: 0.15\n",
    )?;

    env.scrapeqa()
        .args(["crosscheck", "--items-file", ITEMS_NAME, "--config", "qa.yaml"])
        .assert()
        .success();

    // ENV l'emporte sur le fichier
    env.scrapeqa()
        .args(["crosscheck", "--items-file", ITEMS_NAME, "--config", "qa.yaml"])
        .env("SCRAPEQA_ITEM_COUNT_VARIANCE", "0.01")
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn test_crosscheck_missing_file_exits_two() -> Result<()> {
    let env = ScrapeOutputEnv::new(1, 1)?;

    env.scrapeqa()
        .args(["crosscheck", "--items-file", ITEMS_NAME, "--metadata-file", "absent.json"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("absent.json"));
    Ok(())
}

#[test]
fn test_crosscheck_malformed_json_exits_two() -> Result<()> {
    let env = ScrapeOutputEnv::new(1, 1)?;
    std::fs::write(env.path(METADATA_NAME), "{ not json")?;

    env.scrapeqa()
        .args(["crosscheck", "--items-file", ITEMS_NAME])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn test_crosscheck_unpaired_items_name_exits_two() -> Result<()> {
    let env = ScrapeOutputEnv::new(1, 1)?;
    env.write("export.json", &json!({"metadata_file": METADATA_NAME, "items": [item(0)]}))?;

    env.scrapeqa()
        .args(["crosscheck", "--items-file", "export.json"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Cannot derive"));
    Ok(())
}

#[test]
fn test_crosscheck_writes_report_and_table() -> Result<()> {
    let env = ScrapeOutputEnv::new(5, 5)?;

    env.scrapeqa()
        .args([
            "crosscheck",
            "--items-file",
            ITEMS_NAME,
            "--format",
            "table",
            "--output",
            "qa_report.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("timestamp_consistency"))
        .stdout(predicate::str::contains("PASS"));

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(
        env.path("qa_report.json"),
    )?)?;
    assert_eq!(saved["status"], "PASS");
    Ok(())
}

#[test]
fn test_validate_clean_output_passes() -> Result<()> {
    let env = ScrapeOutputEnv::new(3, 3)?;

    let output = env
        .scrapeqa()
        .args(["validate", ITEMS_NAME, "--metadata", METADATA_NAME, "--json"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let report = stdout_json(&output)?;
    assert_eq!(report["items"]["schema_validation"]["passed"], true);
    assert_eq!(report["items"]["quality_score"], 100.0);
    assert_eq!(report["metadata"]["schema_validation"]["passed"], true);
    assert_eq!(report["cross_reference_errors"], json!([]));
    Ok(())
}

#[test]
fn test_validate_bad_item_exits_one() -> Result<()> {
    let env = ScrapeOutputEnv::new(0, 0)?;
    let mut broken = item(0);
    broken["price"]["currency"] = json!("EURO");
    env.write(ITEMS_NAME, &json!([broken, item(1)]))?;

    env.scrapeqa()
        .args(["validate", ITEMS_NAME])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Item 0:"));
    Ok(())
}

#[test]
fn test_quality_report_saved() -> Result<()> {
    let env = ScrapeOutputEnv::new(4, 4)?;

    let output = env
        .scrapeqa()
        .args([
            "quality",
            ITEMS_NAME,
            "--execution-time",
            "12.5",
            "--json",
            "--save-report",
            "quality.json",
        ])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let report = stdout_json(&output)?;
    assert_eq!(report["total_items"], 4);
    assert_eq!(report["execution_metadata"]["scraping_duration_seconds"], 12.5);
    assert!(env.path("quality.json").exists());
    Ok(())
}

#[test]
fn test_quality_empty_items_exits_one() -> Result<()> {
    let env = ScrapeOutputEnv::new(0, 0)?;

    env.scrapeqa()
        .args(["quality", ITEMS_NAME])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Total Items: 0"));
    Ok(())
}
