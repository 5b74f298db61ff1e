// scrapeqa/src/commands/quality.rs
//
// USE CASE: Post-scraping quality report.

use std::path::PathBuf;
use tracing::info;

use scrapeqa_core::application::{QualityReport, run_quality_report};
use scrapeqa_core::domain::scrape::QualityAssessment;
use scrapeqa_core::infrastructure::{FsDocumentSource, atomic_write};

pub async fn execute(
    items_file: PathBuf,
    execution_time: Option<f64>,
    json: bool,
    save_report: Option<PathBuf>,
) -> anyhow::Result<bool> {
    let report = run_quality_report(&FsDocumentSource, &items_file, execution_time).await?;
    let rendered = serde_json::to_string_pretty(&report)?;

    if let Some(path) = &save_report {
        atomic_write(path, &rendered)?;
        info!(path = ?path, "Quality report saved");
    }

    if json {
        println!("{rendered}");
    } else {
        print_report(&report);
    }

    if !report.passed() {
        eprintln!("⚠️  Quality below expectations. Review scraper implementation.");
    }
    Ok(report.passed())
}

fn print_report(report: &QualityReport) {
    println!("\n📊 POST-SCRAPING QUALITY REPORT");
    println!("   Items File: {}", report.items_file);
    println!("   Total Items: {}", report.total_items);

    let c = &report.field_completeness;
    println!("\n   Field Completeness:");
    println!("   - Title:       {:>5.1}%", c.title);
    println!("   - Price:       {:>5.1}%", c.price);
    println!("   - Images:      {:>5.1}%", c.image_urls);
    println!("   - Description: {:>5.1}%", c.description);

    println!("\n🎯 Overall Quality Score: {}/100", report.quality_score);
    let verdict = match report.quality_assessment {
        QualityAssessment::Excellent => "✅ Excellent quality",
        QualityAssessment::Good => "⚠️  Good quality, minor improvements possible",
        QualityAssessment::Moderate => "⚠️  Moderate quality, review recommended",
        QualityAssessment::Poor => "❌ Low quality, manual review required",
    };
    println!("   {verdict}");

    if report.items_with_missing_fields > 0 {
        println!(
            "\n⚠️  Items with Missing Required Fields: {}",
            report.items_with_missing_fields
        );
        for item in report.problematic_items.iter().take(3) {
            println!("   - Item {}: {}", item.item_index, item.item_title);
            println!("     Missing: {}", item.missing_fields.join(", "));
        }
    }

    let schema = &report.schema_validation;
    if schema.passed {
        println!("\n✅ Schema Validation: PASSED");
    } else {
        println!("\n❌ Schema Validation: FAILED ({} errors)", schema.error_count);
        for error in schema.errors.iter().take(3) {
            println!("   - {error}");
        }
    }

    println!(
        "\n⏱  Hook Execution Time: {:.2}ms",
        report.execution_metadata.hook_execution_time_ms
    );
    println!();
}
