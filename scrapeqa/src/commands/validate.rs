// scrapeqa/src/commands/validate.rs
//
// USE CASE: Schema validation and quality scoring of scraper outputs.

use std::path::PathBuf;

use scrapeqa_core::application::validation::MIN_QUALITY_SCORE;
use scrapeqa_core::application::{OutputValidation, validate_outputs};
use scrapeqa_core::infrastructure::FsDocumentSource;

const MAX_PRINTED_ERRORS: usize = 10;

pub async fn execute(
    items_file: PathBuf,
    metadata: Option<PathBuf>,
    strict: bool,
    json: bool,
) -> anyhow::Result<bool> {
    let validation =
        validate_outputs(&FsDocumentSource, &items_file, metadata.as_deref(), strict).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&validation)?);
    } else {
        print_report(&validation);
    }

    if validation
        .items
        .quality_score
        .is_some_and(|score| score < MIN_QUALITY_SCORE)
    {
        eprintln!("⚠️  Quality score below {MIN_QUALITY_SCORE}. Data quality is poor.");
    }

    Ok(validation.passed())
}

fn print_report(validation: &OutputValidation) {
    let items = &validation.items;

    println!("\n📄 ITEMS FILE");
    println!("   File: {}", items.file);
    if let Some(total) = items.total_items {
        println!("   Total Items: {total}");
    }
    print_schema(items.schema_validation.passed, &items.schema_validation.errors);

    if let Some(completeness) = &items.field_completeness {
        println!("\n   📊 Field Completeness:");
        println!("      Title        {:>5.1}%", completeness.title);
        println!("      Price        {:>5.1}%", completeness.price);
        println!("      Image Urls   {:>5.1}%", completeness.image_urls);
        println!("      Description  {:>5.1}%", completeness.description);
    }
    if let (Some(score), Some(assessment)) = (items.quality_score, items.quality_assessment) {
        println!("\n   🎯 Overall Quality Score: {score}/100 ({assessment:?})");
    }

    if let Some(metadata) = &validation.metadata {
        println!("\n📋 METADATA FILE");
        println!("   File: {}", metadata.file);
        print_schema(
            metadata.schema_validation.passed,
            &metadata.schema_validation.errors,
        );

        if validation.cross_reference_errors.is_empty() {
            println!("   ✅ Cross-references valid");
        } else {
            println!("\n   ⚠️  Cross-Reference Issues:");
            for error in &validation.cross_reference_errors {
                println!("      - {error}");
            }
        }
    }
    println!();
}

fn print_schema(passed: bool, errors: &[String]) {
    if passed {
        println!("   Schema Validation: ✅ PASSED");
    } else {
        println!("   Schema Validation: ❌ FAILED");
    }
    if errors.is_empty() {
        return;
    }

    println!("   Errors ({}):", errors.len());
    for error in errors.iter().take(MAX_PRINTED_ERRORS) {
        println!("      - {error}");
    }
    if errors.len() > MAX_PRINTED_ERRORS {
        println!("      ... and {} more", errors.len() - MAX_PRINTED_ERRORS);
    }
}
