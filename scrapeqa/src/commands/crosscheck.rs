// scrapeqa/src/commands/crosscheck.rs
//
// USE CASE: QA cross-check of an items / metadata pair.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::path::PathBuf;
use tracing::info;

use scrapeqa_core::application::{derive_metadata_path, run_crosscheck};
use scrapeqa_core::domain::qa::{CheckStatus, QaReport, parse_tolerance};
use scrapeqa_core::infrastructure::config::load_thresholds;
use scrapeqa_core::infrastructure::{FsDocumentSource, atomic_write};

use crate::cli::OutputFormat;

pub struct CrosscheckArgs {
    pub items_file: PathBuf,
    pub metadata_file: Option<PathBuf>,
    pub tolerance: Option<String>,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Returns whether the pair passed.
pub async fn execute(args: CrosscheckArgs) -> anyhow::Result<bool> {
    // 1. Seuils : défauts < fichier < ENV < --tolerance
    let mut thresholds = load_thresholds(args.config.as_deref(), |key| std::env::var(key).ok())?;
    if let Some(raw) = &args.tolerance {
        thresholds.item_count_variance = parse_tolerance(raw)?;
    }

    // 2. Fichiers
    let metadata_file = match args.metadata_file {
        Some(path) => path,
        None => derive_metadata_path(&args.items_file)?,
    };
    info!(items = ?args.items_file, metadata = ?metadata_file, "Running QA cross-check");

    // 3. Checks
    let report = run_crosscheck(&FsDocumentSource, &args.items_file, &metadata_file, thresholds).await?;
    let json = report.to_json()?;

    if let Some(path) = &args.output {
        atomic_write(path, &json)?;
        info!(path = ?path, "QA report saved");
    }

    match args.format {
        OutputFormat::Json => println!("{json}"),
        OutputFormat::Table => println!("{}", render_table(&report)?),
    }

    Ok(report.passed())
}

fn render_table(report: &QaReport) -> anyhow::Result<String> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Check", "Status", "Details"]);

    for check in &report.checks {
        table.add_row(vec![
            Cell::new(check.check_name),
            status_cell(check.status),
            Cell::new(serde_json::to_string(&check.details)?),
        ]);
    }

    let mut out = format!(
        "{table}\nStatus: {}  |  Data quality score: {}/100",
        report.status, report.data_quality_score
    );

    if let Some(causes) = &report.root_cause_analysis {
        for cause in causes {
            out.push_str(&format!("\n  ❌ {}: {}", cause.description, cause.recommendation));
        }
    }
    Ok(out)
}

fn status_cell(status: CheckStatus) -> Cell {
    match status {
        CheckStatus::Pass => Cell::new(status).fg(Color::Green),
        CheckStatus::Fail => Cell::new(status).fg(Color::Red),
    }
}
