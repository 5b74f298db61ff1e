// scrapeqa/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrapeqa")]
#[command(about = "QA cross-check and output validation for web scraper artifacts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔎 Cross-checks an items file against its metadata file
    Crosscheck {
        /// Items file (<source>_items_YYYYMMDD_HHMMSS.json)
        #[arg(long)]
        items_file: PathBuf,

        /// Metadata file (derived from the items file name when omitted)
        #[arg(long)]
        metadata_file: Option<PathBuf>,

        /// Item count variance, as a percentage (default: 2%)
        #[arg(long)]
        tolerance: Option<String>,

        /// YAML file with a `thresholds:` section
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also write the JSON report to this path
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format: json | table
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// ✅ Validates an items file (and optionally its metadata) against the output schema
    Validate {
        /// Items file (object with `items` or a bare list)
        items_file: PathBuf,

        /// Metadata file, for schema and cross-reference validation
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Treat warnings (blank titles, zero prices, no images) as errors
        #[arg(long)]
        strict: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// 📊 Post-scraping quality report for an items file
    Quality {
        items_file: PathBuf,

        /// Scraping execution time, in seconds
        #[arg(long)]
        execution_time: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Save the JSON report to this path
        #[arg(long)]
        save_report: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_crosscheck_defaults() -> Result<()> {
        let args = Cli::parse_from(["scrapeqa", "crosscheck", "--items-file", "a_items_20250101_000000.json"]);
        match args.command {
            Commands::Crosscheck {
                items_file,
                metadata_file,
                tolerance,
                format,
                output,
                config,
            } => {
                assert_eq!(items_file.to_string_lossy(), "a_items_20250101_000000.json");
                assert_eq!(metadata_file, None);
                assert_eq!(tolerance, None);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(output, None);
                assert_eq!(config, None);
                Ok(())
            }
            _ => bail!("Expected Crosscheck command"),
        }
    }

    #[test]
    fn test_cli_parse_crosscheck_full() -> Result<()> {
        let args = Cli::parse_from([
            "scrapeqa",
            "crosscheck",
            "--items-file",
            "i.json",
            "--metadata-file",
            "m.json",
            "--tolerance",
            "5%",
            "--format",
            "table",
            "-o",
            "qa.json",
        ]);
        match args.command {
            Commands::Crosscheck {
                metadata_file,
                tolerance,
                format,
                output,
                ..
            } => {
                assert_eq!(metadata_file, Some(PathBuf::from("m.json")));
                assert_eq!(tolerance.as_deref(), Some("5%"));
                assert_eq!(format, OutputFormat::Table);
                assert_eq!(output, Some(PathBuf::from("qa.json")));
                Ok(())
            }
            _ => bail!("Expected Crosscheck command"),
        }
    }

    #[test]
    fn test_cli_parse_validate() -> Result<()> {
        let args = Cli::parse_from(["scrapeqa", "validate", "i.json", "--strict", "--json"]);
        match args.command {
            Commands::Validate {
                items_file,
                metadata,
                strict,
                json,
            } => {
                assert_eq!(items_file, PathBuf::from("i.json"));
                assert_eq!(metadata, None);
                assert!(strict);
                assert!(json);
                Ok(())
            }
            _ => bail!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_parse_quality() -> Result<()> {
        let args = Cli::parse_from(["scrapeqa", "quality", "i.json", "--execution-time", "42.5"]);
        match args.command {
            Commands::Quality {
                execution_time,
                json,
                save_report,
                ..
            } => {
                assert_eq!(execution_time, Some(42.5));
                assert!(!json);
                assert_eq!(save_report, None);
                Ok(())
            }
            _ => bail!("Expected Quality command"),
        }
    }
}
