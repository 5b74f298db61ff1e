// scrapeqa/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use scrapeqa_core::ScrapeQaError;
use scrapeqa_core::domain::DomainError;
use scrapeqa_core::infrastructure::error::InfrastructureError;

use cli::{Cli, Commands};
use commands::crosscheck::CrosscheckArgs;

// Exit codes: 0 PASS, 1 FAIL, 2 inputs could not be loaded
const EXIT_FAIL: u8 = 1;
const EXIT_FATAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug scrapeqa crosscheck ... pour voir les détails.
    // stderr : stdout reste réservé au rapport JSON.
    init_tracing();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Crosscheck {
            items_file,
            metadata_file,
            tolerance,
            config,
            output,
            format,
        } => {
            commands::crosscheck::execute(CrosscheckArgs {
                items_file,
                metadata_file,
                tolerance,
                config,
                output,
                format,
            })
            .await
        }

        Commands::Validate {
            items_file,
            metadata,
            strict,
            json,
        } => commands::validate::execute(items_file, metadata, strict, json).await,

        Commands::Quality {
            items_file,
            execution_time,
            json,
            save_report,
        } => commands::quality::execute(items_file, execution_time, json, save_report).await,
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAIL),
        Err(err) => {
            report_error(err);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// Rendu miette (code + help) quand l'erreur vient du core
fn report_error(err: anyhow::Error) {
    let err = match err.downcast::<ScrapeQaError>() {
        Ok(e) => return eprintln!("{:?}", miette::Report::new(e)),
        Err(err) => err,
    };
    let err = match err.downcast::<InfrastructureError>() {
        Ok(e) => return eprintln!("{:?}", miette::Report::new(e)),
        Err(err) => err,
    };
    match err.downcast::<DomainError>() {
        Ok(e) => eprintln!("{:?}", miette::Report::new(e)),
        Err(err) => eprintln!("💥 Error: {err:#}"),
    }
}
