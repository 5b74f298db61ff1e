// scrapeqa-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- INPUT FILES ---
    #[error("Input file not found: {0}")]
    #[diagnostic(
        code(scrapeqa::infra::input_missing),
        help("Check the path passed to --items-file / --metadata-file.")
    )]
    InputNotFound(String),

    #[error("Invalid JSON in '{path}': {message}")]
    #[diagnostic(
        code(scrapeqa::infra::malformed_input),
        help("The scraper output must be a valid JSON document.")
    )]
    MalformedInput { path: String, message: String },

    #[error("Cannot derive a metadata file from '{0}'")]
    #[diagnostic(
        code(scrapeqa::infra::metadata_path),
        help("Name the items file <source>_items_YYYYMMDD_HHMMSS.json or pass --metadata-file.")
    )]
    MetadataPathUnderivable(String),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(scrapeqa::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(scrapeqa::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(scrapeqa::infra::config))]
    ConfigError(String),

    #[error("Configuration file not found at '{0}'")]
    #[diagnostic(code(scrapeqa::infra::config_missing))]
    ConfigNotFound(String),
}
