// scrapeqa-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid tolerance '{0}'")]
    #[diagnostic(
        code(scrapeqa::domain::tolerance),
        help("Use a percentage such as '2%' or '2.5'.")
    )]
    InvalidTolerance(String),

    #[error("Invalid QA thresholds: {0}")]
    #[diagnostic(
        code(scrapeqa::domain::thresholds),
        help("Variance fractions must lie between 0 and 1.")
    )]
    InvalidThresholds(#[from] validator::ValidationErrors),

    #[error("Unexpected items file structure: expected list or object with 'items', got {0}")]
    #[diagnostic(code(scrapeqa::domain::items_structure))]
    UnexpectedItemsStructure(String),
}
