// scrapeqa-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ScrapeQaError {
    // --- ERREURS DU DOMAINE (Seuils, règles) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl ScrapeQaError {
    /// True when the error happened before any check could run
    /// (missing file, unparseable JSON, no metadata file to pair with).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScrapeQaError::Infrastructure(
                InfrastructureError::InputNotFound(_)
                    | InfrastructureError::MalformedInput { .. }
                    | InfrastructureError::MetadataPathUnderivable(_)
            )
        )
    }
}
