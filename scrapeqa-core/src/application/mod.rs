// scrapeqa-core/src/application/mod.rs

pub mod crosscheck;
pub mod quality;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use scrapeqa_core::application::{run_crosscheck, validate_outputs};`

pub use crosscheck::{derive_metadata_path, evaluate, run_crosscheck};
pub use quality::{QualityReport, build_quality_report, run_quality_report};
pub use validation::{OutputValidation, validate_outputs};
