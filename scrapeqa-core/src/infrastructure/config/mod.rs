// scrapeqa-core/src/infrastructure/config/mod.rs

pub mod thresholds;

pub use thresholds::{apply_env_overrides, load_thresholds};
