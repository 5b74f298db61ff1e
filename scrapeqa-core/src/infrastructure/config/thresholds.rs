// scrapeqa-core/src/infrastructure/config/thresholds.rs

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, instrument};

use crate::domain::qa::QaThresholds;
use crate::infrastructure::error::InfrastructureError;

pub const ENV_ITEM_COUNT_VARIANCE: &str = "SCRAPEQA_ITEM_COUNT_VARIANCE";
pub const ENV_ITEM_COUNT_ABSOLUTE: &str = "SCRAPEQA_ITEM_COUNT_ABSOLUTE";
pub const ENV_TIMESTAMP_DEVIATION: &str = "SCRAPEQA_TIMESTAMP_DEVIATION_SECONDS";
pub const ENV_FIELD_COMPLETENESS_VARIANCE: &str = "SCRAPEQA_FIELD_COMPLETENESS_VARIANCE";

// Fichier optionnel :
//
//   thresholds:
//     item_count_variance: 0.05
//     timestamp_deviation_seconds: 120
#[derive(Debug, Default, Deserialize)]
struct QaConfigFile {
    #[serde(default)]
    thresholds: QaThresholds,
}

/// Defaults, then the optional YAML file, then environment overrides.
///
/// `env` is the variable lookup (`std::env::var(..).ok()` in the binary).
#[instrument(skip(env))]
pub fn load_thresholds(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<QaThresholds, InfrastructureError> {
    let mut thresholds = match config_path {
        Some(path) => load_config_file(path)?,
        None => QaThresholds::default(),
    };

    apply_env_overrides(&mut thresholds, env)?;
    Ok(thresholds)
}

fn load_config_file(path: &Path) -> Result<QaThresholds, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(
            path.display().to_string(),
        ));
    }
    info!(path = ?path, "Loading QA thresholds");

    let content = fs::read_to_string(path)?;
    // Un fichier vide retombe sur les valeurs par défaut
    let file: Option<QaConfigFile> = serde_yaml::from_str(&content)?;
    Ok(file.unwrap_or_default().thresholds)
}

pub fn apply_env_overrides(
    thresholds: &mut QaThresholds,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), InfrastructureError> {
    if let Some(val) = env_value::<f64>(&env, ENV_ITEM_COUNT_VARIANCE)? {
        info!(old = thresholds.item_count_variance, new = val, "Overriding item count variance via ENV");
        thresholds.item_count_variance = val;
    }
    if let Some(val) = env_value::<u64>(&env, ENV_ITEM_COUNT_ABSOLUTE)? {
        info!(old = thresholds.item_count_absolute, new = val, "Overriding item count absolute via ENV");
        thresholds.item_count_absolute = val;
    }
    if let Some(val) = env_value::<u64>(&env, ENV_TIMESTAMP_DEVIATION)? {
        info!(old = thresholds.timestamp_deviation_seconds, new = val, "Overriding timestamp deviation via ENV");
        thresholds.timestamp_deviation_seconds = val;
    }
    if let Some(val) = env_value::<f64>(&env, ENV_FIELD_COMPLETENESS_VARIANCE)? {
        info!(old = thresholds.field_completeness_variance, new = val, "Overriding completeness variance via ENV");
        thresholds.field_completeness_variance = val;
    }
    Ok(())
}

fn env_value<T: FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, InfrastructureError> {
    let Some(raw) = env(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| InfrastructureError::ConfigError(format!("{key}: cannot parse '{raw}'")))
}
