pub mod config;
pub mod export;
pub mod info;
pub mod report;
pub mod snapshot;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use caliper_core::config::{ViewerConfig, CONFIG_FILE_NAME};
use caliper_core::measurement::Measurement;
use caliper_core::store::MeasurementStore;

/// Config from `--config`, else `caliper.toml` in the working directory, else defaults.
pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    match path {
        Some(p) => ViewerConfig::load(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => ViewerConfig::load_or_default(Path::new(CONFIG_FILE_NAME))
            .with_context(|| format!("Failed to load {CONFIG_FILE_NAME}")),
    }
}

/// Measurements saved in `csv`; a file that does not exist yet holds none.
pub fn load_measurements(csv: &Path) -> Result<Vec<Measurement>> {
    let records = MeasurementStore::new(csv)
        .load_or_empty()
        .with_context(|| format!("Failed to read {}", csv.display()))?;
    Ok(records.iter().map(|r| r.to_measurement()).collect())
}

/// `--output-dir` if given, else the configured report directory.
pub fn output_dir(arg: Option<&PathBuf>, config: &ViewerConfig) -> PathBuf {
    arg.cloned()
        .unwrap_or_else(|| config.report.output_dir.clone())
}
