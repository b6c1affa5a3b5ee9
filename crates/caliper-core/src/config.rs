use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MEASUREMENTS_FILE, ZOOM_STEP};
use crate::error::{CaliperError, Result};
use crate::store::MeasurementStore;
use crate::view::ViewTransform;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "caliper.toml";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// CSV file rewritten after every new measurement.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MEASUREMENTS_FILE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory receiving snapshots and PDF reports.
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Zoom factor per scroll tick.
    pub zoom_step: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_step: ZOOM_STEP,
        }
    }
}

/// Viewport size used when rendering snapshots without a window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| CaliperError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CaliperError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if !self.view.zoom_step.is_finite() || self.view.zoom_step <= 1.0 {
            return Err(CaliperError::Config(format!(
                "view.zoom_step must be greater than 1, got {}",
                self.view.zoom_step
            )));
        }
        if self.snapshot.width == 0 || self.snapshot.height == 0 {
            return Err(CaliperError::Config(
                "snapshot width and height must be > 0".into(),
            ));
        }
        Ok(())
    }

    pub fn measurement_store(&self) -> MeasurementStore {
        MeasurementStore::new(self.store.path.clone())
    }

    pub fn view_transform(&self, viewport_width: f64, viewport_height: f64) -> ViewTransform {
        ViewTransform::new(viewport_width, viewport_height).with_zoom_step(self.view.zoom_step)
    }
}
