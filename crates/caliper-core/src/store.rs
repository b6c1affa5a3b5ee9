use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::{DEFAULT_MEASUREMENTS_FILE, MEASUREMENT_HEADER};
use crate::error::StoreError;
use crate::measurement::Measurement;
use crate::view::Point;

/// One persisted CSV row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Start X")]
    pub start_x: f64,
    #[serde(rename = "Start Y")]
    pub start_y: f64,
    #[serde(rename = "End X")]
    pub end_x: f64,
    #[serde(rename = "End Y")]
    pub end_y: f64,
    #[serde(rename = "Length (px)")]
    pub length: f64,
}

impl MeasurementRecord {
    /// Rebuild the measurement; the length is recomputed from the endpoints.
    pub fn to_measurement(&self) -> Measurement {
        Measurement::new(
            self.name.clone(),
            Point::new(self.start_x, self.start_y),
            Point::new(self.end_x, self.end_y),
        )
    }
}

impl From<&Measurement> for MeasurementRecord {
    fn from(m: &Measurement) -> Self {
        Self {
            name: m.name().to_string(),
            start_x: m.start().x,
            start_y: m.start().y,
            end_x: m.end().x,
            end_y: m.end().y,
            length: m.length(),
        }
    }
}

/// CSV file holding the measurements of the current session.
///
/// Every save rewrites the whole file.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementStore {
    path: PathBuf,
}

impl Default for MeasurementStore {
    fn default() -> Self {
        Self::new(DEFAULT_MEASUREMENTS_FILE)
    }
}

impl MeasurementStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, measurements: &[Measurement]) -> Result<(), StoreError> {
        export(measurements, &self.path)
    }

    pub fn load(&self) -> Result<Vec<MeasurementRecord>, StoreError> {
        let file = std::fs::File::open(&self.path).map_err(|e| StoreError::Read {
            path: self.path.clone(),
            source: csv::Error::from(e),
        })?;
        let records = read_records(file).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        if let Some(row) = records.iter().position(|r| r.name.trim().is_empty()) {
            return Err(StoreError::InvalidRow {
                path: self.path.clone(),
                row: row + 1,
                reason: "empty name".into(),
            });
        }

        debug!(path = %self.path.display(), rows = records.len(), "Loaded measurements");
        Ok(records)
    }

    /// Like [`load`](Self::load), but a file that does not exist yet means no measurements.
    pub fn load_or_empty(&self) -> Result<Vec<MeasurementRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        self.load()
    }
}

/// Write measurements to `path` in the store's CSV format, replacing its contents.
pub fn export(measurements: &[Measurement], path: &Path) -> Result<(), StoreError> {
    let file = std::fs::File::create(path).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    write_records(file, measurements).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = measurements.len(), "Saved measurements");
    Ok(())
}

/// Header row followed by one row per measurement, in order.
pub fn write_records<W: io::Write>(writer: W, measurements: &[Measurement]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(MEASUREMENT_HEADER)?;
    for m in measurements {
        wtr.write_record([
            m.name().to_string(),
            format_number(m.start().x),
            format_number(m.start().y),
            format_number(m.end().x),
            format_number(m.end().y),
            format_length(m.length()),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_records<R: io::Read>(reader: R) -> csv::Result<Vec<MeasurementRecord>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    rdr.deserialize::<MeasurementRecord>().collect()
}

/// Shortest decimal text that parses back to the same value.
fn format_number(v: f64) -> String {
    v.to_string()
}

/// Like [`format_number`] but always with a decimal point, e.g. `5.0`.
fn format_length(v: f64) -> String {
    let s = v.to_string();
    if v.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_coordinates_have_no_fraction() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-2.5), "-2.5");
    }

    #[test]
    fn length_keeps_one_decimal() {
        assert_eq!(format_length(5.0), "5.0");
        assert_eq!(format_length(0.0), "0.0");
        assert_eq!(format_length(1.4142135623730951), "1.4142135623730951");
    }
}
