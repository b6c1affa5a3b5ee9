use std::path::PathBuf;
use std::sync::Arc;

use caliper_core::image::Image;
use caliper_core::measurement::Measurement;
use caliper_core::view::ViewTransform;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode a DICOM file.
    LoadImage { path: PathBuf },

    /// Render the current view with its overlays and save it as a screenshot PNG.
    SaveSnapshot {
        image: Arc<Image>,
        view: ViewTransform,
        measurements: Vec<Measurement>,
        output_dir: PathBuf,
    },

    /// Lay out the report text plus the newest screenshot and write a PDF.
    ExportPdf {
        report_text: String,
        output_dir: PathBuf,
    },

    /// Write the measurements as CSV to a user-chosen path.
    ExportMeasurements {
        path: PathBuf,
        measurements: Vec<Measurement>,
    },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    ImageLoaded { path: PathBuf, image: Arc<Image> },
    SnapshotSaved { path: PathBuf },
    ReportSaved { path: PathBuf },
    MeasurementsExported { path: PathBuf, count: usize },
    Error { message: String },
    Log { message: String },
}
