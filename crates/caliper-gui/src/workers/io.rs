use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use caliper_core::io::dicom;
use caliper_core::measurement::Measurement;
use caliper_core::store;
use tracing::debug;

use crate::messages::WorkerResult;

use super::{send, send_error, send_log};

pub(super) fn handle_load_image(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    let start = Instant::now();
    match dicom::load(path) {
        Ok(image) => {
            if image.info.frame_count > 1 {
                send_log(
                    tx,
                    ctx,
                    format!(
                        "{} frames in file, showing the first",
                        image.info.frame_count
                    ),
                );
            }
            debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Image decoded");
            send(
                tx,
                ctx,
                WorkerResult::ImageLoaded {
                    path: path.to_path_buf(),
                    image: Arc::new(image),
                },
            );
        }
        Err(e) => send_error(tx, ctx, format!("Failed to load DICOM file: {e}")),
    }
}

pub(super) fn handle_export_measurements(
    path: &Path,
    measurements: &[Measurement],
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match store::export(measurements, path) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::MeasurementsExported {
                path: path.to_path_buf(),
                count: measurements.len(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Export failed: {e}")),
    }
}
