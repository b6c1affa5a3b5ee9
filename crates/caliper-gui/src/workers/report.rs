use std::path::Path;
use std::sync::mpsc;

use caliper_core::image::Image;
use caliper_core::measurement::Measurement;
use caliper_core::report::{
    self, build_document, latest_snapshot, render_snapshot, save_snapshot, write_pdf, PageLayout,
};
use caliper_core::view::ViewTransform;

use crate::messages::WorkerResult;

use super::{send, send_error, send_log};

pub(super) fn handle_save_snapshot(
    image: &Image,
    view: &ViewTransform,
    measurements: &[Measurement],
    output_dir: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let now = chrono::Local::now().naive_local();
    let result = render_snapshot(image, view, measurements)
        .and_then(|rgb| save_snapshot(output_dir, &rgb, now));
    match result {
        Ok(path) => send(tx, ctx, WorkerResult::SnapshotSaved { path }),
        Err(e) => send_error(tx, ctx, format!("Screenshot failed: {e}")),
    }
}

pub(super) fn handle_export_pdf(
    report_text: &str,
    output_dir: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let now = chrono::Local::now().naive_local();
    let snapshot = latest_snapshot(output_dir);
    if snapshot.is_none() {
        send_log(tx, ctx, "No screenshot found, exporting text only");
    }

    let layout = PageLayout::letter();
    let pages = build_document(
        report_text,
        &report::generated_on(now),
        snapshot.as_deref(),
        &layout,
    );
    let path = output_dir.join(report::report_file_name(now));

    match write_pdf(&pages, &layout, &path) {
        Ok(()) => send(tx, ctx, WorkerResult::ReportSaved { path }),
        Err(e) => send_error(tx, ctx, format!("PDF save failed: {e}")),
    }
}
