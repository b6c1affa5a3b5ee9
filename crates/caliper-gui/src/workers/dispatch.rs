use std::sync::mpsc;

use crate::messages::{WorkerCommand, WorkerResult};

use super::{io, report};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("caliper-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })?;

    Ok(cmd_tx)
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadImage { path } => {
                io::handle_load_image(&path, &tx, &ctx);
            }
            WorkerCommand::SaveSnapshot {
                image,
                view,
                measurements,
                output_dir,
            } => {
                report::handle_save_snapshot(&image, &view, &measurements, &output_dir, &tx, &ctx);
            }
            WorkerCommand::ExportPdf {
                report_text,
                output_dir,
            } => {
                report::handle_export_pdf(&report_text, &output_dir, &tx, &ctx);
            }
            WorkerCommand::ExportMeasurements { path, measurements } => {
                io::handle_export_measurements(&path, &measurements, &tx, &ctx);
            }
        }
    }
}
