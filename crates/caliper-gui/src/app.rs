use std::sync::mpsc;
use std::sync::Arc;

use caliper_core::config::ViewerConfig;
use caliper_core::image::Image;
use caliper_core::report;
use caliper_core::session::{CommitOutcome, MeasurementSession};

use crate::convert::image_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{UIState, ViewportState};

pub struct CaliperApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub config: ViewerConfig,
    pub session: MeasurementSession,
    pub image: Option<Arc<Image>>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub show_about: bool,
}

impl CaliperApp {
    pub fn new(ctx: &egui::Context, config: ViewerConfig) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = crate::workers::spawn_worker(result_tx, ctx.clone())?;

        let session = MeasurementSession::new(config.view_transform(0.0, 0.0))
            .with_store(config.measurement_store());

        Ok(Self {
            cmd_tx,
            result_rx,
            config,
            session,
            image: None,
            ui_state: UIState {
                status: "Open a DICOM file to begin".into(),
                ..UIState::default()
            },
            viewport: ViewportState::default(),
            show_about: false,
        })
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::ImageLoaded { path, image } => {
                    self.ui_state.busy = None;
                    self.install_image(ctx, image);
                    self.ui_state.set_status(format!("Loaded: {}", path.display()));
                    self.ui_state.file_path = Some(path);
                }
                WorkerResult::SnapshotSaved { path } => {
                    self.ui_state.busy = None;
                    self.ui_state
                        .set_status(format!("Screenshot saved as {}", path.display()));
                }
                WorkerResult::ReportSaved { path } => {
                    self.ui_state.busy = None;
                    self.ui_state
                        .set_status(format!("Report saved as {}", path.display()));
                }
                WorkerResult::MeasurementsExported { path, count } => {
                    self.ui_state.set_status(format!(
                        "Exported {count} measurements to {}",
                        path.display()
                    ));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.busy = None;
                    self.ui_state.set_status(message);
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Replace the displayed image and start a fresh measurement session.
    fn install_image(&mut self, ctx: &egui::Context, image: Arc<Image>) {
        let color_image = image_to_color_image(&image);
        let size = color_image.size;
        let texture = ctx.load_texture("viewport", color_image, egui::TextureOptions::NEAREST);

        self.viewport.texture = Some(texture);
        self.viewport.image_size = Some(size);
        self.session.reset(size[0] as f64, size[1] as f64);
        self.ui_state.report_text = None;
        self.ui_state.name_input.clear();
        self.image = Some(image);
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// Resolve the pending name prompt; `None` keeps the default name.
    pub fn submit_name(&mut self, name: Option<String>) {
        let outcome = self.session.submit_name(name.as_deref());
        self.ui_state.name_input.clear();
        if let Some(outcome) = outcome {
            self.report_commit(outcome);
        }
    }

    fn report_commit(&mut self, outcome: CommitOutcome) {
        let CommitOutcome {
            index,
            measurement,
            save,
        } = outcome;
        match save {
            Some(Err(e)) => self.ui_state.set_status(format!(
                "Measurement #{index} kept, but saving failed: {e}"
            )),
            _ => self.ui_state.set_status(format!(
                "Measurement #{index} added: {}",
                measurement.label()
            )),
        }
    }

    /// Compose the report, show it and save a screenshot of the current view.
    pub fn generate_report(&mut self) {
        let text = report::compose(self.session.measurements().as_slice());
        self.ui_state.report_text = Some(text);
        self.ui_state.show_report = true;

        match &self.image {
            Some(image) => {
                self.ui_state.busy = Some("Saving screenshot");
                self.send_command(WorkerCommand::SaveSnapshot {
                    image: Arc::clone(image),
                    view: self.session.view().clone(),
                    measurements: self.session.measurements().as_slice().to_vec(),
                    output_dir: self.config.report.output_dir.clone(),
                });
                self.ui_state.set_status("Report generated");
            }
            None => self.ui_state.set_status("Report generated (no image loaded)"),
        }
    }

    pub fn export_pdf(&mut self) {
        let Some(report_text) = self.ui_state.report_text.clone() else {
            self.ui_state.set_status("Generate a report first");
            return;
        };
        self.ui_state.busy = Some("Saving PDF");
        self.send_command(WorkerCommand::ExportPdf {
            report_text,
            output_dir: self.config.report.output_dir.clone(),
        });
    }
}

impl eframe::App for CaliperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        if self.ui_state.show_report {
            panels::report::show(ctx, self);
        }
        panels::viewport::show(ctx, self);
        panels::name_prompt::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Caliper")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Caliper");
                        ui.label("DICOM line measurement viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        ui.label("Right-drag to pan, scroll to zoom,");
                        ui.label("left-drag to measure.");
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
