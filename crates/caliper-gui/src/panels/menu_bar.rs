use caliper_core::consts::DEFAULT_MEASUREMENTS_FILE;

use crate::app::CaliperApp;
use crate::messages::WorkerCommand;
use crate::states::ThemeChoice;

pub fn show(ctx: &egui::Context, app: &mut CaliperApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open DICOM...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_file(app);
                }

                let has_measurements = !app.session.measurements().is_empty();
                if ui
                    .add_enabled(has_measurements, egui::Button::new("Export Measurements..."))
                    .clicked()
                {
                    ui.close();
                    export_measurements(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Report", |ui| {
                if ui.button("Generate Report").clicked() {
                    ui.close();
                    app.generate_report();
                }
                let can_export = app.ui_state.report_text.is_some() && !app.ui_state.is_busy();
                if ui.add_enabled(can_export, egui::Button::new("Save as PDF")).clicked() {
                    ui.close();
                    app.export_pdf();
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Toggle Report Panel").clicked() {
                    ui.close();
                    app.ui_state.show_report = !app.ui_state.show_report;
                }
                if ui
                    .add_enabled(app.image.is_some(), egui::Button::new("Fit Image"))
                    .clicked()
                {
                    ui.close();
                    if let Some([w, h]) = app.viewport.image_size {
                        app.session.view_mut().fit(w as f64, h as f64);
                    }
                }

                ui.separator();

                for choice in ThemeChoice::ALL {
                    if ui
                        .radio(app.ui_state.theme == choice, choice.label())
                        .clicked()
                    {
                        ui.close();
                        app.ui_state.theme = choice;
                        ctx.set_theme(choice.preference());
                    }
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_file(app: &mut CaliperApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("DICOM files", &["dcm", "dicom"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadImage { path });
        }
    });
}

fn export_measurements(app: &mut CaliperApp) {
    let cmd_tx = app.cmd_tx.clone();
    let measurements = app.session.measurements().as_slice().to_vec();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(DEFAULT_MEASUREMENTS_FILE)
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::ExportMeasurements { path, measurements });
        }
    });
}
