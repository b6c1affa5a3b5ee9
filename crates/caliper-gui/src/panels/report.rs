use crate::app::CaliperApp;

pub fn show(ctx: &egui::Context, app: &mut CaliperApp) {
    egui::SidePanel::right("report")
        .resizable(true)
        .default_width(320.0)
        .min_width(220.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.strong("Measurement Report");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Hide").clicked() {
                        app.ui_state.show_report = false;
                    }
                });
            });
            ui.separator();

            let can_export = app.ui_state.report_text.is_some() && !app.ui_state.is_busy();
            ui.horizontal(|ui| {
                if ui.button("Generate Report").clicked() {
                    app.generate_report();
                }
                if ui.add_enabled(can_export, egui::Button::new("Save as PDF")).clicked() {
                    app.export_pdf();
                }
            });
            ui.add_space(4.0);

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match &app.ui_state.report_text {
                    Some(text) => {
                        ui.label(egui::RichText::new(text).monospace());
                    }
                    None => {
                        ui.label(
                            egui::RichText::new("No report generated yet")
                                .color(egui::Color32::from_gray(120)),
                        );
                    }
                });
        });
}
