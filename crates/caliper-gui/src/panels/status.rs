use crate::app::CaliperApp;

pub fn show(ctx: &egui::Context, app: &mut CaliperApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if let Some(task) = app.ui_state.busy {
            ui.add(egui::ProgressBar::new(0.0).text(format!("{task}...")).animate(true));
        }

        // Log area, four lines high.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg.as_str());
                    }
                }
            });

        ui.horizontal(|ui| {
            if let Some(name) = app.ui_state.file_name() {
                ui.label(egui::RichText::new(name).strong());
                ui.separator();
            }
            ui.label(app.ui_state.status.as_str());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("Measurements: {}", app.session.measurements().len()));
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", app.session.view().zoom_percent()));
                if let Some(ref size) = app.viewport.image_size {
                    ui.separator();
                    ui.label(format!("{}x{}", size[0], size[1]));
                }
            });
        });

        ui.add_space(2.0);
    });
}
