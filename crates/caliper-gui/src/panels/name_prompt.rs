use crate::app::CaliperApp;

/// Modal asking for the name of the line just drawn.
pub fn show(ctx: &egui::Context, app: &mut CaliperApp) {
    let Some(pending) = app.session.pending() else {
        return;
    };
    let default_name = pending.default_name.clone();
    let length = pending.length();

    let mut submitted: Option<Option<String>> = None;

    egui::Window::new("Measurement Name")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Length: {length:.1} pixels"));
            ui.add_space(4.0);
            ui.label("Enter a name for this measurement:");

            let edit = ui.add(
                egui::TextEdit::singleline(&mut app.ui_state.name_input)
                    .hint_text(default_name.as_str())
                    .desired_width(240.0),
            );
            if !edit.has_focus() && !edit.lost_focus() {
                edit.request_focus();
            }
            let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() || entered {
                    submitted = Some(Some(app.ui_state.name_input.clone()));
                }
                if ui.button("Use Default").clicked() {
                    submitted = Some(None);
                }
            });
        });

    if let Some(name) = submitted {
        app.submit_name(name);
    }
}
