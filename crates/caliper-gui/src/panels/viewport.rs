use caliper_core::session::{GestureState, PointerButton, PointerEvent, SessionOutcome};
use caliper_core::view::{Point, ScrollDirection, ViewTransform};
use tracing::debug;

use crate::app::CaliperApp;

/// Smooth-scroll distance, in points, counted as one wheel tick.
const SCROLL_POINTS_PER_TICK: f32 = 50.0;

const LINE_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 128, 0);
const PREVIEW_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 40, 40);
const LABEL_COLOR: egui::Color32 = egui::Color32::YELLOW;
const MARKER_RADIUS: f32 = 3.0;

pub fn show(ctx: &egui::Context, app: &mut CaliperApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);
        app.session
            .view_mut()
            .set_viewport(rect.width() as f64, rect.height() as f64);

        let Some(texture_id) = app.viewport.texture.as_ref().map(|t| t.id()) else {
            show_placeholder(ui);
            return;
        };

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        handle_input(ui, &response, rect, app);
        update_cursor(ui, &response, app);

        let painter = ui.painter_at(rect);
        if let Some(size) = app.viewport.image_size {
            draw_image(&painter, texture_id, rect, app.session.view(), size);
        }
        draw_measurements(&painter, rect, app);
        draw_in_progress(&painter, rect, app);
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open a DICOM file to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}

/// Viewport-relative position of a window position.
fn to_local(pos: egui::Pos2, rect: egui::Rect) -> Point {
    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}

fn to_screen(p: Point, view: &ViewTransform, rect: egui::Rect) -> egui::Pos2 {
    let s = view.image_to_screen(p);
    egui::pos2(rect.min.x + s.x as f32, rect.min.y + s.y as f32)
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Whole wheel ticks in `dy`; pixel-unit scrolling is accumulated across frames.
fn scroll_ticks(unit: egui::MouseWheelUnit, dy: f32, accum: &mut f32) -> Vec<ScrollDirection> {
    let ticks = match unit {
        egui::MouseWheelUnit::Point => {
            *accum += dy;
            let whole = (*accum / SCROLL_POINTS_PER_TICK).trunc();
            *accum -= whole * SCROLL_POINTS_PER_TICK;
            whole as i32
        }
        egui::MouseWheelUnit::Line | egui::MouseWheelUnit::Page => {
            *accum = 0.0;
            if dy == 0.0 {
                0
            } else {
                (dy.abs().round() as i32).max(1) * dy.signum() as i32
            }
        }
    };

    let direction = if ticks > 0 {
        ScrollDirection::Up
    } else {
        ScrollDirection::Down
    };
    vec![direction; ticks.unsigned_abs() as usize]
}

/// Forward raw pointer, wheel and key events to the measurement session in order.
///
/// Presses and wheel ticks only count while the pointer is over the viewport
/// and not covered by a window; moves and releases are always forwarded so a
/// drag that leaves the viewport still ends.
fn handle_input(ui: &egui::Ui, response: &egui::Response, rect: egui::Rect, app: &mut CaliperApp) {
    let over_viewport = response.contains_pointer();
    let (events, hover_pos) = ui.input(|i| (i.events.clone(), i.pointer.hover_pos()));

    for event in events {
        let pointer_event = match event {
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } => {
                let Some(button) = map_button(button) else {
                    continue;
                };
                let pos = to_local(pos, rect);
                if pressed {
                    if !over_viewport {
                        continue;
                    }
                    PointerEvent::Pressed { pos, button }
                } else {
                    PointerEvent::Released { pos, button }
                }
            }
            egui::Event::PointerMoved(pos) => PointerEvent::Moved {
                pos: to_local(pos, rect),
            },
            egui::Event::MouseWheel { unit, delta, .. } => {
                let (true, Some(pos)) = (over_viewport, hover_pos) else {
                    continue;
                };
                let pos = to_local(pos, rect);
                for direction in scroll_ticks(unit, delta.y, &mut app.viewport.scroll_accum) {
                    app.session
                        .handle_event(PointerEvent::Scrolled { pos, direction });
                }
                continue;
            }
            egui::Event::Key {
                key: egui::Key::Escape,
                pressed: true,
                ..
            } => {
                app.session.cancel_gesture();
                continue;
            }
            _ => continue,
        };

        match app.session.handle_event(pointer_event) {
            SessionOutcome::NameRequested { default_name } => {
                debug!(%default_name, "Prompting for measurement name");
                app.ui_state.name_input.clear();
            }
            SessionOutcome::Ignored => {}
            outcome => debug!(?outcome, "Pointer event"),
        }
    }
}

fn update_cursor(ui: &egui::Ui, response: &egui::Response, app: &CaliperApp) {
    let icon = match app.session.state() {
        GestureState::Panning { .. } => egui::CursorIcon::Grabbing,
        GestureState::Drawing { .. } => egui::CursorIcon::Crosshair,
        _ if response.contains_pointer() => egui::CursorIcon::Crosshair,
        _ => return,
    };
    ui.ctx().set_cursor_icon(icon);
}

fn draw_image(
    painter: &egui::Painter,
    texture_id: egui::TextureId,
    rect: egui::Rect,
    view: &ViewTransform,
    size: [usize; 2],
) {
    let min = to_screen(Point::new(0.0, 0.0), view, rect);
    let max = to_screen(Point::new(size[0] as f64, size[1] as f64), view, rect);
    painter.image(
        texture_id,
        egui::Rect::from_min_max(min, max),
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

/// Text on a translucent black box centred at `pos`.
fn draw_label(painter: &egui::Painter, pos: egui::Pos2, text: String) {
    let galley = painter.layout_no_wrap(text, egui::FontId::proportional(13.0), LABEL_COLOR);
    let padding = egui::vec2(4.0, 2.0);
    let bg = egui::Rect::from_center_size(pos, galley.size() + padding * 2.0);
    painter.rect_filled(bg, 2.0, egui::Color32::from_black_alpha(128));
    painter.galley(bg.min + padding, galley, LABEL_COLOR);
}

fn draw_measurements(painter: &egui::Painter, rect: egui::Rect, app: &CaliperApp) {
    let view = app.session.view();
    let stroke = egui::Stroke::new(1.5, LINE_COLOR);

    for m in app.session.measurements() {
        let a = to_screen(m.start(), view, rect);
        let b = to_screen(m.end(), view, rect);
        painter.line_segment([a, b], stroke);
        painter.circle_filled(a, MARKER_RADIUS, LINE_COLOR);
        painter.circle_filled(b, MARKER_RADIUS, LINE_COLOR);
        draw_label(painter, to_screen(m.midpoint(), view, rect), m.label());
    }
}

/// The line being drawn, or the one waiting for its name.
fn draw_in_progress(painter: &egui::Painter, rect: egui::Rect, app: &CaliperApp) {
    let view = app.session.view();
    let (start, end, label) = if let Some(preview) = app.session.preview() {
        (preview.start, preview.end, preview.label())
    } else if let Some(pending) = app.session.pending() {
        (pending.start, pending.end, format!("{:.1}", pending.length()))
    } else {
        return;
    };

    let a = to_screen(start, view, rect);
    let b = to_screen(end, view, rect);
    painter.line_segment([a, b], egui::Stroke::new(2.0, PREVIEW_COLOR));
    let mid = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
    draw_label(painter, to_screen(mid, view, rect), label);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_ticks_follow_sign() {
        let mut accum = 0.0;
        assert_eq!(
            scroll_ticks(egui::MouseWheelUnit::Line, 1.0, &mut accum),
            vec![ScrollDirection::Up]
        );
        assert_eq!(
            scroll_ticks(egui::MouseWheelUnit::Line, -2.0, &mut accum),
            vec![ScrollDirection::Down; 2]
        );
    }

    #[test]
    fn pixel_scroll_accumulates() {
        let mut accum = 0.0;
        assert!(scroll_ticks(egui::MouseWheelUnit::Point, 30.0, &mut accum).is_empty());
        assert_eq!(
            scroll_ticks(egui::MouseWheelUnit::Point, 30.0, &mut accum),
            vec![ScrollDirection::Up]
        );
        assert!((accum - 10.0).abs() < 1e-4);
    }
}
