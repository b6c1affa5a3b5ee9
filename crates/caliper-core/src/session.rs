//! Gesture state machine turning pointer input into committed measurements.
//!
//! A primary-button drag draws a line; releasing it does not commit right away
//! but parks the line as a [`PendingMeasurement`] until [`MeasurementSession::submit_name`]
//! supplies a name. Pointer gestures are ignored while a name is pending, so the
//! prompt always resolves before the next gesture starts. A secondary-button drag
//! pans and ends only on a secondary release; scroll ticks zoom around the
//! pointer in any state. A primary press while still drawing restarts the line.

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::measurement::{euclidean_distance, Measurement, MeasurementCollection};
use crate::store::MeasurementStore;
use crate::view::{Point, ScrollDirection, ViewTransform};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Pointer input in viewport-relative screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Pressed { pos: Point, button: PointerButton },
    Moved { pos: Point },
    Released { pos: Point, button: PointerButton },
    Scrolled { pos: Point, direction: ScrollDirection },
}

/// A finished line waiting for its name.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingMeasurement {
    pub start: Point,
    pub end: Point,
    pub default_name: String,
}

impl PendingMeasurement {
    pub fn length(&self) -> f64 {
        euclidean_distance(self.start, self.end)
    }
}

/// Provisional line shown while drawing. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preview {
    pub start: Point,
    pub end: Point,
    pub length: f64,
}

impl Preview {
    pub fn label(&self) -> String {
        format!("{:.1}", self.length)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    /// Secondary button held; `last` is the previous pointer position on screen.
    Panning { last: Point },
    /// Primary button held; points are in image space.
    Drawing { start: Point, current: Option<Point> },
    AwaitingName(PendingMeasurement),
}

/// What a single event did to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionOutcome {
    Ignored,
    PanStarted,
    Panned,
    PanEnded,
    DrawingStarted { start: Point },
    PreviewUpdated(Preview),
    /// The drawing gesture finished; the caller must prompt for a name and
    /// answer with [`MeasurementSession::submit_name`].
    NameRequested { default_name: String },
    Zoomed,
}

/// Result of committing a pending measurement.
#[derive(Debug)]
pub struct CommitOutcome {
    /// 1-based position in the collection.
    pub index: usize,
    pub measurement: Measurement,
    /// Outcome of the write-through save; `None` when no store is attached.
    /// A failed save does not undo the commit.
    pub save: Option<Result<(), StoreError>>,
}

/// Measurement state for one open image.
#[derive(Clone, Debug, Default)]
pub struct MeasurementSession {
    view: ViewTransform,
    measurements: MeasurementCollection,
    state: GestureState,
    store: Option<MeasurementStore>,
}

impl MeasurementSession {
    pub fn new(view: ViewTransform) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    /// Persist every committed measurement to `store`.
    pub fn with_store(mut self, store: MeasurementStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn store(&self) -> Option<&MeasurementStore> {
        self.store.as_ref()
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    pub fn measurements(&self) -> &MeasurementCollection {
        &self.measurements
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn preview(&self) -> Option<Preview> {
        match self.state {
            GestureState::Drawing {
                start,
                current: Some(end),
            } => Some(Preview {
                start,
                end,
                length: euclidean_distance(start, end),
            }),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingMeasurement> {
        match &self.state {
            GestureState::AwaitingName(pending) => Some(pending),
            _ => None,
        }
    }

    /// Drop all measurements and any gesture in progress, for a newly opened image.
    pub fn reset(&mut self, image_width: f64, image_height: f64) {
        self.measurements.clear();
        self.state = GestureState::Idle;
        self.view.fit(image_width, image_height);
        debug!("Session reset");
    }

    /// Abandon an in-progress pan or drawing. A pending name prompt is kept.
    pub fn cancel_gesture(&mut self) -> bool {
        match self.state {
            GestureState::Panning { .. } | GestureState::Drawing { .. } => {
                self.state = GestureState::Idle;
                debug!("Gesture cancelled");
                true
            }
            _ => false,
        }
    }

    pub fn handle_event(&mut self, event: PointerEvent) -> SessionOutcome {
        match event {
            PointerEvent::Pressed { pos, button } => self.on_press(pos, button),
            PointerEvent::Moved { pos } => self.on_move(pos),
            PointerEvent::Released { pos, button } => self.on_release(pos, button),
            PointerEvent::Scrolled { pos, direction } => self.on_scroll(pos, direction),
        }
    }

    fn on_press(&mut self, pos: Point, button: PointerButton) -> SessionOutcome {
        if !self.view.contains_screen(pos) {
            return SessionOutcome::Ignored;
        }

        // A drawing whose release landed outside the viewport restarts here.
        let restart = button == PointerButton::Primary
            && matches!(self.state, GestureState::Drawing { .. });
        if self.state != GestureState::Idle && !restart {
            return SessionOutcome::Ignored;
        }

        match button {
            PointerButton::Secondary => {
                self.state = GestureState::Panning { last: pos };
                debug!("Idle -> Panning");
                SessionOutcome::PanStarted
            }
            PointerButton::Primary => {
                let start = self.view.screen_to_image(pos);
                self.state = GestureState::Drawing {
                    start,
                    current: None,
                };
                debug!(x = start.x, y = start.y, restart, "Idle -> Drawing");
                SessionOutcome::DrawingStarted { start }
            }
            PointerButton::Middle => SessionOutcome::Ignored,
        }
    }

    fn on_move(&mut self, pos: Point) -> SessionOutcome {
        if !self.view.contains_screen(pos) {
            return SessionOutcome::Ignored;
        }

        match &mut self.state {
            GestureState::Panning { last } => {
                let scale = self.view.scale();
                let dx = (last.x - pos.x) * scale;
                let dy = (last.y - pos.y) * scale;
                *last = pos;
                self.view.pan(dx, dy);
                SessionOutcome::Panned
            }
            GestureState::Drawing { start, current } => {
                let end = self.view.screen_to_image(pos);
                *current = Some(end);
                SessionOutcome::PreviewUpdated(Preview {
                    start: *start,
                    end,
                    length: euclidean_distance(*start, end),
                })
            }
            _ => SessionOutcome::Ignored,
        }
    }

    fn on_release(&mut self, pos: Point, button: PointerButton) -> SessionOutcome {
        // A pan ends on a secondary release, even outside the viewport.
        if matches!(self.state, GestureState::Panning { .. }) {
            if button != PointerButton::Secondary {
                return SessionOutcome::Ignored;
            }
            self.state = GestureState::Idle;
            debug!("Panning -> Idle");
            return SessionOutcome::PanEnded;
        }

        if !self.view.contains_screen(pos) || button != PointerButton::Primary {
            return SessionOutcome::Ignored;
        }

        let GestureState::Drawing { start, .. } = self.state else {
            return SessionOutcome::Ignored;
        };

        let end = self.view.screen_to_image(pos);
        let default_name = self.measurements.next_default_name();
        self.state = GestureState::AwaitingName(PendingMeasurement {
            start,
            end,
            default_name: default_name.clone(),
        });
        debug!(x = end.x, y = end.y, "Drawing -> AwaitingName");
        SessionOutcome::NameRequested { default_name }
    }

    fn on_scroll(&mut self, pos: Point, direction: ScrollDirection) -> SessionOutcome {
        if !self.view.contains_screen(pos) {
            return SessionOutcome::Ignored;
        }
        let focus = self.view.screen_to_image(pos);
        if self.view.zoom_step(focus, direction) {
            SessionOutcome::Zoomed
        } else {
            SessionOutcome::Ignored
        }
    }

    /// Name the pending measurement, append it and save the collection.
    ///
    /// Blank or absent names fall back to `"Measurement {n}"`. Returns `None`
    /// when no measurement is pending.
    pub fn submit_name(&mut self, name: Option<&str>) -> Option<CommitOutcome> {
        if !matches!(self.state, GestureState::AwaitingName(_)) {
            return None;
        }
        let GestureState::AwaitingName(pending) = std::mem::take(&mut self.state) else {
            return None;
        };

        let name = self.measurements.resolve_name(name);
        let measurement = Measurement::new(name, pending.start, pending.end);
        self.measurements.push(measurement.clone());
        let index = self.measurements.len();
        debug!(index, name = measurement.name(), length = measurement.length(), "AwaitingName -> Idle");

        let save = self.store.as_ref().map(|store| {
            let result = store.save(self.measurements.as_slice());
            if let Err(ref e) = result {
                warn!("Measurement kept in memory but not saved: {e}");
            }
            result
        });

        Some(CommitOutcome {
            index,
            measurement,
            save,
        })
    }
}
