use crate::consts::{MIN_VIEW_SPAN, ZOOM_STEP};

/// A 2D point, in either screen or image space depending on context.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Image-space bounds currently shown in the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl VisibleRange {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }
}

/// Scroll wheel direction for one discrete tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Zoom in.
    Up,
    /// Zoom out.
    Down,
}

/// Pan/zoom state mapping viewport pixels to image coordinates.
///
/// Screen coordinates are relative to the viewport's top-left corner, y down.
/// Image coordinates put pixel `(row, col)` at `[col, col + 1) x [row, row + 1)`.
/// The mapping is `image = origin + screen * scale` with one uniform scale,
/// so it stays invertible as long as `scale` is finite and positive.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
    origin: Point,
    scale: f64,
    viewport_width: f64,
    viewport_height: f64,
    zoom_step: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            origin: Point::default(),
            scale: 1.0,
            viewport_width: 0.0,
            viewport_height: 0.0,
            zoom_step: ZOOM_STEP,
        }
    }
}

impl ViewTransform {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let mut view = Self::default();
        view.set_viewport(viewport_width, viewport_height);
        view
    }

    /// Override the per-tick zoom factor. Values not greater than 1 are ignored.
    pub fn with_zoom_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 1.0 {
            self.zoom_step = step;
        }
        self
    }

    pub fn zoom_step_factor(&self) -> f64 {
        self.zoom_step
    }

    /// Resize the viewport, keeping origin and scale.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.viewport_height = if height.is_finite() { height.max(0.0) } else { 0.0 };
    }

    pub fn viewport_size(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    /// Image units per screen pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Screen pixels per image pixel, as a percentage.
    pub fn zoom_percent(&self) -> f64 {
        100.0 / self.scale
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn visible_range(&self) -> VisibleRange {
        VisibleRange {
            x_min: self.origin.x,
            x_max: self.origin.x + self.viewport_width * self.scale,
            y_min: self.origin.y,
            y_max: self.origin.y + self.viewport_height * self.scale,
        }
    }

    /// Show the whole image centred in the viewport.
    pub fn fit(&mut self, image_width: f64, image_height: f64) {
        if self.viewport_width <= 0.0
            || self.viewport_height <= 0.0
            || image_width <= 0.0
            || image_height <= 0.0
        {
            self.origin = Point::default();
            self.scale = 1.0;
            return;
        }

        let scale = (image_width / self.viewport_width).max(image_height / self.viewport_height);
        self.scale = scale;
        self.origin = Point::new(
            image_width / 2.0 - self.viewport_width * scale / 2.0,
            image_height / 2.0 - self.viewport_height * scale / 2.0,
        );
    }

    pub fn contains_screen(&self, screen: Point) -> bool {
        screen.x >= 0.0
            && screen.y >= 0.0
            && screen.x < self.viewport_width
            && screen.y < self.viewport_height
    }

    pub fn screen_to_image(&self, screen: Point) -> Point {
        Point::new(
            self.origin.x + screen.x * self.scale,
            self.origin.y + screen.y * self.scale,
        )
    }

    pub fn image_to_screen(&self, image: Point) -> Point {
        Point::new(
            (image.x - self.origin.x) / self.scale,
            (image.y - self.origin.y) / self.scale,
        )
    }

    /// Shift the visible range by an image-space delta. Unbounded.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        if delta_x.is_finite() && delta_y.is_finite() {
            self.origin.x += delta_x;
            self.origin.y += delta_y;
        }
    }

    /// Rescale the visible range around an image-space focus point.
    ///
    /// The focus keeps its screen position. `factor < 1` zooms in. Returns
    /// `false` and leaves the view untouched when the result would be degenerate.
    pub fn zoom(&mut self, focus: Point, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 || !focus.x.is_finite() || !focus.y.is_finite() {
            return false;
        }

        let new_scale = self.scale * factor;
        let min_dim = self.viewport_width.min(self.viewport_height).max(1.0);
        if !new_scale.is_finite() || new_scale * min_dim < MIN_VIEW_SPAN {
            return false;
        }

        let origin = Point::new(
            focus.x - (focus.x - self.origin.x) * factor,
            focus.y - (focus.y - self.origin.y) * factor,
        );
        if !origin.x.is_finite() || !origin.y.is_finite() {
            return false;
        }

        self.origin = origin;
        self.scale = new_scale;
        true
    }

    /// One scroll tick around an image-space focus point.
    pub fn zoom_step(&mut self, focus: Point, direction: ScrollDirection) -> bool {
        let factor = match direction {
            ScrollDirection::Up => 1.0 / self.zoom_step,
            ScrollDirection::Down => self.zoom_step,
        };
        self.zoom(focus, factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_factor() {
        let mut view = ViewTransform::new(100.0, 100.0);
        let before = view.clone();
        assert!(!view.zoom(Point::new(5.0, 5.0), 0.0));
        assert!(!view.zoom(Point::new(5.0, 5.0), -2.0));
        assert!(!view.zoom(Point::new(5.0, 5.0), f64::NAN));
        assert_eq!(view, before);
    }

    #[test]
    fn rejects_collapse_below_min_span() {
        let mut view = ViewTransform::new(100.0, 100.0);
        assert!(!view.zoom(Point::new(0.0, 0.0), 1e-12));
        assert_eq!(view.scale(), 1.0);
    }

    #[test]
    fn zoom_step_ignores_small_override() {
        let view = ViewTransform::default().with_zoom_step(0.5);
        assert_eq!(view.zoom_step_factor(), ZOOM_STEP);
    }
}
