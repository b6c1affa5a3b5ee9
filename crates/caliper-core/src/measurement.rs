use std::fmt;

use crate::view::Point;

/// Straight-line distance between two image-space points.
pub fn euclidean_distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Name given to the n-th measurement (1-based) when the user supplies none.
pub fn default_name(n: usize) -> String {
    format!("Measurement {n}")
}

/// A named straight-line measurement in image space.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    name: String,
    start: Point,
    end: Point,
    length: f64,
}

impl Measurement {
    pub fn new(name: impl Into<String>, start: Point, end: Point) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            length: euclidean_distance(start, end),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Overlay label, e.g. `"Femur: 42.3"`.
    pub fn label(&self) -> String {
        format!("{}: {:.1}", self.name, self.length)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.1}, {:.1}) -> ({:.1}, {:.1}) = {:.1} px",
            self.name, self.start.x, self.start.y, self.end.x, self.end.y, self.length
        )
    }
}

/// Ordered measurements of the open image, in creation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasurementCollection {
    items: Vec<Measurement>,
}

impl MeasurementCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Measurement] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Measurement> {
        self.items.iter()
    }

    pub fn last(&self) -> Option<&Measurement> {
        self.items.last()
    }

    /// Default name for the next measurement appended.
    pub fn next_default_name(&self) -> String {
        default_name(self.items.len() + 1)
    }

    /// Trimmed user input, or the default name when it is blank or absent.
    pub fn resolve_name(&self, input: Option<&str>) -> String {
        match input.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.next_default_name(),
        }
    }

    pub fn push(&mut self, measurement: Measurement) {
        self.items.push(measurement);
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a MeasurementCollection {
    type Item = &'a Measurement;
    type IntoIter = std::slice::Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Measurement> for MeasurementCollection {
    fn from_iter<T: IntoIterator<Item = Measurement>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
