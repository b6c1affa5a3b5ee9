use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::{EPSILON, PARALLEL_PIXEL_THRESHOLD};

/// Linear remap from stored values to calibrated intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rescale {
    pub slope: f64,
    pub intercept: f64,
}

impl Rescale {
    pub fn apply(&self, raw: f32) -> f32 {
        (raw as f64 * self.slope + self.intercept) as f32
    }
}

/// Descriptive attributes of the decoded file.
#[derive(Clone, Debug, Default)]
pub struct ImageInfo {
    pub bits_allocated: u16,
    pub samples_per_pixel: u16,
    pub frame_count: u32,
    pub photometric: Option<String>,
    pub modality: Option<String>,
    pub patient_name: Option<String>,
    pub study_description: Option<String>,
    pub transfer_syntax: String,
}

/// A decoded 2D intensity grid.
///
/// `data` has shape `(rows, cols)` and already has the rescale applied, if any.
#[derive(Clone, Debug)]
pub struct Image {
    pub data: Array2<f32>,
    pub rescale: Option<Rescale>,
    pub info: ImageInfo,
}

impl Image {
    pub fn new(data: Array2<f32>) -> Self {
        Self {
            data,
            rescale: None,
            info: ImageInfo::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Minimum and maximum intensity. `(0.0, 0.0)` for an empty grid.
    pub fn intensity_range(&self) -> (f32, f32) {
        let mut iter = self.data.iter().copied().filter(|v| v.is_finite());
        let Some(first) = iter.next() else {
            return (0.0, 0.0);
        };
        iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }

    /// Intensity at a pixel, `None` outside the grid.
    pub fn sample(&self, row: isize, col: isize) -> Option<f32> {
        if row < 0 || col < 0 {
            return None;
        }
        self.data.get((row as usize, col as usize)).copied()
    }

    /// Map the full dynamic range linearly onto 0..=255, row-major.
    ///
    /// Flat images map to 0.
    pub fn to_gray8(&self) -> Vec<u8> {
        let (lo, hi) = self.intensity_range();
        let span = hi - lo;
        let to_byte = move |v: f32| -> u8 {
            if span <= EPSILON || !v.is_finite() {
                0
            } else {
                (((v - lo) / span).clamp(0.0, 1.0) * 255.0).round() as u8
            }
        };

        let (h, w) = self.data.dim();
        if h * w >= PARALLEL_PIXEL_THRESHOLD {
            let rows: Vec<Vec<u8>> = (0..h)
                .into_par_iter()
                .map(|row| (0..w).map(|col| to_byte(self.data[[row, col]])).collect())
                .collect();
            rows.concat()
        } else {
            self.data.iter().map(|&v| to_byte(v)).collect()
        }
    }
}
