use std::path::{Path, PathBuf};

use ::image::{Rgb, RgbImage};
use chrono::NaiveDateTime;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::consts::{FILE_TIMESTAMP_FORMAT, PARALLEL_PIXEL_THRESHOLD, SNAPSHOT_PREFIX};
use crate::error::RenderError;
use crate::image::Image;
use crate::measurement::Measurement;
use crate::view::{Point, ViewTransform};

/// Fill outside the image bounds.
pub const BACKGROUND: [u8; 3] = [43, 43, 43];
pub const LINE_COLOR: [u8; 3] = [0, 128, 0];
/// Radius of the endpoint markers, in screen pixels.
pub const MARKER_RADIUS: i64 = 3;

/// Rasterize the visible range of `view` at viewport resolution with the
/// measurement overlays drawn on top.
///
/// Each screen pixel takes the image pixel under its centre.
pub fn render_snapshot(
    image: &Image,
    view: &ViewTransform,
    measurements: &[Measurement],
) -> Result<RgbImage, RenderError> {
    let (vw, vh) = view.viewport_size();
    let width = vw.floor() as u32;
    let height = vh.floor() as u32;
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyViewport);
    }

    let gray = image.to_gray8();
    let img_w = image.width();
    let img_h = image.height();

    let render_row = |sy: u32| -> Vec<u8> {
        let mut row = Vec::with_capacity(width as usize * 3);
        for sx in 0..width {
            let p = view.screen_to_image(Point::new(sx as f64 + 0.5, sy as f64 + 0.5));
            let (col, line) = (p.x.floor(), p.y.floor());
            let inside = col >= 0.0 && line >= 0.0 && (col as usize) < img_w && (line as usize) < img_h;
            if inside {
                let v = gray[line as usize * img_w + col as usize];
                row.extend_from_slice(&[v, v, v]);
            } else {
                row.extend_from_slice(&BACKGROUND);
            }
        }
        row
    };

    let rows: Vec<Vec<u8>> = if (width as usize) * (height as usize) >= PARALLEL_PIXEL_THRESHOLD {
        (0..height).into_par_iter().map(render_row).collect()
    } else {
        (0..height).map(render_row).collect()
    };

    let mut canvas =
        RgbImage::from_raw(width, height, rows.concat()).ok_or(RenderError::EmptyViewport)?;

    for m in measurements {
        let a = view.image_to_screen(m.start());
        let b = view.image_to_screen(m.end());
        draw_line(&mut canvas, a, b, Rgb(LINE_COLOR));
        draw_marker(&mut canvas, a, Rgb(LINE_COLOR));
        draw_marker(&mut canvas, b, Rgb(LINE_COLOR));
    }

    debug!(width, height, overlays = measurements.len(), "Rendered snapshot");
    Ok(canvas)
}

/// Clip a segment to `[0, w] x [0, h]` (Liang-Barsky). `None` if it misses.
fn clip_segment(a: Point, b: Point, w: f64, h: f64) -> Option<(Point, Point)> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [(-dx, a.x), (dx, w - a.x), (-dy, a.y), (dy, h - a.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        Point::new(a.x + t0 * dx, a.y + t0 * dy),
        Point::new(a.x + t1 * dx, a.y + t1 * dy),
    ))
}

fn put(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

/// Two-pixel-wide line, stepped along its major axis.
fn draw_line(canvas: &mut RgbImage, a: Point, b: Point, color: Rgb<u8>) {
    if ![a.x, a.y, b.x, b.y].iter().all(|v| v.is_finite()) {
        return;
    }
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    let Some((a, b)) = clip_segment(a, b, w, h) else {
        return;
    };

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
    let steep = dy.abs() > dx.abs();
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (a.x + t * dx).floor() as i64;
        let y = (a.y + t * dy).floor() as i64;
        put(canvas, x, y, color);
        if steep {
            put(canvas, x + 1, y, color);
        } else {
            put(canvas, x, y + 1, color);
        }
    }
}

fn draw_marker(canvas: &mut RgbImage, center: Point, color: Rgb<u8>) {
    if !center.x.is_finite() || !center.y.is_finite() {
        return;
    }
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    let r = MARKER_RADIUS as f64;
    if center.x < -r || center.y < -r || center.x > w + r || center.y > h + r {
        return;
    }
    let cx = center.x.floor() as i64;
    let cy = center.y.floor() as i64;
    for oy in -MARKER_RADIUS..=MARKER_RADIUS {
        for ox in -MARKER_RADIUS..=MARKER_RADIUS {
            if ox * ox + oy * oy <= MARKER_RADIUS * MARKER_RADIUS {
                put(canvas, cx + ox, cy + oy, color);
            }
        }
    }
}

/// Write `snapshot` as `screenshot_YYYYMMDD_HHMMSS.png` in `dir`, adding a
/// `_N` suffix when that name is taken.
pub fn save_snapshot(
    dir: &Path,
    snapshot: &RgbImage,
    now: NaiveDateTime,
) -> Result<PathBuf, RenderError> {
    if snapshot.width() == 0 || snapshot.height() == 0 {
        return Err(RenderError::EmptySnapshot(dir.to_path_buf()));
    }
    std::fs::create_dir_all(dir)?;

    let stem = format!("{SNAPSHOT_PREFIX}{}", now.format(FILE_TIMESTAMP_FORMAT));
    let mut path = dir.join(format!("{stem}.png"));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{stem}_{n}.png"));
        n += 1;
    }

    snapshot.save(&path)?;
    info!(path = %path.display(), "Saved snapshot");
    Ok(path)
}

/// Most recently modified `screenshot_*.png` in `dir`.
pub fn latest_snapshot(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.starts_with(SNAPSHOT_PREFIX) && name.ends_with(".png")
        })
        .filter_map(|e| {
            let modified = e.metadata().and_then(|m| m.modified()).ok()?;
            Some((modified, e.path()))
        })
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, path)| path)
}
