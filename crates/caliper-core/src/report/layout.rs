//! Page layout of the exported report, in PDF points with the origin at the
//! bottom-left corner of the page.
//!
//! Layout is kept separate from rendering so pagination can be checked without
//! producing a document.

use std::path::{Path, PathBuf};

use tracing::warn;

pub const DOCUMENT_TITLE: &str = "DICOM Measurement Report";
pub const SNAPSHOT_TITLE: &str = "DICOM Image with Measurements";

/// US Letter, in points.
pub const LETTER_WIDTH: f32 = 612.0;
pub const LETTER_HEIGHT: f32 = 792.0;

#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    /// Left edge of all text.
    pub margin: f32,
    /// Right end of the header rule.
    pub rule_right: f32,
    /// Baseline of page titles, and of the first body line on continuation pages.
    pub top: f32,
    pub subtitle_y: f32,
    pub rule_y: f32,
    /// Baseline of the first body line on the first page.
    pub body_top: f32,
    pub line_height: f32,
    /// A new page starts once the cursor falls below this.
    pub bottom: f32,
    pub title_size: f32,
    pub body_size: f32,
    pub image_max_width: f32,
    pub image_max_height: f32,
    /// Space between the snapshot title baseline and the image top.
    pub image_gap: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::letter()
    }
}

impl PageLayout {
    pub fn letter() -> Self {
        Self::for_page(LETTER_WIDTH, LETTER_HEIGHT)
    }

    /// Geometry for an arbitrary page, anchored to the top edge.
    pub fn for_page(width: f32, height: f32) -> Self {
        let top = height - 42.0;
        Self {
            width,
            height,
            margin: 50.0,
            rule_right: width - 62.0,
            top,
            subtitle_y: top - 20.0,
            rule_y: top - 25.0,
            body_top: top - 50.0,
            line_height: 15.0,
            bottom: 100.0,
            title_size: 12.0,
            body_size: 10.0,
            image_max_width: 500.0,
            image_max_height: 600.0,
            image_gap: 20.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageItem {
    /// `y` is the text baseline.
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
    },
    Rule { x0: f32, x1: f32, y: f32 },
    /// `(x, y)` is the bottom-left corner of the placed image.
    Image {
        path: PathBuf,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        width_px: u32,
        height_px: u32,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub items: Vec<PageItem>,
}

impl Page {
    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, style: FontStyle) {
        self.items.push(PageItem::Text {
            text: text.into(),
            x,
            y,
            size,
            style,
        });
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Report lines rendered in bold.
pub fn is_emphasized(line: &str) -> bool {
    line.starts_with("===") || line.starts_with("Measurement #")
}

/// Lay out the report text on as many pages as it needs.
///
/// The first page carries the document title, the generation time and a rule.
/// Blank lines take vertical space but produce no item. A page is only started
/// when a line actually needs it, so the result never ends with an empty page.
pub fn paginate(report_text: &str, generated_on: &str, layout: &PageLayout) -> Vec<Page> {
    let mut first = Page::default();
    first.text(
        DOCUMENT_TITLE,
        layout.margin,
        layout.top,
        layout.title_size,
        FontStyle::Regular,
    );
    first.text(
        format!("Generated on: {generated_on}"),
        layout.margin,
        layout.subtitle_y,
        layout.body_size,
        FontStyle::Regular,
    );
    first.items.push(PageItem::Rule {
        x0: layout.margin,
        x1: layout.rule_right,
        y: layout.rule_y,
    });

    let mut pages = vec![first];
    let mut y = layout.body_top;

    let lines: Vec<&str> = report_text.lines().collect();
    let used = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(0, |i| i + 1);

    for line in &lines[..used] {
        if y < layout.bottom {
            pages.push(Page::default());
            y = layout.top;
        }
        if !line.is_empty() {
            let style = if is_emphasized(line) {
                FontStyle::Bold
            } else {
                FontStyle::Regular
            };
            if let Some(page) = pages.last_mut() {
                page.text(*line, layout.margin, y, layout.body_size, style);
            }
        }
        y -= layout.line_height;
    }

    pages
}

/// Placed size of an image, preserving its aspect ratio: full width first,
/// then shrunk to the height limit.
pub fn fit_image(width_px: u32, height_px: u32, layout: &PageLayout) -> (f32, f32) {
    if width_px == 0 || height_px == 0 {
        return (0.0, 0.0);
    }
    let aspect = height_px as f32 / width_px as f32;
    let mut width = layout.image_max_width;
    let mut height = width * aspect;
    if height > layout.image_max_height {
        height = layout.image_max_height;
        width = height / aspect;
    }
    (width, height)
}

fn titled_page(layout: &PageLayout) -> Page {
    let mut page = Page::default();
    page.text(
        SNAPSHOT_TITLE,
        layout.margin,
        layout.top,
        layout.title_size,
        FontStyle::Bold,
    );
    page
}

/// Snapshot page carrying `Could not insert image: <cause>` instead of the image.
pub fn note_page(cause: &str, layout: &PageLayout) -> Page {
    let mut page = titled_page(layout);
    page.text(
        format!("Could not insert image: {cause}"),
        layout.margin,
        layout.subtitle_y,
        layout.body_size,
        FontStyle::Regular,
    );
    page
}

/// Page showing the snapshot image, centred below its title.
pub fn snapshot_page(path: &Path, layout: &PageLayout) -> Page {
    let (width_px, height_px) = match ::image::image_dimensions(path) {
        Ok((w, h)) if w > 0 && h > 0 => (w, h),
        Ok(_) => return note_page("image has no pixels", layout),
        Err(e) => {
            warn!(path = %path.display(), "Snapshot unreadable: {e}");
            return note_page(&e.to_string(), layout);
        }
    };

    let (width, height) = fit_image(width_px, height_px, layout);
    let mut page = titled_page(layout);
    page.items.push(PageItem::Image {
        path: path.to_path_buf(),
        x: (layout.width - width) / 2.0,
        y: layout.top - height - layout.image_gap,
        width,
        height,
        width_px,
        height_px,
    });
    page
}

/// All pages of the exported document: the paginated report, then the snapshot
/// page when a snapshot is given.
pub fn build_document(
    report_text: &str,
    generated_on: &str,
    snapshot: Option<&Path>,
    layout: &PageLayout,
) -> Vec<Page> {
    let mut pages = paginate(report_text, generated_on, layout);
    if let Some(path) = snapshot {
        pages.push(snapshot_page(path, layout));
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_geometry() {
        let layout = PageLayout::letter();
        assert_eq!(layout.top, 750.0);
        assert_eq!(layout.subtitle_y, 730.0);
        assert_eq!(layout.rule_y, 725.0);
        assert_eq!(layout.body_top, 700.0);
        assert_eq!(layout.rule_right, 550.0);
    }

    #[test]
    fn emphasis() {
        assert!(is_emphasized("=== Measurement Report ==="));
        assert!(is_emphasized("Measurement #3"));
        assert!(!is_emphasized("Name: Measurement #3"));
        assert!(!is_emphasized("Total Measurements: 2"));
    }

    #[test]
    fn wide_image_uses_full_width() {
        let (w, h) = fit_image(1000, 500, &PageLayout::letter());
        assert_eq!(w, 500.0);
        assert_eq!(h, 250.0);
    }

    #[test]
    fn tall_image_is_clamped_to_height() {
        let (w, h) = fit_image(300, 900, &PageLayout::letter());
        assert_eq!(h, 600.0);
        assert!((w - 200.0).abs() < 1e-3);
    }
}
