mod common;

use std::time::Duration;

use chrono::NaiveDate;
use ndarray::Array2;
use tempfile::TempDir;

use caliper_core::error::RenderError;
use caliper_core::image::Image;
use caliper_core::report::layout::{
    build_document, note_page, paginate, FontStyle, PageItem, PageLayout, SNAPSHOT_TITLE,
};
use caliper_core::report::{
    compose, latest_snapshot, render_snapshot, report_file_name, save_snapshot, write_pdf,
};
use caliper_core::view::ViewTransform;
use common::measurement;

fn timestamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(14, 7, 9)
        .unwrap()
}

fn body_lines(page: &caliper_core::report::Page) -> Vec<(String, f32, FontStyle)> {
    page.items
        .iter()
        .filter_map(|item| match item {
            PageItem::Text { text, y, style, .. } => Some((text.clone(), *y, *style)),
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Text report
// ---------------------------------------------------------------------------

#[test]
fn test_compose_empty() {
    let text = compose(&[]);
    assert!(text.starts_with("=== Measurement Report ===\n"));
    assert!(text.contains("Total Measurements: 0"));
    assert!(!text.contains("Measurement #"));
}

#[test]
fn test_compose_lists_measurements_in_order() {
    let text = compose(&[
        measurement("Femur", 10.0, 10.0, 13.0, 14.0),
        measurement("Measurement 2", 0.0, 0.0, 0.25, 0.0),
    ]);

    assert!(text.contains("Total Measurements: 2"));
    let first = text.find("Measurement #1").unwrap();
    let second = text.find("Measurement #2").unwrap();
    assert!(first < second);

    assert!(text.contains(
        "Measurement #1\nName: Femur\nLength: 5.0 pixels\nCoordinates: (10.0, 10.0) to (13.0, 14.0)\n"
    ));
    assert!(text.contains("Length: 0.2 pixels") || text.contains("Length: 0.3 pixels"));
}

#[test]
fn test_report_file_name() {
    assert_eq!(report_file_name(timestamp()), "report_20240305_140709.pdf");
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn test_first_page_header() {
    let layout = PageLayout::letter();
    let pages = paginate("", "2024-03-05 14:07:09", &layout);
    assert_eq!(pages.len(), 1);

    let lines = body_lines(&pages[0]);
    assert_eq!(lines[0].0, "DICOM Measurement Report");
    assert_eq!(lines[0].1, 750.0);
    assert_eq!(lines[1].0, "Generated on: 2024-03-05 14:07:09");
    assert_eq!(lines[1].1, 730.0);
    assert!(pages[0].items.contains(&PageItem::Rule {
        x0: 50.0,
        x1: 550.0,
        y: 725.0
    }));
}

#[test]
fn test_body_lines_step_down_with_bold_headings() {
    let layout = PageLayout::letter();
    let text = compose(&[measurement("A", 0.0, 0.0, 1.0, 0.0)]);
    let pages = paginate(&text, "now", &layout);
    let lines = body_lines(&pages[0]);

    let (title, y, style) = &lines[2];
    assert_eq!(title, "=== Measurement Report ===");
    assert_eq!(*y, 700.0);
    assert_eq!(*style, FontStyle::Bold);

    // Blank line after the title leaves a gap.
    let (total, y, style) = &lines[3];
    assert_eq!(total, "Total Measurements: 1");
    assert_eq!(*y, 670.0);
    assert_eq!(*style, FontStyle::Regular);

    let heading = lines.iter().find(|l| l.0 == "Measurement #1").unwrap();
    assert_eq!(heading.2, FontStyle::Bold);
    let name = lines.iter().find(|l| l.0 == "Name: A").unwrap();
    assert_eq!(name.2, FontStyle::Regular);
}

#[test]
fn test_long_report_spills_onto_new_pages() {
    let layout = PageLayout::letter();
    let text: String = (0..80).map(|i| format!("line {i}\n")).collect();
    let pages = paginate(&text, "now", &layout);

    // 700 down to 100 fits 41 lines on the first page; 750 down to 100 fits 44.
    assert_eq!(pages.len(), 2);
    let first: Vec<_> = body_lines(&pages[0]).into_iter().skip(2).collect();
    assert_eq!(first.len(), 41);
    assert_eq!(first.last().unwrap().1, 100.0);

    let second = body_lines(&pages[1]);
    assert_eq!(second[0].0, "line 41");
    assert_eq!(second[0].1, 750.0);
    assert_eq!(second.len(), 39);
}

#[test]
fn test_no_trailing_empty_page() {
    let layout = PageLayout::letter();
    let text: String = (0..41).map(|i| format!("line {i}\n")).collect();
    let text = format!("{text}\n\n\n");
    let pages = paginate(&text, "now", &layout);
    assert_eq!(pages.len(), 1);
}

#[test]
fn test_snapshot_page_fits_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("screenshot_20240101_000000.png");
    image::RgbImage::new(1000, 500).save(&path).unwrap();

    let layout = PageLayout::letter();
    let pages = build_document("hello\n", "now", Some(&path), &layout);
    assert_eq!(pages.len(), 2);

    let snapshot = &pages[1];
    assert!(snapshot.texts().any(|t| t == SNAPSHOT_TITLE));
    let image = snapshot
        .items
        .iter()
        .find_map(|item| match item {
            PageItem::Image {
                x,
                y,
                width,
                height,
                ..
            } => Some((*x, *y, *width, *height)),
            _ => None,
        })
        .unwrap();
    assert_eq!(image, (56.0, 480.0, 500.0, 250.0));
}

#[test]
fn test_unreadable_snapshot_becomes_note() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("screenshot_broken.png");
    std::fs::write(&path, b"not a png").unwrap();

    let pages = build_document("", "now", Some(&path), &PageLayout::letter());
    let texts: Vec<&str> = pages[1].texts().collect();
    assert!(texts
        .iter()
        .any(|t| t.starts_with("Could not insert image: ")));
    assert!(!pages[1]
        .items
        .iter()
        .any(|i| matches!(i, PageItem::Image { .. })));
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

fn checker_image() -> Image {
    let data = Array2::from_shape_fn((10, 10), |(r, c)| ((r + c) % 2) as f32 * 100.0);
    Image::new(data)
}

#[test]
fn test_render_snapshot_identity_view() {
    let image = checker_image();
    let view = ViewTransform::new(20.0, 10.0);
    let rgb = render_snapshot(&image, &view, &[]).unwrap();

    assert_eq!(rgb.dimensions(), (20, 10));
    assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(rgb.get_pixel(1, 0).0, [255, 255, 255]);
    // Past the right edge of the image.
    assert_eq!(rgb.get_pixel(15, 5).0, [43, 43, 43]);
}

#[test]
fn test_render_snapshot_draws_overlay() {
    let image = Image::new(Array2::zeros((20, 20)));
    let view = ViewTransform::new(20.0, 20.0);
    let rgb = render_snapshot(&image, &view, &[measurement("m", 2.0, 10.0, 17.0, 10.0)]).unwrap();

    assert_eq!(rgb.get_pixel(10, 10).0, [0, 128, 0]);
    assert_eq!(rgb.get_pixel(2, 10).0, [0, 128, 0]);
    assert_eq!(rgb.get_pixel(10, 2).0, [0, 0, 0]);
}

#[test]
fn test_render_snapshot_empty_viewport() {
    let err = render_snapshot(&checker_image(), &ViewTransform::default(), &[]).unwrap_err();
    assert!(matches!(err, RenderError::EmptyViewport));
}

#[test]
fn test_save_snapshot_names_and_suffixes() {
    let dir = TempDir::new().unwrap();
    let rgb = image::RgbImage::new(4, 4);

    let first = save_snapshot(dir.path(), &rgb, timestamp()).unwrap();
    let second = save_snapshot(dir.path(), &rgb, timestamp()).unwrap();
    assert_eq!(
        first.file_name().unwrap(),
        "screenshot_20240305_140709.png"
    );
    assert_eq!(
        second.file_name().unwrap(),
        "screenshot_20240305_140709_1.png"
    );
    assert_eq!(latest_snapshot(dir.path()).map(|p| p.exists()), Some(true));
}

#[test]
fn test_latest_snapshot_ignores_other_files() {
    let dir = TempDir::new().unwrap();
    assert!(latest_snapshot(dir.path()).is_none());

    std::fs::write(dir.path().join("notes.png"), b"").unwrap();
    std::fs::write(dir.path().join("screenshot_a.txt"), b"").unwrap();
    assert!(latest_snapshot(dir.path()).is_none());

    let rgb = image::RgbImage::new(2, 2);
    let older = dir.path().join("screenshot_1.png");
    rgb.save(&older).unwrap();
    std::thread::sleep(Duration::from_millis(20));
    let newer = dir.path().join("screenshot_2.png");
    rgb.save(&newer).unwrap();

    assert_eq!(latest_snapshot(dir.path()), Some(newer));
}

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

#[test]
fn test_write_pdf_with_snapshot() {
    let dir = TempDir::new().unwrap();
    let image = checker_image();
    let mut view = ViewTransform::new(64.0, 48.0);
    view.fit(10.0, 10.0);
    let measurements = [measurement("m", 1.0, 1.0, 8.0, 8.0)];
    let rgb = render_snapshot(&image, &view, &measurements).unwrap();
    let snapshot = save_snapshot(dir.path(), &rgb, timestamp()).unwrap();

    let layout = PageLayout::letter();
    let pages = build_document(&compose(&measurements), "now", Some(&snapshot), &layout);
    let pdf = dir.path().join(report_file_name(timestamp()));
    write_pdf(&pages, &layout, &pdf).unwrap();

    let bytes = std::fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_write_pdf_with_note_page() {
    let dir = TempDir::new().unwrap();
    let layout = PageLayout::letter();
    let mut pages = build_document("", "now", None, &layout);
    pages.push(note_page("missing", &layout));

    let pdf = dir.path().join("report.pdf");
    write_pdf(&pages, &layout, &pdf).unwrap();
    assert!(std::fs::metadata(&pdf).unwrap().len() > 0);
}
