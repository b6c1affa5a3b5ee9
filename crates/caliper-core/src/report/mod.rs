pub mod layout;
pub mod pdf;
pub mod snapshot;

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::measurement::Measurement;

pub use layout::{build_document, paginate, Page, PageItem, PageLayout};
pub use pdf::write_pdf;
pub use snapshot::{latest_snapshot, render_snapshot, save_snapshot};

/// Title line of the text report; also marks emphasized lines in the document.
pub const REPORT_TITLE: &str = "=== Measurement Report ===";

/// Plain-text summary of the measurements, in order.
pub fn compose(measurements: &[Measurement]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{REPORT_TITLE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Total Measurements: {}", measurements.len());
    let _ = writeln!(out);

    for (i, m) in measurements.iter().enumerate() {
        let _ = writeln!(out, "Measurement #{}", i + 1);
        let _ = writeln!(out, "Name: {}", m.name());
        let _ = writeln!(out, "Length: {:.1} pixels", m.length());
        let _ = writeln!(
            out,
            "Coordinates: ({:.1}, {:.1}) to ({:.1}, {:.1})",
            m.start().x,
            m.start().y,
            m.end().x,
            m.end().y
        );
        let _ = writeln!(out);
    }
    out
}

/// `report_YYYYMMDD_HHMMSS.pdf`
pub fn report_file_name(now: NaiveDateTime) -> String {
    format!("report_{}.pdf", now.format(crate::consts::FILE_TIMESTAMP_FORMAT))
}

/// `YYYY-MM-DD HH:MM:SS`, as printed under the document title.
pub fn generated_on(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}
