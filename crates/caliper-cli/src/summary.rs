use std::path::Path;

use console::Style;
use caliper_core::image::Image;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn row(s: &Styles, label: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("  {:<16}{}", s.label.apply_to(label), s.value.apply_to(v)),
        None => println!("  {:<16}{}", s.label.apply_to(label), s.disabled.apply_to("-")),
    }
}

pub fn print_image_summary(path: &Path, image: &Image) {
    let s = Styles::new();
    let info = &image.info;

    println!();
    println!("  {}", s.title.apply_to("DICOM Image"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(11)));
    println!();

    println!(
        "  {:<16}{}",
        s.label.apply_to("File"),
        s.path.apply_to(path.display())
    );
    row(&s, "Dimensions", Some(&format!("{}x{}", image.width(), image.height())));
    row(&s, "Bits allocated", Some(&info.bits_allocated.to_string()));
    row(&s, "Samples/pixel", Some(&info.samples_per_pixel.to_string()));
    row(&s, "Frames", Some(&info.frame_count.to_string()));
    row(&s, "Photometric", info.photometric.as_deref());
    row(&s, "Transfer syntax", Some(&info.transfer_syntax));
    println!();

    println!("  {}", s.header.apply_to("Study"));
    row(&s, "Modality", info.modality.as_deref());
    row(&s, "Patient", info.patient_name.as_deref());
    row(&s, "Description", info.study_description.as_deref());
    println!();

    println!("  {}", s.header.apply_to("Intensity"));
    let rescale = image
        .rescale
        .map(|r| format!("slope {} intercept {}", r.slope, r.intercept));
    row(&s, "Rescale", rescale.as_deref());
    let (lo, hi) = image.intensity_range();
    row(&s, "Range", Some(&format!("{lo} .. {hi}")));
    println!();
}

pub fn print_export_summary(count: usize, snapshot: &Path, pdf: &Path) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<16}{}",
        s.label.apply_to("Measurements"),
        s.value.apply_to(count)
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Screenshot"),
        s.path.apply_to(snapshot.display())
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Report"),
        s.path.apply_to(pdf.display())
    );
    println!();
}
