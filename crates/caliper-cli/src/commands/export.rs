use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use caliper_core::config::ViewerConfig;
use caliper_core::io::dicom;
use caliper_core::report;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use super::report::write_report_pdf;
use super::snapshot::render_fitted;
use super::{load_measurements, output_dir};

#[derive(Args)]
pub struct ExportArgs {
    /// Input DICOM file
    pub file: PathBuf,

    /// Measurement CSV file
    pub csv: PathBuf,

    /// Output directory (default: report.output_dir from the config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Screenshot plus PDF report in one go.
pub fn run(args: &ExportArgs, config: &ViewerConfig) -> Result<()> {
    let dir = output_dir(args.output_dir.as_ref(), config);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading image");
    let image = dicom::load(&args.file)?;

    pb.set_message("Reading measurements");
    let measurements = load_measurements(&args.csv)?;

    pb.set_message("Rendering screenshot");
    let size = (config.snapshot.width, config.snapshot.height);
    let snapshot = render_fitted(&image, &measurements, size, config, &dir)?;

    pb.set_message("Writing PDF");
    let text = report::compose(&measurements);
    let pdf = write_report_pdf(&text, Some(&snapshot), &dir)?;

    pb.finish_with_message("Done");
    crate::summary::print_export_summary(measurements.len(), &snapshot, &pdf);
    Ok(())
}
