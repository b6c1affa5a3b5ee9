use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use caliper_core::config::ViewerConfig;
use caliper_core::image::Image;
use caliper_core::io::dicom;
use caliper_core::measurement::Measurement;
use caliper_core::report::{render_snapshot, save_snapshot};

use super::{load_measurements, output_dir};

#[derive(Args)]
pub struct SnapshotArgs {
    /// Input DICOM file
    pub file: PathBuf,

    /// Measurement CSV file to overlay
    pub csv: Option<PathBuf>,

    /// Snapshot width in pixels (default: snapshot.width from the config)
    #[arg(long)]
    pub width: Option<u32>,

    /// Snapshot height in pixels (default: snapshot.height from the config)
    #[arg(long)]
    pub height: Option<u32>,

    /// Output directory (default: report.output_dir from the config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

pub fn run(args: &SnapshotArgs, config: &ViewerConfig) -> Result<()> {
    let image = dicom::load(&args.file)?;
    let measurements = match &args.csv {
        Some(csv) => load_measurements(csv)?,
        None => Vec::new(),
    };
    let size = (
        args.width.unwrap_or(config.snapshot.width),
        args.height.unwrap_or(config.snapshot.height),
    );

    let path = render_fitted(
        &image,
        &measurements,
        size,
        config,
        &output_dir(args.output_dir.as_ref(), config),
    )?;
    println!("Screenshot saved as {}", path.display());
    Ok(())
}

/// Render the whole image fitted into a `size` viewport and save it as a screenshot.
pub fn render_fitted(
    image: &Image,
    measurements: &[Measurement],
    size: (u32, u32),
    config: &ViewerConfig,
    dir: &Path,
) -> Result<PathBuf> {
    let mut view = config.view_transform(size.0 as f64, size.1 as f64);
    view.fit(image.width() as f64, image.height() as f64);

    let rgb = render_snapshot(image, &view, measurements)?;
    let path = save_snapshot(dir, &rgb, chrono::Local::now().naive_local())?;
    Ok(path)
}
