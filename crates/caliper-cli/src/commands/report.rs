use std::path::{Path, PathBuf};

use anyhow::Result;
use caliper_core::config::ViewerConfig;
use caliper_core::report::{self, build_document, latest_snapshot, write_pdf, PageLayout};
use clap::Args;

use super::{load_measurements, output_dir};

#[derive(Args)]
pub struct ReportArgs {
    /// Measurement CSV file
    pub csv: PathBuf,

    /// Also write a PDF report
    #[arg(long)]
    pub pdf: bool,

    /// Screenshot to embed in the PDF (default: newest screenshot in the output directory)
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Directory for the PDF (default: report.output_dir from the config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

pub fn run(args: &ReportArgs, config: &ViewerConfig) -> Result<()> {
    let measurements = load_measurements(&args.csv)?;
    let text = report::compose(&measurements);
    print!("{text}");

    if args.pdf {
        let dir = output_dir(args.output_dir.as_ref(), config);
        let snapshot = args.image.clone().or_else(|| latest_snapshot(&dir));
        let path = write_report_pdf(&text, snapshot.as_deref(), &dir)?;
        println!("Report saved as {}", path.display());
    }
    Ok(())
}

/// Lay out `text` plus an optional screenshot and write `report_<timestamp>.pdf` in `dir`.
pub fn write_report_pdf(text: &str, snapshot: Option<&Path>, dir: &Path) -> Result<PathBuf> {
    let now = chrono::Local::now().naive_local();
    let layout = PageLayout::letter();
    let pages = build_document(text, &report::generated_on(now), snapshot, &layout);

    std::fs::create_dir_all(dir)?;
    let path = dir.join(report::report_file_name(now));
    write_pdf(&pages, &layout, &path)?;
    Ok(path)
}
