use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use caliper_core::io::dicom;

#[derive(Args)]
pub struct InfoArgs {
    /// Input DICOM file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = dicom::load(&args.file)?;
    crate::summary::print_image_summary(&args.file, &image);
    Ok(())
}
