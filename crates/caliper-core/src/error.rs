use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a file into an [`Image`](crate::image::Image).
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to read DICOM file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: dicom_object::ReadError,
    },

    #[error("Missing required element {0}")]
    MissingElement(&'static str),

    #[error("Invalid value for {element}: {source}")]
    InvalidValue {
        element: &'static str,
        #[source]
        source: dicom_core::value::ConvertValueError,
    },

    #[error("Unsupported transfer syntax {0} (only native little-endian is supported)")]
    UnsupportedTransferSyntax(String),

    #[error("Unsupported pixel layout: {0}")]
    UnsupportedPixelLayout(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel data too short: expected {expected} bytes, found {found}")]
    PixelDataTooShort { expected: usize, found: usize },
}

/// Failure to persist or read back the measurement file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write measurements to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read measurements from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid measurement row {row} in {path}: {reason}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },
}

/// Failure while producing a snapshot or the exported document.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Snapshot has an empty viewport")]
    EmptyViewport,

    #[error("Snapshot {0} has no pixels")]
    EmptySnapshot(PathBuf),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum CaliperError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CaliperError>;
