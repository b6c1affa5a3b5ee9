mod common;

use std::io::Write;

use approx::assert_relative_eq;
use tempfile::{NamedTempFile, TempDir};

use caliper_core::error::DecodeError;
use caliper_core::io::dicom;
use common::{gradient_pixels, write_dicom_u16, DicomFixture};

#[test]
fn test_load_mono16_dimensions_and_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gradient.dcm");
    write_dicom_u16(&path, 4, 3, &gradient_pixels(4, 3), &DicomFixture::default());

    let image = dicom::load(&path).unwrap();
    assert_eq!(image.width(), 4);
    assert_eq!(image.height(), 3);
    assert_eq!(image.sample(0, 0), Some(0.0));
    assert_eq!(image.sample(2, 3), Some(11.0));
    assert!(image.rescale.is_none());
    assert_eq!(image.info.bits_allocated, 16);
    assert_eq!(image.info.modality.as_deref(), Some("OT"));
}

#[test]
fn test_load_applies_rescale() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ct.dcm");
    let fixture = DicomFixture {
        rescale: Some(("2", "-1024")),
        ..Default::default()
    };
    write_dicom_u16(&path, 2, 2, &[0, 1, 512, 1024], &fixture);

    let image = dicom::load(&path).unwrap();
    let rescale = image.rescale.unwrap();
    assert_relative_eq!(rescale.slope, 2.0);
    assert_relative_eq!(rescale.intercept, -1024.0);
    assert_relative_eq!(image.data[[0, 0]], -1024.0);
    assert_relative_eq!(image.data[[0, 1]], -1022.0);
    assert_relative_eq!(image.data[[1, 1]], 1024.0);
}

#[test]
fn test_slope_without_intercept_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("slope.dcm");
    let fixture = DicomFixture {
        slope_only: Some("3"),
        ..Default::default()
    };
    write_dicom_u16(&path, 2, 1, &[5, 7], &fixture);

    let image = dicom::load(&path).unwrap();
    assert!(image.rescale.is_none());
    assert_eq!(image.sample(0, 1), Some(7.0));
}

#[test]
fn test_signed_pixels_are_sign_extended() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("signed.dcm");
    let fixture = DicomFixture {
        signed: true,
        ..Default::default()
    };
    write_dicom_u16(&path, 2, 1, &[0xFFFF, 100], &fixture);

    let image = dicom::load(&path).unwrap();
    assert_eq!(image.sample(0, 0), Some(-1.0));
    assert_eq!(image.sample(0, 1), Some(100.0));
}

#[test]
fn test_garbage_file_is_open_error() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"definitely not a DICOM file").unwrap();
    f.flush().unwrap();

    let err = dicom::load(f.path()).unwrap_err();
    assert!(matches!(err, DecodeError::Open { .. }));
}

#[test]
fn test_missing_file_is_open_error() {
    let dir = TempDir::new().unwrap();
    let err = dicom::load(&dir.path().join("nope.dcm")).unwrap_err();
    assert!(matches!(err, DecodeError::Open { .. }));
}

#[test]
fn test_gray8_of_loaded_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("two.dcm");
    write_dicom_u16(&path, 2, 1, &[100, 300], &DicomFixture::default());

    let gray = dicom::load(&path).unwrap().to_gray8();
    assert_eq!(gray, vec![0, 255]);
}
