#![allow(dead_code)]

use std::path::Path;

use caliper_core::measurement::Measurement;
use caliper_core::view::Point;
use dicom_core::{DataElement, PrimitiveValue, VR};
use dicom_dictionary_std::{tags, uids};
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};

/// Optional attributes of a synthetic DICOM file.
#[derive(Clone, Debug, Default)]
pub struct DicomFixture {
    pub rescale: Option<(&'static str, &'static str)>,
    /// Only the slope, to check that a lone slope is ignored.
    pub slope_only: Option<&'static str>,
    pub signed: bool,
    pub transfer_syntax: Option<&'static str>,
}

/// Write a mono 16-bit DICOM file with the given row-major pixel values.
pub fn write_dicom_u16(
    path: &Path,
    width: u16,
    height: u16,
    pixels: &[u16],
    fixture: &DicomFixture,
) {
    assert_eq!(pixels.len(), width as usize * height as usize);

    let mut obj = InMemDicomObject::new_empty();
    obj.put(DataElement::new(tags::SOP_CLASS_UID, VR::UI, PrimitiveValue::from(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)));
    obj.put(DataElement::new(tags::SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from("1.2.826.0.1.3680043.2.1125.1")));
    obj.put(DataElement::new(tags::MODALITY, VR::CS, PrimitiveValue::from("OT")));
    obj.put(DataElement::new(tags::PATIENT_NAME, VR::PN, PrimitiveValue::from("Test^Patient")));
    obj.put(DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)));
    obj.put(DataElement::new(tags::PHOTOMETRIC_INTERPRETATION, VR::CS, PrimitiveValue::from("MONOCHROME2")));
    obj.put(DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(height)));
    obj.put(DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(width)));
    obj.put(DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)));
    obj.put(DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(16_u16)));
    obj.put(DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(15_u16)));
    obj.put(DataElement::new(
        tags::PIXEL_REPRESENTATION,
        VR::US,
        PrimitiveValue::from(u16::from(fixture.signed)),
    ));

    if let Some((slope, intercept)) = fixture.rescale {
        obj.put(DataElement::new(tags::RESCALE_SLOPE, VR::DS, PrimitiveValue::from(slope)));
        obj.put(DataElement::new(tags::RESCALE_INTERCEPT, VR::DS, PrimitiveValue::from(intercept)));
    }
    if let Some(slope) = fixture.slope_only {
        obj.put(DataElement::new(tags::RESCALE_SLOPE, VR::DS, PrimitiveValue::from(slope)));
    }

    let bytes: Vec<u8> = pixels.iter().flat_map(|v| v.to_le_bytes()).collect();
    obj.put(DataElement::new(tags::PIXEL_DATA, VR::OW, PrimitiveValue::from(bytes)));

    let file_obj = obj
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(fixture.transfer_syntax.unwrap_or(uids::EXPLICIT_VR_LITTLE_ENDIAN))
                .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
                .media_storage_sop_instance_uid("1.2.826.0.1.3680043.2.1125.1"),
        )
        .expect("build file meta");
    file_obj.write_to_file(path).expect("write DICOM file");
}

/// Gradient image `value = row * width + col`.
pub fn gradient_pixels(width: u16, height: u16) -> Vec<u16> {
    (0..height as u32 * width as u32).map(|v| v as u16).collect()
}

pub fn measurement(name: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Measurement {
    Measurement::new(name, Point::new(x0, y0), Point::new(x1, y1))
}
