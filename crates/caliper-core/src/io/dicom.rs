use std::io::Cursor;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use dicom_core::Tag;
use dicom_dictionary_std::tags;
use dicom_object::{open_file, InMemDicomObject};
use ndarray::Array2;
use tracing::{debug, info, warn};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::DecodeError;
use crate::image::{Image, ImageInfo, Rescale};

/// Native little-endian transfer syntaxes: implicit VR and explicit VR.
const NATIVE_TRANSFER_SYNTAXES: &[&str] = &["1.2.840.10008.1.2", "1.2.840.10008.1.2.1"];

/// Pixel module attributes needed to interpret the raw pixel bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelLayout {
    pub rows: u32,
    pub columns: u32,
    pub bits_allocated: u16,
    pub bits_stored: u16,
    pub signed: bool,
    pub samples_per_pixel: u16,
    /// `true` when color samples are stored plane by plane (R...G...B...).
    pub planar: bool,
}

impl PixelLayout {
    pub fn bytes_per_sample(&self) -> usize {
        self.bits_allocated as usize / 8
    }

    pub fn pixel_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Total bytes of one frame.
    pub fn frame_byte_size(&self) -> usize {
        self.pixel_count() * self.samples_per_pixel as usize * self.bytes_per_sample()
    }

    fn validate(&self) -> Result<(), DecodeError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(DecodeError::InvalidDimensions {
                width: self.columns,
                height: self.rows,
            });
        }
        if !matches!(self.bits_allocated, 8 | 16 | 32) {
            return Err(DecodeError::UnsupportedPixelLayout(format!(
                "{} bits allocated",
                self.bits_allocated
            )));
        }
        if self.bits_stored == 0 || self.bits_stored > self.bits_allocated {
            return Err(DecodeError::UnsupportedPixelLayout(format!(
                "{} bits stored in {} bits allocated",
                self.bits_stored, self.bits_allocated
            )));
        }
        if !matches!(self.samples_per_pixel, 1 | 3) {
            return Err(DecodeError::UnsupportedPixelLayout(format!(
                "{} samples per pixel",
                self.samples_per_pixel
            )));
        }
        Ok(())
    }
}

/// Load a single-frame DICOM image and apply its modality rescale.
///
/// Multi-frame files yield their first frame.
pub fn load(path: &Path) -> Result<Image, DecodeError> {
    let obj = open_file(path).map_err(|source| DecodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let transfer_syntax = obj.meta().transfer_syntax().trim_end_matches('\0').to_string();
    check_transfer_syntax(&transfer_syntax)?;

    let layout = read_layout(&obj)?;
    layout.validate()?;

    let pixel_element = obj
        .element(tags::PIXEL_DATA)
        .map_err(|_| DecodeError::MissingElement("PixelData"))?;
    let primitive = pixel_element.value().primitive().ok_or_else(|| {
        DecodeError::UnsupportedPixelLayout("encapsulated pixel data".into())
    })?;
    let bytes = primitive.to_bytes();

    let frame_count = optional_u32(&obj, tags::NUMBER_OF_FRAMES, "NumberOfFrames")?.unwrap_or(1);
    if frame_count > 1 {
        warn!(frame_count, "Multi-frame image, decoding the first frame only");
    }

    let raw = decode_native(&bytes, &layout)?;
    let rescale = read_rescale(&obj)?;
    let data = match rescale {
        Some(r) => raw.mapv(|v| r.apply(v)),
        None => raw,
    };

    let info = ImageInfo {
        bits_allocated: layout.bits_allocated,
        samples_per_pixel: layout.samples_per_pixel,
        frame_count,
        photometric: optional_string(&obj, tags::PHOTOMETRIC_INTERPRETATION),
        modality: optional_string(&obj, tags::MODALITY),
        patient_name: optional_string(&obj, tags::PATIENT_NAME),
        study_description: optional_string(&obj, tags::STUDY_DESCRIPTION),
        transfer_syntax,
    };

    info!(
        path = %path.display(),
        width = layout.columns,
        height = layout.rows,
        rescaled = rescale.is_some(),
        "Decoded DICOM image"
    );

    Ok(Image {
        data,
        rescale,
        info,
    })
}

/// Reject encapsulated (compressed) and big-endian transfer syntaxes.
pub fn check_transfer_syntax(uid: &str) -> Result<(), DecodeError> {
    if NATIVE_TRANSFER_SYNTAXES.contains(&uid) {
        Ok(())
    } else {
        Err(DecodeError::UnsupportedTransferSyntax(uid.to_string()))
    }
}

fn read_layout(obj: &InMemDicomObject) -> Result<PixelLayout, DecodeError> {
    let rows = required_u32(obj, tags::ROWS, "Rows")?;
    let columns = required_u32(obj, tags::COLUMNS, "Columns")?;
    let bits_allocated = required_u32(obj, tags::BITS_ALLOCATED, "BitsAllocated")? as u16;
    let bits_stored = optional_u32(obj, tags::BITS_STORED, "BitsStored")?
        .map(|b| b as u16)
        .unwrap_or(bits_allocated);
    let pixel_representation =
        optional_u32(obj, tags::PIXEL_REPRESENTATION, "PixelRepresentation")?.unwrap_or(0);
    let samples_per_pixel = optional_u32(obj, tags::SAMPLES_PER_PIXEL, "SamplesPerPixel")?
        .map(|s| s as u16)
        .unwrap_or(1);
    let planar = optional_u32(obj, tags::PLANAR_CONFIGURATION, "PlanarConfiguration")?
        .is_some_and(|p| p == 1);

    let layout = PixelLayout {
        rows,
        columns,
        bits_allocated,
        bits_stored,
        signed: pixel_representation == 1,
        samples_per_pixel,
        planar,
    };
    debug!(?layout, "Pixel layout");
    Ok(layout)
}

/// Rescale is applied only when both slope and intercept are present.
fn read_rescale(obj: &InMemDicomObject) -> Result<Option<Rescale>, DecodeError> {
    let (Ok(slope), Ok(intercept)) = (
        obj.element(tags::RESCALE_SLOPE),
        obj.element(tags::RESCALE_INTERCEPT),
    ) else {
        return Ok(None);
    };

    let slope = slope.to_float64().map_err(|source| DecodeError::InvalidValue {
        element: "RescaleSlope",
        source,
    })?;
    let intercept = intercept
        .to_float64()
        .map_err(|source| DecodeError::InvalidValue {
            element: "RescaleIntercept",
            source,
        })?;
    Ok(Some(Rescale { slope, intercept }))
}

fn required_u32(
    obj: &InMemDicomObject,
    tag: Tag,
    name: &'static str,
) -> Result<u32, DecodeError> {
    optional_u32(obj, tag, name)?.ok_or(DecodeError::MissingElement(name))
}

fn optional_u32(
    obj: &InMemDicomObject,
    tag: Tag,
    name: &'static str,
) -> Result<Option<u32>, DecodeError> {
    match obj.element(tag) {
        Ok(elem) => elem
            .to_int::<u32>()
            .map(Some)
            .map_err(|source| DecodeError::InvalidValue {
                element: name,
                source,
            }),
        Err(_) => Ok(None),
    }
}

fn optional_string(obj: &InMemDicomObject, tag: Tag) -> Option<String> {
    let elem = obj.element(tag).ok()?;
    let value = elem.to_str().ok()?;
    let trimmed = value.trim_end_matches('\0').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Decode the first frame of native little-endian pixel data into raw stored values.
///
/// Color pixels are reduced to BT.601 luminance.
pub fn decode_native(raw: &[u8], layout: &PixelLayout) -> Result<Array2<f32>, DecodeError> {
    layout.validate()?;
    let expected = layout.frame_byte_size();
    if raw.len() < expected {
        return Err(DecodeError::PixelDataTooShort {
            expected,
            found: raw.len(),
        });
    }

    let samples = read_samples(&raw[..expected], layout);
    let pixels = layout.pixel_count();
    let values: Vec<f32> = if layout.samples_per_pixel == 1 {
        samples
    } else if layout.planar {
        (0..pixels)
            .map(|i| luminance(samples[i], samples[pixels + i], samples[2 * pixels + i]))
            .collect()
    } else {
        samples
            .chunks_exact(3)
            .map(|rgb| luminance(rgb[0], rgb[1], rgb[2]))
            .collect()
    };

    Array2::from_shape_vec((layout.rows as usize, layout.columns as usize), values).map_err(
        |_| DecodeError::InvalidDimensions {
            width: layout.columns,
            height: layout.rows,
        },
    )
}

fn read_samples(raw: &[u8], layout: &PixelLayout) -> Vec<f32> {
    let count = raw.len() / layout.bytes_per_sample();
    let mut cursor = Cursor::new(raw);
    let mut out = Vec::with_capacity(count);

    for _ in 0..count {
        let stored = match layout.bits_allocated {
            8 => cursor.read_u8().map(u32::from),
            16 => cursor.read_u16::<LittleEndian>().map(u32::from),
            _ => cursor.read_u32::<LittleEndian>(),
        };
        // The slice length was checked against the frame size above.
        let Ok(stored) = stored else { break };
        out.push(interpret_sample(stored, layout.bits_stored, layout.signed));
    }
    out
}

/// Mask to the stored bits and sign-extend two's complement values.
fn interpret_sample(stored: u32, bits_stored: u16, signed: bool) -> f32 {
    let bits = bits_stored.min(32) as u32;
    let masked = if bits >= 32 {
        stored
    } else {
        stored & ((1u32 << bits) - 1)
    };
    if signed {
        let shift = 32 - bits;
        (((masked << shift) as i32) >> shift) as f32
    } else {
        masked as f32
    }
}

fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}
