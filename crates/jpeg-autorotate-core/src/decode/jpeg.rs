//! JPEG decoding and input sniffing.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{ImageFormat, ImageReader};

use super::{DecodeError, Orientation, PixelBuffer};

/// JPEG start-of-image marker followed by the first marker prefix.
const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// File extensions accepted by [`has_jpeg_extension`].
const JPEG_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "jpe"];

/// Decode JPEG bytes to RGB pixels without applying EXIF orientation.
///
/// The pixels come back exactly as stored, which is what orientation
/// correction needs to operate on.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a JPEG.
/// Returns `DecodeError::CorruptedFile` if the JPEG is corrupted.
pub fn decode_pixels(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    if !is_jpeg(bytes) {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Jpeg);
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(PixelBuffer::from_rgb_image(img.into_rgb8()))
}

/// Check whether `bytes` start with a JPEG SOI marker.
pub fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&JPEG_MAGIC)
}

/// Check whether `path` carries a JPEG file extension (case-insensitive).
pub fn has_jpeg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            JPEG_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

/// Extract the EXIF orientation from JPEG bytes.
///
/// Returns `None` if there is no EXIF data, no Orientation tag, or the tag
/// holds a value outside 1-8.
pub fn get_orientation(bytes: &[u8]) -> Option<Orientation> {
    let mut cursor = Cursor::new(bytes);
    let exif = Reader::new().read_from_container(&mut cursor).ok()?;
    let value = exif
        .get_field(Tag::Orientation, In::PRIMARY)?
        .value
        .get_uint(0)?;
    Orientation::try_from(value).ok()
}
