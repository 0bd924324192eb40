//! Orientation correction for the embedded EXIF thumbnail.

use crate::color::ColorRemap;
use crate::decode::{decode_pixels, Dimensions, Orientation};
use crate::encode::encode_jpeg;
use crate::error::AutorotateError;
use crate::transform::apply_orientation;

/// A corrected, re-encoded thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedThumbnail {
    pub bytes: Vec<u8>,
    pub dimensions: Dimensions,
}

/// Decodes, corrects and re-encodes thumbnails with the main image's orientation.
pub struct ThumbnailProcessor<'a> {
    remap: &'a dyn ColorRemap,
    quality: u8,
}

impl<'a> ThumbnailProcessor<'a> {
    pub fn new(remap: &'a dyn ColorRemap, quality: u8) -> Self {
        Self { remap, quality }
    }

    /// Returns `Ok(None)` when there is no thumbnail.
    ///
    /// # Errors
    ///
    /// `ThumbnailUnreadable` if the blob does not decode as JPEG,
    /// `ThumbnailEncodingFailed` if the corrected pixels cannot be encoded.
    pub fn process(
        &self,
        thumbnail: Option<&[u8]>,
        orientation: Orientation,
        icc_profile: Option<&[u8]>,
    ) -> Result<Option<ProcessedThumbnail>, AutorotateError> {
        let Some(thumbnail) = thumbnail else {
            log::debug!("no EXIF thumbnail to correct");
            return Ok(None);
        };

        let decoded = decode_pixels(thumbnail)
            .map_err(|e| AutorotateError::ThumbnailUnreadable(e.to_string()))?;

        let mut corrected = apply_orientation(decoded, orientation);
        if let Some(profile) = icc_profile {
            corrected = self.remap.remap(corrected, profile);
        }

        let bytes = encode_jpeg(&corrected, self.quality)
            .map_err(|e| AutorotateError::ThumbnailEncodingFailed(e.to_string()))?;

        Ok(Some(ProcessedThumbnail {
            bytes,
            dimensions: corrected.dimensions(),
        }))
    }
}
