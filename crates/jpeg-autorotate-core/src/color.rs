//! Color remapping against an embedded ICC profile.

use crate::decode::PixelBuffer;

/// Adjusts decoded samples for the image's embedded ICC profile.
///
/// Called once for the main image and once for the thumbnail, after the
/// orientation transform, and only when a profile is present.
pub trait ColorRemap {
    fn remap(&self, image: PixelBuffer, icc_profile: &[u8]) -> PixelBuffer;
}

/// Leaves samples as decoded.
///
/// The profile is written back byte-for-byte, so the re-encoded samples stay
/// in the color space the profile describes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetainEncodedColors;

impl ColorRemap for RetainEncodedColors {
    fn remap(&self, image: PixelBuffer, _icc_profile: &[u8]) -> PixelBuffer {
        image
    }
}

impl<F> ColorRemap for F
where
    F: Fn(PixelBuffer, &[u8]) -> PixelBuffer,
{
    fn remap(&self, image: PixelBuffer, icc_profile: &[u8]) -> PixelBuffer {
        self(image, icc_profile)
    }
}
