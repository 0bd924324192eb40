//! Options controlling how corrected images are written.

use serde::{Deserialize, Serialize};

/// Encoding options for a correction run.
///
/// Missing fields take their defaults when deserialized, so hosts can pass a
/// partial object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RotateOptions {
    /// JPEG quality for the main image (1-100).
    pub quality: u8,
    /// JPEG quality for the EXIF thumbnail (1-100).
    pub thumbnail_quality: u8,
    /// Write the ICC profile back into the output.
    pub preserve_icc_profile: bool,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            quality: 90,
            thumbnail_quality: 90,
            preserve_icc_profile: true,
        }
    }
}

impl RotateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_thumbnail_quality(mut self, quality: u8) -> Self {
        self.thumbnail_quality = quality;
        self
    }

    pub fn with_icc_profile(mut self, preserve: bool) -> Self {
        self.preserve_icc_profile = preserve;
        self
    }
}
