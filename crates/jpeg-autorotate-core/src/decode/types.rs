//! Core types for decoded images and EXIF orientation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of bytes per pixel in a [`PixelBuffer`] (packed RGB8).
pub const BYTES_PER_PIXEL: usize = 3;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not a JPEG image.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

/// An EXIF orientation value outside of 1-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown EXIF Orientation value: {0}")]
pub struct UnknownOrientation(pub u32);

impl Orientation {
    /// All eight orientations in tag value order.
    pub const ALL: [Orientation; 8] = [
        Orientation::Normal,
        Orientation::FlipHorizontal,
        Orientation::Rotate180,
        Orientation::FlipVertical,
        Orientation::Transpose,
        Orientation::Rotate90CW,
        Orientation::Transverse,
        Orientation::Rotate270CW,
    ];

    /// Returns true if this orientation swaps width and height dimensions.
    ///
    /// Rotations of 90° and 270° (and their flip variants Transpose/Transverse)
    /// swap the image dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// The EXIF tag value for this orientation.
    #[inline]
    pub fn value(self) -> u16 {
        self as u16
    }

    /// Returns true for the identity orientation.
    #[inline]
    pub fn is_normal(self) -> bool {
        self == Orientation::Normal
    }

    /// The orientation whose correction undoes this one's.
    ///
    /// Only the two pure quarter turns differ from their inverse; every
    /// mirror, the half turn, and both diagonal reflections are involutions.
    pub fn inverse(self) -> Orientation {
        match self {
            Orientation::Rotate90CW => Orientation::Rotate270CW,
            Orientation::Rotate270CW => Orientation::Rotate90CW,
            other => other,
        }
    }
}

impl TryFrom<u32> for Orientation {
    type Error = UnknownOrientation;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Orientation::Normal),
            2 => Ok(Orientation::FlipHorizontal),
            3 => Ok(Orientation::Rotate180),
            4 => Ok(Orientation::FlipVertical),
            5 => Ok(Orientation::Transpose),
            6 => Ok(Orientation::Rotate90CW),
            7 => Ok(Orientation::Transverse),
            8 => Ok(Orientation::Rotate270CW),
            other => Err(UnknownOrientation(other)),
        }
    }
}

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions with width and height exchanged.
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Dimensions after applying `orientation`.
    pub fn oriented(self, orientation: Orientation) -> Self {
        if orientation.swaps_dimensions() {
            self.swapped()
        } else {
            self
        }
    }
}

/// A decoded image with RGB pixel data.
///
/// Transforms take a `PixelBuffer` by value and hand back a new one, so
/// ownership always sits with whoever is currently processing the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new PixelBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * BYTES_PER_PIXEL,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a PixelBuffer from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert into an image::RgbImage, or `None` on a size mismatch.
    pub fn into_rgb_image(self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Get the RGB sample at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = self.offset(x, y);
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Number of bytes in one row.
    #[inline]
    pub(crate) fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `pixels` holds exactly `width * height * 3` bytes.
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == self.pixel_count() * BYTES_PER_PIXEL
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
