//! Error types for orientation correction.

use std::fmt;

use thiserror::Error;

use crate::decode::{DecodeError, UnknownOrientation};
use crate::encode::EncodeError;

/// Errors raised while correcting a single image.
#[derive(Debug, Error)]
pub enum AutorotateError {
    /// The root directory has no usable `Orientation` tag.
    #[error("Image has no EXIF Orientation tag")]
    MissingOrientationTag,

    /// `Orientation` holds a value outside 1-8.
    #[error("Unknown EXIF Orientation value: {0}")]
    UnknownOrientationValue(u32),

    /// A dimension field could not be read or rewritten.
    #[error("Unable to synchronize {tag}: {reason}")]
    UnableToSynchronizeDimensions { tag: &'static str, reason: String },

    /// The embedded thumbnail could not be decoded.
    #[error("Unable to read thumbnail: {0}")]
    ThumbnailUnreadable(String),

    /// The corrected thumbnail could not be encoded.
    #[error("Thumbnail encoding failed: {0}")]
    ThumbnailEncodingFailed(String),

    /// The EXIF or XMP segments could not be parsed.
    #[error("Unable to read JPEG metadata: {0}")]
    MetadataUnreadable(String),

    /// Metadata could not be serialized back into the JPEG stream.
    #[error("Container rewrite failed: {0}")]
    ContainerRewriteFailed(String),

    /// The pixel data does not match the buffer's width and height.
    #[error("Pixel buffer holds {actual} bytes, expected {expected} for its dimensions")]
    InvalidPixelBuffer { expected: usize, actual: usize },

    /// The input is not a JPEG file.
    #[error("Input is not a JPEG image")]
    NotJpeg,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UnknownOrientation> for AutorotateError {
    fn from(err: UnknownOrientation) -> Self {
        AutorotateError::UnknownOrientationValue(err.0)
    }
}

/// Pipeline state in which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the container and its metadata.
    Reading,
    ResolvingOrientation,
    Transforming,
    SynchronizingMetadata,
    HandlingThumbnail,
    /// Encoding the corrected pixels and writing the container.
    Rewriting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Reading => "reading",
            Stage::ResolvingOrientation => "resolving orientation",
            Stage::Transforming => "transforming",
            Stage::SynchronizingMetadata => "synchronizing metadata",
            Stage::HandlingThumbnail => "handling thumbnail",
            Stage::Rewriting => "rewriting",
        };
        f.write_str(name)
    }
}

/// A failed correction, tagged with the image and the stage it failed in.
#[derive(Debug, Error)]
#[error("{image}: {stage} failed: {source}")]
pub struct ImageError {
    pub image: String,
    pub stage: Stage,
    #[source]
    pub source: AutorotateError,
}

impl ImageError {
    pub fn new(image: impl Into<String>, stage: Stage, source: AutorotateError) -> Self {
        Self {
            image: image.into(),
            stage,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AutorotateError::UnknownOrientationValue(9).to_string(),
            "Unknown EXIF Orientation value: 9"
        );

        let err = AutorotateError::UnableToSynchronizeDimensions {
            tag: "PixelXDimension",
            reason: "overflow".to_string(),
        };
        assert_eq!(err.to_string(), "Unable to synchronize PixelXDimension: overflow");
    }

    #[test]
    fn test_unknown_orientation_conversion() {
        let err: AutorotateError = UnknownOrientation(0).into();
        assert!(matches!(err, AutorotateError::UnknownOrientationValue(0)));
    }

    #[test]
    fn test_image_error_display_and_source() {
        use std::error::Error as _;

        let err = ImageError::new(
            "IMG_0001.jpg",
            Stage::ResolvingOrientation,
            AutorotateError::MissingOrientationTag,
        );

        assert_eq!(
            err.to_string(),
            "IMG_0001.jpg: resolving orientation failed: Image has no EXIF Orientation tag"
        );
        assert!(err.source().is_some());
    }
}
