//! JPEG Autorotate Core - EXIF orientation correction
//!
//! This crate physically rotates or mirrors JPEG pixel data according to the
//! EXIF `Orientation` tag, resets the tag to 1, and keeps every dimension
//! field (EXIF, related-image, XMP and thumbnail) consistent with the result.
//! Unrelated metadata such as GPS, maker tags, IPTC and the ICC profile is
//! carried over.
//!
//! # Examples
//!
//! ```ignore
//! let bytes = std::fs::read("IMG_0042.jpg")?;
//! let upright = jpeg_autorotate_core::rotate(&bytes)?;
//! std::fs::write("IMG_0042.jpg", upright)?;
//! ```

use std::io::Read;
use std::path::Path;

pub mod color;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod thumbnail;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use color::{ColorRemap, RetainEncodedColors};
pub use config::RotateOptions;
pub use decode::{get_orientation, is_jpeg, Dimensions, Orientation, PixelBuffer};
pub use error::{AutorotateError, ImageError, Stage};
pub use metadata::{JpegMetadata, JpegMetadataCodec, MetadataCodec, MetadataSynchronizer};
pub use pipeline::{Correction, Outcome, Pipeline};
pub use thumbnail::{ProcessedThumbnail, ThumbnailProcessor};
pub use transform::{apply_orientation, apply_orientation_value};

/// Error label for images passed in as a byte slice.
const IN_MEMORY: &str = "<memory>";
/// Error label for images read from a [`Read`] stream.
const STREAM: &str = "<stream>";

/// Correct the orientation of a JPEG held in memory.
///
/// Already-upright images are returned unchanged.
pub fn rotate(jpeg: &[u8]) -> Result<Vec<u8>, ImageError> {
    rotate_with_options(jpeg, &RotateOptions::default())
}

/// Like [`rotate`], with explicit encoder quality and ICC handling.
pub fn rotate_with_options(jpeg: &[u8], options: &RotateOptions) -> Result<Vec<u8>, ImageError> {
    Pipeline::with_options(options.clone())
        .process(IN_MEMORY, jpeg)
        .map(Outcome::into_bytes)
}

/// Read and correct a `.jpg`/`.jpeg` file. The file itself is not modified.
///
/// # Errors
///
/// `NotJpeg` for other extensions, `Io` if the file cannot be read.
pub fn rotate_path(path: impl AsRef<Path>) -> Result<Vec<u8>, ImageError> {
    let path = path.as_ref();
    let name = path.display().to_string();

    if !decode::has_jpeg_extension(path) {
        return Err(ImageError::new(name, Stage::Reading, AutorotateError::NotJpeg));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| ImageError::new(name.as_str(), Stage::Reading, e.into()))?;
    Pipeline::new()
        .process(&name, &bytes)
        .map(Outcome::into_bytes)
}

/// Read a JPEG from any byte stream and correct it.
pub fn rotate_reader<R: Read>(mut reader: R) -> Result<Vec<u8>, ImageError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| ImageError::new(STREAM, Stage::Reading, e.into()))?;

    if !is_jpeg(&bytes) {
        return Err(ImageError::new(STREAM, Stage::Reading, AutorotateError::NotJpeg));
    }

    Pipeline::new()
        .process(STREAM, &bytes)
        .map(Outcome::into_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{gradient, jpeg_with_exif, ExifFixture};
    use std::io::Cursor;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "jpeg-autorotate-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_rotate_bytes() {
        let jpeg = jpeg_with_exif(&gradient(30, 20), &ExifFixture::with_orientation(8));

        let rotated = rotate(&jpeg).unwrap();
        let pixels = decode::decode_pixels(&rotated).unwrap();
        assert_eq!((pixels.width, pixels.height), (20, 30));
        assert_eq!(get_orientation(&rotated), Some(Orientation::Normal));
    }

    #[test]
    fn test_rotate_already_normal_is_identity() {
        let jpeg = jpeg_with_exif(&gradient(30, 20), &ExifFixture::with_orientation(1));
        assert_eq!(rotate(&jpeg).unwrap(), jpeg);
    }

    #[test]
    fn test_rotate_with_options_quality() {
        let jpeg = jpeg_with_exif(&gradient(64, 64), &ExifFixture::with_orientation(3));

        let low = rotate_with_options(&jpeg, &RotateOptions::new().with_quality(10)).unwrap();
        let high = rotate_with_options(&jpeg, &RotateOptions::new().with_quality(100)).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_rotate_path() {
        let dir = scratch_dir("path");
        let path = dir.join("IMG_6.JPG");
        let jpeg = jpeg_with_exif(&gradient(16, 8), &ExifFixture::with_orientation(6));
        std::fs::write(&path, &jpeg).unwrap();

        let rotated = rotate_path(&path).unwrap();
        let pixels = decode::decode_pixels(&rotated).unwrap();
        assert_eq!((pixels.width, pixels.height), (8, 16));

        // The source file is left as it was.
        assert_eq!(std::fs::read(&path).unwrap(), jpeg);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_rotate_path_rejects_other_extensions() {
        let err = rotate_path("samples/blue_box.png").unwrap_err();
        assert!(matches!(err.source, AutorotateError::NotJpeg));
        assert_eq!(err.image, "samples/blue_box.png");
    }

    #[test]
    fn test_rotate_path_missing_file() {
        let dir = scratch_dir("missing");
        let err = rotate_path(dir.join("does-not-exist.jpg")).unwrap_err();
        assert!(matches!(err.source, AutorotateError::Io(_)));
        assert_eq!(err.stage, Stage::Reading);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_rotate_reader() {
        let jpeg = jpeg_with_exif(&gradient(16, 8), &ExifFixture::with_orientation(5));

        let rotated = rotate_reader(Cursor::new(jpeg)).unwrap();
        let pixels = decode::decode_pixels(&rotated).unwrap();
        assert_eq!((pixels.width, pixels.height), (8, 16));
    }

    #[test]
    fn test_rotate_reader_rejects_non_jpeg() {
        let err = rotate_reader(Cursor::new(b"GIF89a".to_vec())).unwrap_err();
        assert!(matches!(err.source, AutorotateError::NotJpeg));
        assert_eq!(err.image, "<stream>");
    }
}
