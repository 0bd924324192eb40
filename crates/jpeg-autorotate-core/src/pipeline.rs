//! The orientation correction pipeline.
//!
//! # States
//!
//! ```text
//! Start -> OrientationResolved -> AlreadyNormal
//!                              -> Transforming -> MetadataSynchronized
//!                                 -> ThumbnailHandled -> Rewritten
//! ```
//!
//! Any state can fail. Failures are not retried and carry the [`Stage`] in
//! which they happened; no partial output is returned alongside an error.

use crate::color::{ColorRemap, RetainEncodedColors};
use crate::config::RotateOptions;
use crate::decode::{decode_pixels, is_jpeg, PixelBuffer, BYTES_PER_PIXEL};
use crate::encode::encode_jpeg;
use crate::error::{AutorotateError, ImageError, Stage};
use crate::metadata::{
    resolve_orientation, JpegMetadata, JpegMetadataCodec, MetadataCodec, MetadataSynchronizer,
};
use crate::thumbnail::ThumbnailProcessor;
use crate::transform::apply_orientation;

/// Result of [`Pipeline::correct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// Orientation was already 1; the buffer is returned untouched.
    AlreadyNormal(PixelBuffer),
    /// The buffer was transformed and the metadata patched.
    Corrected(PixelBuffer),
}

impl Correction {
    pub fn into_buffer(self) -> PixelBuffer {
        match self {
            Correction::AlreadyNormal(buffer) | Correction::Corrected(buffer) => buffer,
        }
    }
}

/// Result of [`Pipeline::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Orientation was already 1; these are the input bytes, unchanged.
    AlreadyNormal(Vec<u8>),
    /// A rewritten JPEG with upright pixels and synchronized metadata.
    Rotated(Vec<u8>),
}

impl Outcome {
    pub fn is_rotated(&self) -> bool {
        matches!(self, Outcome::Rotated(_))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Outcome::AlreadyNormal(bytes) | Outcome::Rotated(bytes) => bytes,
        }
    }
}

/// Corrects one image at a time using a metadata codec and a color remap.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<C = JpegMetadataCodec, R = RetainEncodedColors> {
    codec: C,
    remap: R,
    options: RotateOptions,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RotateOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }
}

impl<C: MetadataCodec, R: ColorRemap> Pipeline<C, R> {
    pub fn with_collaborators(codec: C, remap: R, options: RotateOptions) -> Self {
        Self {
            codec,
            remap,
            options,
        }
    }

    pub fn options(&self) -> &RotateOptions {
        &self.options
    }

    /// Correct a decoded buffer and patch `metadata` to match.
    ///
    /// `image` only labels errors and log lines. On error, `metadata` may be
    /// partially edited and should be discarded.
    ///
    /// A buffer whose pixel data does not match its dimensions fails in
    /// [`Stage::Transforming`] with `InvalidPixelBuffer`.
    pub fn correct(
        &self,
        image: &str,
        buffer: PixelBuffer,
        metadata: &mut JpegMetadata,
    ) -> Result<Correction, ImageError> {
        let orientation = metadata
            .orientation()
            .map_err(fail(image, Stage::ResolvingOrientation))?;
        if orientation.is_normal() {
            log::debug!("{image}: orientation already normal");
            return Ok(Correction::AlreadyNormal(buffer));
        }

        if !buffer.is_consistent() {
            let source = AutorotateError::InvalidPixelBuffer {
                expected: buffer.pixel_count() * BYTES_PER_PIXEL,
                actual: buffer.pixels.len(),
            };
            return Err(ImageError::new(image, Stage::Transforming, source));
        }

        let stored = buffer.dimensions();
        let mut corrected = apply_orientation(buffer, orientation);
        if let Some(profile) = metadata.icc_profile.as_deref() {
            corrected = self.remap.remap(corrected, profile);
        }
        log::debug!(
            "{image}: applied {orientation:?} ({}x{} -> {}x{})",
            stored.width,
            stored.height,
            corrected.width,
            corrected.height
        );

        let synchronizer = MetadataSynchronizer::new(orientation, corrected.dimensions());
        synchronizer
            .synchronize(metadata)
            .map_err(fail(image, Stage::SynchronizingMetadata))?;

        let thumbnail = ThumbnailProcessor::new(&self.remap, self.options.thumbnail_quality)
            .process(
                metadata.thumbnail.as_deref(),
                orientation,
                metadata.icc_profile.as_deref(),
            )
            .map_err(fail(image, Stage::HandlingThumbnail))?;
        if let Some(thumbnail) = thumbnail {
            synchronizer.embed_thumbnail(metadata, thumbnail);
        }

        if !self.options.preserve_icc_profile {
            metadata.icc_profile = None;
        }

        Ok(Correction::Corrected(corrected))
    }

    /// Run the whole pipeline over JPEG bytes.
    ///
    /// Images that are already upright come back byte-for-byte unchanged.
    /// Only the EXIF segment is read for them; XMP, ICC and IPTC segments are
    /// parsed once the image is known to need correcting.
    pub fn process(&self, image: &str, jpeg: &[u8]) -> Result<Outcome, ImageError> {
        if !is_jpeg(jpeg) {
            return Err(ImageError::new(image, Stage::Reading, AutorotateError::NotJpeg));
        }

        let fields = self
            .codec
            .read_fields(jpeg)
            .map_err(fail(image, Stage::Reading))?;
        let orientation =
            resolve_orientation(&fields).map_err(fail(image, Stage::ResolvingOrientation))?;
        if orientation.is_normal() {
            log::debug!("{image}: orientation already normal, returning input");
            return Ok(Outcome::AlreadyNormal(jpeg.to_vec()));
        }

        let mut metadata = self.codec.read(jpeg).map_err(fail(image, Stage::Reading))?;

        let buffer = decode_pixels(jpeg)
            .map_err(AutorotateError::from)
            .map_err(fail(image, Stage::Reading))?;

        let corrected = match self.correct(image, buffer, &mut metadata)? {
            Correction::Corrected(buffer) => buffer,
            Correction::AlreadyNormal(_) => return Ok(Outcome::AlreadyNormal(jpeg.to_vec())),
        };

        let encoded = encode_jpeg(&corrected, self.options.quality)
            .map_err(AutorotateError::from)
            .map_err(fail(image, Stage::Rewriting))?;
        let rewritten = self
            .codec
            .write(&encoded, &metadata)
            .map_err(fail(image, Stage::Rewriting))?;

        log::info!(
            "{image}: corrected orientation {} ({} -> {} bytes)",
            orientation.value(),
            jpeg.len(),
            rewritten.len()
        );
        Ok(Outcome::Rotated(rewritten))
    }
}

fn fail(image: &str, stage: Stage) -> impl FnOnce(AutorotateError) -> ImageError + '_ {
    move |source| ImageError::new(image, stage, source)
}
