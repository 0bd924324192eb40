//! JPEG metadata model, synchronization and container rewrite.
//!
//! This module provides:
//! - [`FieldSet`], the mutable EXIF field collection
//! - [`MetadataSynchronizer`], which patches orientation and dimension fields
//! - [`MetadataCodec`], the seam to the binary container, with
//!   [`JpegMetadataCodec`] as the default implementation
//! - Literal XMP attribute substitution in [`xmp`]

mod codec;
mod fields;
mod sync;
pub mod xmp;

pub use codec::JpegMetadataCodec;
pub use fields::{Directory, FieldSet};
pub use sync::MetadataSynchronizer;

use exif::Tag;

use crate::decode::Orientation;
use crate::error::AutorotateError;

/// Everything read from a JPEG besides its compressed pixels.
#[derive(Debug, Clone, Default)]
pub struct JpegMetadata {
    /// EXIF/TIFF fields from the APP1 segment.
    pub fields: FieldSet,
    /// Byte order of the original TIFF header.
    pub little_endian: bool,
    /// Reassembled ICC profile.
    pub icc_profile: Option<Vec<u8>>,
    /// Raw XMP packet; not required to be valid UTF-8.
    pub xmp: Option<Vec<u8>>,
    /// Compressed EXIF thumbnail.
    pub thumbnail: Option<Vec<u8>>,
    /// APP13 (IPTC/Photoshop) payload after its identifier.
    pub photoshop: Option<Vec<u8>>,
}

impl JpegMetadata {
    pub fn new(fields: FieldSet) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    /// Orientation recorded at the root directory.
    pub fn orientation(&self) -> Result<Orientation, AutorotateError> {
        resolve_orientation(&self.fields)
    }
}

/// Look up the root `Orientation` tag.
///
/// # Errors
///
/// `MissingOrientationTag` if the tag is absent or not an unsigned integer,
/// `UnknownOrientationValue` if it lies outside 1-8.
pub fn resolve_orientation(fields: &FieldSet) -> Result<Orientation, AutorotateError> {
    let value = fields
        .uint(Directory::Root, Tag::Orientation)
        .ok_or(AutorotateError::MissingOrientationTag)?;
    Ok(Orientation::try_from(value)?)
}

/// Reads and rewrites JPEG metadata.
///
/// `write` receives freshly encoded JPEG bytes carrying no metadata of their
/// own and returns them with `metadata` spliced in; compressed image data is
/// never touched.
pub trait MetadataCodec {
    /// Only the EXIF fields, enough to resolve the orientation.
    ///
    /// The default reads everything and keeps the fields; implementations
    /// should skip the optional segments so that an upright image never
    /// depends on them.
    fn read_fields(&self, jpeg: &[u8]) -> Result<FieldSet, AutorotateError> {
        self.read(jpeg).map(|metadata| metadata.fields)
    }

    fn read(&self, jpeg: &[u8]) -> Result<JpegMetadata, AutorotateError>;

    fn write(&self, encoded: &[u8], metadata: &JpegMetadata) -> Result<Vec<u8>, AutorotateError>;
}
