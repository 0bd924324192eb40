//! Keep orientation and dimension metadata consistent with corrected pixels.
//!
//! After the pixel buffer has been physically rotated, every field that
//! describes the image's orientation or extent must agree with it:
//!
//! 1. `Orientation` at the root directory is forced to 1.
//! 2. EXIF `PixelXDimension`/`PixelYDimension`, when present, get the
//!    original EXIF extent, swapped for quarter-turn orientations.
//! 3. Interop `RelatedImageWidth`/`RelatedImageLength`, when present, get
//!    the same extent as step 2.
//! 4. The matching XMP attributes are rewritten in place.
//!
//! Dimension fields keep their stored type and are never introduced when
//! absent. A failure part way through leaves earlier edits in place; the
//! caller discards the metadata on error.

use exif::{Tag, Value};

use crate::decode::{Dimensions, Orientation};
use crate::error::AutorotateError;
use crate::thumbnail::ProcessedThumbnail;

use super::fields::{Directory, FieldSet};
use super::xmp::{self, Attribute};
use super::JpegMetadata;

/// Patches a [`JpegMetadata`] after its image was corrected.
#[derive(Debug, Clone, Copy)]
pub struct MetadataSynchronizer {
    orientation: Orientation,
    corrected: Dimensions,
}

impl MetadataSynchronizer {
    /// `corrected` is the extent of the pixel buffer after the transform.
    pub fn new(orientation: Orientation, corrected: Dimensions) -> Self {
        Self {
            orientation,
            corrected,
        }
    }

    /// Extent of the buffer before the transform.
    fn stored(&self) -> Dimensions {
        // A quarter turn swaps width and height, and swapping is its own inverse.
        self.corrected.oriented(self.orientation)
    }

    /// Apply steps 1-4 to `metadata`.
    ///
    /// # Errors
    ///
    /// Returns `UnableToSynchronizeDimensions` if a stored dimension is not
    /// an unsigned integer, or the corrected value does not fit its field type.
    pub fn synchronize(&self, metadata: &mut JpegMetadata) -> Result<(), AutorotateError> {
        reset_orientation(&mut metadata.fields, Directory::Root);
        // IFD1 may carry its own Orientation; the thumbnail is rotated too.
        if metadata
            .fields
            .find(Directory::Thumbnail, Tag::Orientation)
            .is_some()
        {
            reset_orientation(&mut metadata.fields, Directory::Thumbnail);
        }

        let synced = self.sync_exif_dimensions(&mut metadata.fields)?;
        self.sync_related_dimensions(&mut metadata.fields, synced.unwrap_or(self.corrected))?;

        if let Some(packet) = metadata.xmp.as_mut() {
            self.sync_xmp(packet);
        }

        log::debug!(
            "metadata synchronized for {}x{} image",
            self.corrected.width,
            self.corrected.height
        );
        Ok(())
    }

    /// Replace the thumbnail blob and its XMP dimension attributes.
    pub fn embed_thumbnail(&self, metadata: &mut JpegMetadata, thumbnail: ProcessedThumbnail) {
        let ProcessedThumbnail { bytes, dimensions } = thumbnail;

        if let Some(packet) = metadata.xmp.as_mut() {
            xmp::set_attribute(packet, Attribute::XmpThumbnailsWidth, dimensions.width);
            xmp::set_attribute(packet, Attribute::XmpThumbnailsHeight, dimensions.height);
        }

        metadata.thumbnail = Some(bytes);
    }

    /// Returns the extent written, or `None` if neither field exists.
    fn sync_exif_dimensions(
        &self,
        fields: &mut FieldSet,
    ) -> Result<Option<Dimensions>, AutorotateError> {
        let has_width = fields.find(Directory::Exif, Tag::PixelXDimension).is_some();
        let has_height = fields.find(Directory::Exif, Tag::PixelYDimension).is_some();
        if !has_width && !has_height {
            return Ok(None);
        }

        let stored = self.stored();
        let original = Dimensions::new(
            read_dimension(fields, Tag::PixelXDimension, "PixelXDimension", stored.width)?,
            read_dimension(fields, Tag::PixelYDimension, "PixelYDimension", stored.height)?,
        );
        let updated = original.oriented(self.orientation);

        write_dimension(
            fields,
            Directory::Exif,
            Tag::PixelXDimension,
            "PixelXDimension",
            updated.width,
        )?;
        write_dimension(
            fields,
            Directory::Exif,
            Tag::PixelYDimension,
            "PixelYDimension",
            updated.height,
        )?;

        Ok(Some(updated))
    }

    fn sync_related_dimensions(
        &self,
        fields: &mut FieldSet,
        dims: Dimensions,
    ) -> Result<(), AutorotateError> {
        write_dimension(
            fields,
            Directory::Interop,
            Tag::RelatedImageWidth,
            "RelatedImageWidth",
            dims.width,
        )?;
        write_dimension(
            fields,
            Directory::Interop,
            Tag::RelatedImageLength,
            "RelatedImageLength",
            dims.height,
        )
    }

    fn sync_xmp(&self, packet: &mut Vec<u8>) {
        let Dimensions { width, height } = self.corrected;

        xmp::set_attribute(
            packet,
            Attribute::TiffOrientation,
            u32::from(Orientation::Normal.value()),
        );
        xmp::set_attribute(packet, Attribute::TiffImageWidth, width);
        xmp::set_attribute(packet, Attribute::ExifPixelXDimension, width);
        xmp::set_attribute(packet, Attribute::TiffImageLength, height);
        xmp::set_attribute(packet, Attribute::ExifPixelYDimension, height);
    }
}

fn reset_orientation(fields: &mut FieldSet, directory: Directory) {
    fields.remove(directory, Tag::Orientation);
    fields.add(
        directory,
        Tag::Orientation,
        Value::Short(vec![Orientation::Normal.value()]),
    );
}

/// Stored EXIF dimension, or `fallback` when the field is absent.
fn read_dimension(
    fields: &FieldSet,
    tag: Tag,
    name: &'static str,
    fallback: u32,
) -> Result<u32, AutorotateError> {
    match fields.find(Directory::Exif, tag) {
        None => Ok(fallback),
        Some(field) => {
            field
                .value
                .get_uint(0)
                .ok_or_else(|| AutorotateError::UnableToSynchronizeDimensions {
                    tag: name,
                    reason: format!("stored value {:?} is not an unsigned integer", field.value),
                })
        }
    }
}

/// Overwrite a dimension field that already exists, keeping its type.
fn write_dimension(
    fields: &mut FieldSet,
    directory: Directory,
    tag: Tag,
    name: &'static str,
    value: u32,
) -> Result<(), AutorotateError> {
    let Some(existing) = fields.remove(directory, tag) else {
        return Ok(());
    };

    let overflow = |kind: &str| AutorotateError::UnableToSynchronizeDimensions {
        tag: name,
        reason: format!("{value} does not fit in a {kind} field"),
    };

    let updated = match existing.value {
        Value::Short(_) => Value::Short(vec![u16::try_from(value).map_err(|_| overflow("SHORT"))?]),
        Value::Byte(_) => Value::Byte(vec![u8::try_from(value).map_err(|_| overflow("BYTE"))?]),
        _ => Value::Long(vec![value]),
    };
    fields.add(directory, tag, updated);
    Ok(())
}
