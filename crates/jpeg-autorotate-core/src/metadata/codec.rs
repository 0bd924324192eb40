//! Default [`MetadataCodec`] backed by `img-parts` and `kamadak-exif`.
//!
//! Segment layout written by [`JpegMetadataCodec::write`]:
//!
//! ```text
//! SOI
//! APP0  JFIF            (from the encoder)
//! APP1  Exif\0\0 TIFF   (fields + thumbnail)
//! APP2  ICC_PROFILE\0   (one or more chunks)
//! APP1  XMP packet
//! APP13 Photoshop 3.0\0
//! ...   tables and scan (from the encoder)
//! ```

use std::io::Cursor;

use exif::experimental::Writer;
use exif::{In, Reader, Tag, Value};
use img_parts::jpeg::{markers, Jpeg, JpegSegment};
use img_parts::{Bytes, ImageEXIF, ImageICC};

use crate::error::AutorotateError;

use super::{FieldSet, JpegMetadata, MetadataCodec};

const EXIF_PREFIX: &[u8] = b"Exif\0\0";
const XMP_PREFIX: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";
const ICC_PREFIX: &[u8] = b"ICC_PROFILE\0";
const PHOTOSHOP_PREFIX: &[u8] = b"Photoshop 3.0\0";

/// Largest payload of a single marker segment (length field minus itself).
const MAX_SEGMENT_CONTENTS: usize = u16::MAX as usize - 2;

/// ICC payload per APP2 chunk: prefix plus sequence number and chunk count.
const MAX_ICC_CHUNK: usize = MAX_SEGMENT_CONTENTS - ICC_PREFIX.len() - 2;

/// Reads metadata from JPEG marker segments and splices it back losslessly.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegMetadataCodec;

impl JpegMetadataCodec {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataCodec for JpegMetadataCodec {
    fn read_fields(&self, jpeg: &[u8]) -> Result<FieldSet, AutorotateError> {
        let exif = read_exif(&parse(jpeg)?)?;
        Ok(exif.fields().cloned().collect())
    }

    fn read(&self, jpeg: &[u8]) -> Result<JpegMetadata, AutorotateError> {
        let jpeg = parse(jpeg)?;
        let exif = read_exif(&jpeg)?;

        let fields: FieldSet = exif.fields().cloned().collect();
        let thumbnail = thumbnail_blob(&exif);
        if thumbnail.is_none() && exif.get_field(Tag::StripOffsets, In::THUMBNAIL).is_some() {
            log::debug!("uncompressed EXIF thumbnail is not carried over");
        }

        let xmp = find_segment(&jpeg, markers::APP1, XMP_PREFIX).map(|packet| packet.to_vec());

        log::debug!(
            "read {} EXIF fields (thumbnail: {}, ICC: {}, XMP: {})",
            fields.len(),
            thumbnail.is_some(),
            jpeg.icc_profile().is_some(),
            xmp.is_some()
        );

        Ok(JpegMetadata {
            fields,
            little_endian: exif.little_endian(),
            icc_profile: jpeg.icc_profile().map(|profile| profile.to_vec()),
            xmp,
            thumbnail,
            photoshop: find_segment(&jpeg, markers::APP13, PHOTOSHOP_PREFIX)
                .map(|payload| payload.to_vec()),
        })
    }

    fn write(&self, encoded: &[u8], metadata: &JpegMetadata) -> Result<Vec<u8>, AutorotateError> {
        let mut jpeg = Jpeg::from_bytes(Bytes::copy_from_slice(encoded))
            .map_err(|e| AutorotateError::ContainerRewriteFailed(e.to_string()))?;

        let mut inserted = vec![segment(markers::APP1, EXIF_PREFIX, &serialize_exif(metadata)?)?];
        if let Some(profile) = &metadata.icc_profile {
            inserted.extend(icc_segments(profile)?);
        }
        if let Some(packet) = &metadata.xmp {
            inserted.push(segment(markers::APP1, XMP_PREFIX, packet)?);
        }
        if let Some(payload) = &metadata.photoshop {
            inserted.push(segment(markers::APP13, PHOTOSHOP_PREFIX, payload)?);
        }

        let segments = jpeg.segments_mut();
        segments.retain(|s| !is_metadata_segment(s));
        let at = segments
            .iter()
            .take_while(|s| s.marker() == markers::APP0)
            .count();
        for (offset, segment) in inserted.into_iter().enumerate() {
            segments.insert(at + offset, segment);
        }

        Ok(jpeg.encoder().bytes().to_vec())
    }
}

fn parse(jpeg: &[u8]) -> Result<Jpeg, AutorotateError> {
    Jpeg::from_bytes(Bytes::copy_from_slice(jpeg))
        .map_err(|e| AutorotateError::MetadataUnreadable(e.to_string()))
}

fn read_exif(jpeg: &Jpeg) -> Result<exif::Exif, AutorotateError> {
    let tiff = jpeg
        .exif()
        .ok_or_else(|| AutorotateError::MetadataUnreadable("no EXIF segment".to_string()))?;
    Reader::new()
        .read_raw(tiff.to_vec())
        .map_err(|e| AutorotateError::MetadataUnreadable(e.to_string()))
}

/// Serialize the field set as a TIFF structure in the original byte order.
fn serialize_exif(metadata: &JpegMetadata) -> Result<Vec<u8>, AutorotateError> {
    let mut writer = Writer::new();
    for field in metadata.fields.iter() {
        if let Value::Unknown(type_id, count, _) = field.value {
            log::warn!(
                "dropping EXIF field {} with unknown type {type_id} (count {count})",
                field.tag
            );
            continue;
        }
        writer.push_field(field);
    }
    if let Some(thumbnail) = &metadata.thumbnail {
        writer.set_jpeg(thumbnail, In::THUMBNAIL);
    }

    let mut tiff = Cursor::new(Vec::new());
    writer
        .write(&mut tiff, metadata.little_endian)
        .map_err(|e| AutorotateError::ContainerRewriteFailed(e.to_string()))?;
    Ok(tiff.into_inner())
}

/// Thumbnail bytes referenced by IFD1, if they lie within the TIFF buffer.
fn thumbnail_blob(exif: &exif::Exif) -> Option<Vec<u8>> {
    let offset = exif
        .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    let len = exif
        .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    let blob = offset
        .checked_add(len)
        .and_then(|end| exif.buf().get(offset..end));
    if blob.is_none() {
        log::debug!(
            "EXIF thumbnail at {offset}+{len} lies outside the {} byte TIFF buffer, dropped",
            exif.buf().len()
        );
    }
    blob.map(<[u8]>::to_vec)
}

/// Payload of the first segment with `marker` whose contents start with `prefix`.
fn find_segment(jpeg: &Jpeg, marker: u8, prefix: &[u8]) -> Option<Bytes> {
    jpeg.segments()
        .iter()
        .find(|s| s.marker() == marker && s.contents().starts_with(prefix))
        .map(|s| s.contents().slice(prefix.len()..))
}

fn is_metadata_segment(segment: &JpegSegment) -> bool {
    let contents = segment.contents();
    match segment.marker() {
        markers::APP1 => contents.starts_with(EXIF_PREFIX) || contents.starts_with(XMP_PREFIX),
        markers::APP2 => contents.starts_with(ICC_PREFIX),
        markers::APP13 => contents.starts_with(PHOTOSHOP_PREFIX),
        _ => false,
    }
}

fn segment(marker: u8, prefix: &[u8], payload: &[u8]) -> Result<JpegSegment, AutorotateError> {
    let len = prefix.len() + payload.len();
    if len > MAX_SEGMENT_CONTENTS {
        return Err(AutorotateError::ContainerRewriteFailed(format!(
            "{len} byte payload does not fit in a marker segment"
        )));
    }

    let mut contents = Vec::with_capacity(len);
    contents.extend_from_slice(prefix);
    contents.extend_from_slice(payload);
    Ok(JpegSegment::new_with_contents(marker, Bytes::from(contents)))
}

/// Split an ICC profile into numbered APP2 chunks.
fn icc_segments(profile: &[u8]) -> Result<Vec<JpegSegment>, AutorotateError> {
    let chunks: Vec<&[u8]> = profile.chunks(MAX_ICC_CHUNK).collect();
    let count = u8::try_from(chunks.len()).map_err(|_| {
        AutorotateError::ContainerRewriteFailed(format!(
            "{} byte ICC profile needs more than 255 chunks",
            profile.len()
        ))
    })?;

    chunks
        .into_iter()
        .zip(1u8..)
        .map(|(chunk, seq)| {
            let mut prefix = ICC_PREFIX.to_vec();
            prefix.extend_from_slice(&[seq, count]);
            segment(markers::APP2, &prefix, chunk)
        })
        .collect()
}
