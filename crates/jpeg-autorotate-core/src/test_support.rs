//! Shared fixtures for unit tests.
//!
//! JPEGs are generated in memory instead of shipping binary samples.

use exif::{Tag, Value};

use crate::decode::PixelBuffer;
use crate::encode::encode_jpeg;
use crate::metadata::{Directory, FieldSet, JpegMetadata, JpegMetadataCodec, MetadataCodec};

pub const SAMPLE_XMP: &str = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""
    xmlns:tiff="http://ns.adobe.com/tiff/1.0/"
    xmlns:exif="http://ns.adobe.com/exif/1.0/"
    tiff:Orientation="6"
    tiff:ImageWidth="100"
    tiff:ImageLength="50"/>
 </rdf:RDF>
</x:xmpmeta>"#;

/// Image whose pixel at (x, y) is `[x, y, x * 7 + y * 13]` (wrapping).
///
/// Every pixel is distinct as long as both sides are at most 256.
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                x as u8,
                y as u8,
                x.wrapping_mul(7).wrapping_add(y.wrapping_mul(13)) as u8,
            ]);
        }
    }
    PixelBuffer::new(width, height, pixels)
}

/// Metadata to embed in a generated JPEG.
///
/// A `Make` tag is always written so the EXIF segment is never empty.
#[derive(Debug, Clone, Default)]
pub struct ExifFixture {
    pub orientation: Option<u16>,
    /// EXIF `PixelXDimension` / `PixelYDimension`.
    pub pixel_dimensions: Option<(Value, Value)>,
    /// Interop `RelatedImageWidth` / `RelatedImageLength`.
    pub related_dimensions: Option<(Value, Value)>,
    pub gps_latitude_ref: Option<&'static str>,
    pub little_endian: bool,
    pub xmp: Option<Vec<u8>>,
    pub thumbnail: Option<Vec<u8>>,
    pub icc_profile: Option<Vec<u8>>,
    pub photoshop: Option<Vec<u8>>,
    /// Skip the EXIF segment entirely.
    pub without_exif: bool,
}

impl ExifFixture {
    pub fn with_orientation(value: u16) -> Self {
        Self {
            orientation: Some(value),
            ..Default::default()
        }
    }

    fn metadata(&self) -> JpegMetadata {
        let mut fields = FieldSet::new();
        fields.add(
            Directory::Root,
            Tag::Make,
            Value::Ascii(vec![b"ACME".to_vec()]),
        );
        if let Some(value) = self.orientation {
            fields.add(Directory::Root, Tag::Orientation, Value::Short(vec![value]));
        }
        if let Some((x, y)) = self.pixel_dimensions.clone() {
            fields.add(Directory::Exif, Tag::PixelXDimension, x);
            fields.add(Directory::Exif, Tag::PixelYDimension, y);
        }
        if let Some((w, h)) = self.related_dimensions.clone() {
            fields.add(Directory::Interop, Tag::RelatedImageWidth, w);
            fields.add(Directory::Interop, Tag::RelatedImageLength, h);
        }
        if let Some(reference) = self.gps_latitude_ref {
            fields.add(
                Directory::Gps,
                Tag::GPSLatitudeRef,
                Value::Ascii(vec![reference.as_bytes().to_vec()]),
            );
        }

        JpegMetadata {
            fields,
            little_endian: self.little_endian,
            icc_profile: self.icc_profile.clone(),
            xmp: self.xmp.clone(),
            thumbnail: self.thumbnail.clone(),
            photoshop: self.photoshop.clone(),
        }
    }
}

/// Encode `image` and embed the fixture's metadata.
pub fn jpeg_with_exif(image: &PixelBuffer, fixture: &ExifFixture) -> Vec<u8> {
    let encoded = encode_jpeg(image, 95).expect("fixture encodes");
    if fixture.without_exif {
        return encoded;
    }
    JpegMetadataCodec
        .write(&encoded, &fixture.metadata())
        .expect("fixture metadata writes")
}
