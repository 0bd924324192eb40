//! Literal attribute substitution inside an XMP packet.
//!
//! The packet is treated as bytes, not parsed as XML, so packets that are not
//! valid UTF-8 are still handled and every byte outside a rewritten value is
//! kept. Only attributes that already exist with a quoted decimal value are
//! rewritten. Every occurrence is replaced and the original quote style kept.
//! Element-form properties are left alone.

use lazy_static::lazy_static;
use regex::bytes::{Captures, Regex};

/// XMP attributes kept consistent with the corrected image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    TiffOrientation,
    TiffImageWidth,
    TiffImageLength,
    ExifPixelXDimension,
    ExifPixelYDimension,
    XmpThumbnailsWidth,
    XmpThumbnailsHeight,
}

impl Attribute {
    pub const ALL: [Attribute; 7] = [
        Attribute::TiffOrientation,
        Attribute::TiffImageWidth,
        Attribute::TiffImageLength,
        Attribute::ExifPixelXDimension,
        Attribute::ExifPixelYDimension,
        Attribute::XmpThumbnailsWidth,
        Attribute::XmpThumbnailsHeight,
    ];

    /// Qualified attribute name as it appears in the packet.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::TiffOrientation => "tiff:Orientation",
            Attribute::TiffImageWidth => "tiff:ImageWidth",
            Attribute::TiffImageLength => "tiff:ImageLength",
            Attribute::ExifPixelXDimension => "exif:PixelXDimension",
            Attribute::ExifPixelYDimension => "exif:PixelYDimension",
            Attribute::XmpThumbnailsWidth => "xmp:ThumbnailsWidth",
            Attribute::XmpThumbnailsHeight => "xmp:ThumbnailsHeight",
        }
    }
}

lazy_static! {
    /// `name = "123"` or `name = '123'` for any of the [`Attribute`]s.
    static ref NUMERIC_ATTRIBUTE: Option<Regex> = {
        let names = Attribute::ALL
            .iter()
            .map(|attribute| regex::escape(attribute.name()))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(
            r#"(?P<lead>\b(?P<attr>{names})\s*=\s*)(?:"(?P<dq>[0-9]+)"|'(?P<sq>[0-9]+)')"#
        ))
        .ok()
    };
}

/// Replace the value of every occurrence of `attribute` with `value`.
///
/// Returns `true` if at least one occurrence was rewritten.
pub fn set_attribute(packet: &mut Vec<u8>, attribute: Attribute, value: u32) -> bool {
    let Some(re) = NUMERIC_ATTRIBUTE.as_ref() else {
        return false;
    };

    let mut rewritten = false;
    let replaced = re.replace_all(packet.as_slice(), |caps: &Captures| {
        if &caps["attr"] != attribute.name().as_bytes() {
            return caps[0].to_vec();
        }
        rewritten = true;
        let quote: &[u8] = if caps.name("sq").is_some() { b"'" } else { b"\"" };
        [&caps["lead"], quote, value.to_string().as_bytes(), quote].concat()
    });

    if rewritten {
        *packet = replaced.into_owned();
    }
    rewritten
}

/// Value of the first occurrence of `attribute`, if any.
pub fn attribute(packet: &[u8], attribute: Attribute) -> Option<u32> {
    let caps = NUMERIC_ATTRIBUTE
        .as_ref()?
        .captures_iter(packet)
        .find(|caps| &caps["attr"] == attribute.name().as_bytes())?;
    let digits = caps.name("dq").or_else(|| caps.name("sq"))?;
    std::str::from_utf8(digits.as_bytes()).ok()?.parse().ok()
}
