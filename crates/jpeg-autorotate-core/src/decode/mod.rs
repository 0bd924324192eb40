//! Image decoding and the orientation data model.
//!
//! This module provides:
//! - [`Orientation`], the eight-state EXIF orientation enumerant
//! - [`PixelBuffer`], the owned RGB8 buffer every transform consumes
//! - JPEG decoding without orientation correction, plus input sniffing
//!
//! # Examples
//!
//! ```ignore
//! use jpeg_autorotate_core::decode::{decode_pixels, get_orientation};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let orientation = get_orientation(&bytes);
//! let pixels = decode_pixels(&bytes).unwrap();
//! println!("{}x{} stored as {:?}", pixels.width, pixels.height, orientation);
//! ```

mod jpeg;
mod types;

pub use jpeg::{decode_pixels, get_orientation, has_jpeg_extension, is_jpeg};
pub use types::{
    DecodeError, Dimensions, Orientation, PixelBuffer, UnknownOrientation, BYTES_PER_PIXEL,
};
