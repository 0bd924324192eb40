//! JPEG encoding of rotated pixel buffers.
//!
//! Both the main image and the embedded EXIF thumbnail go through
//! [`encode_jpeg`] after their pixels have been transformed.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};
