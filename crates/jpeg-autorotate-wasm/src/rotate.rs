//! Orientation correction WASM bindings.
//!
//! # Functions
//!
//! - [`rotate_jpeg`] - Correct a JPEG with default options
//! - [`rotate_jpeg_with_options`] - Correct a JPEG with a plain options object
//! - [`get_orientation`] - Read the EXIF orientation (1-8)
//! - [`is_jpeg`] - Sniff the JPEG SOI marker
//!
//! # Example
//!
//! ```typescript
//! import { rotate_jpeg_with_options, get_orientation } from '@jpeg-autorotate/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! if (get_orientation(bytes) !== 1) {
//!   const upright = rotate_jpeg_with_options(bytes, { quality: 85 });
//!   await writable.write(new Blob([upright], { type: 'image/jpeg' }));
//! }
//! ```

use jpeg_autorotate_core::{self as autorotate, RotateOptions};
use wasm_bindgen::prelude::*;

/// Correct the orientation of a JPEG.
///
/// Upright images come back unchanged. Errors are thrown as strings naming
/// the failed stage, e.g. `"<memory>: resolving orientation failed: ..."`.
#[wasm_bindgen]
pub fn rotate_jpeg(bytes: &[u8]) -> Result<Vec<u8>, JsValue> {
    autorotate::rotate(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Correct the orientation of a JPEG using `{ quality, thumbnailQuality, preserveIccProfile }`.
///
/// Omitted fields take their defaults; `undefined` uses all defaults.
#[wasm_bindgen]
pub fn rotate_jpeg_with_options(bytes: &[u8], options: JsValue) -> Result<Vec<u8>, JsValue> {
    let options: RotateOptions = if options.is_undefined() || options.is_null() {
        RotateOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid rotate options: {}", e)))?
    };

    autorotate::rotate_with_options(bytes, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation value (1-8), or `undefined` if absent or invalid.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> Option<u8> {
    autorotate::get_orientation(bytes).map(|orientation| orientation as u8)
}

/// Check whether the bytes start with a JPEG SOI marker.
#[wasm_bindgen]
pub fn is_jpeg(bytes: &[u8]) -> bool {
    autorotate::is_jpeg(bytes)
}
