//! JPEG Autorotate WASM - WebAssembly bindings for jpeg-autorotate-core
//!
//! This crate exposes EXIF orientation correction to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `rotate` - Orientation correction and JPEG sniffing
//!
//! # Usage
//!
//! ```typescript
//! import init, { rotate_jpeg } from '@jpeg-autorotate/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const upright = rotate_jpeg(bytes);
//! ```

use wasm_bindgen::prelude::*;

mod rotate;

pub use rotate::{get_orientation, is_jpeg, rotate_jpeg, rotate_jpeg_with_options};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
