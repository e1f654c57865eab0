//! SnapCrop WASM - WebAssembly bindings for SnapCrop
//!
//! This crate exposes the snapcrop-core cropper session and image codecs to
//! JavaScript/TypeScript hosts. The host renders the image and crop window
//! and forwards gestures; the cropper keeps the geometry and produces the
//! cropped bitmap.
//!
//! # Module Structure
//!
//! - `cropper` - The interactive cropper session (`JsCropper`)
//! - `codec` - Image decoding and encoding bindings
//! - `types` - WASM-compatible wrapper types for image data
//! - `logger` - Console logging and panic hook
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropper, encode_jpeg } from '@snapcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const cropper = new JsCropper(1.0);
//! cropper.decode_and_set(new Uint8Array(await file.arrayBuffer()));
//! cropper.appear();
//! cropper.layout(800, 600);
//! const cropped = cropper.confirm();
//! const jpeg = encode_jpeg(cropped, 90);
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod cropper;
mod logger;
mod types;

// Re-export public types
pub use codec::{decode_image, encode_jpeg, encode_png, exif_orientation};
pub use cropper::JsCropper;
pub use logger::set_log_level;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
