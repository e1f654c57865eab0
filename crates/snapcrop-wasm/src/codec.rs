//! Image decoding and encoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG/PNG file, applying EXIF orientation
//! - [`exif_orientation`] - Read the EXIF orientation (1-8) of a file
//! - [`encode_jpeg`] - Encode an image to JPEG bytes
//! - [`encode_png`] - Encode an image to PNG bytes
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_jpeg } from '@snapcrop/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const jpeg = encode_jpeg(image, 90);
//! ```

use crate::types::JsDecodedImage;
use snapcrop_core::decode;
use snapcrop_core::encode::{self, OutputFormat};
use wasm_bindgen::prelude::*;

/// Decode an image from bytes and make it upright.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation value (1-8) of an encoded image; 1 if absent.
#[wasm_bindgen]
pub fn exif_orientation(bytes: &[u8]) -> u8 {
    decode::orientation_of(bytes) as u8
}

/// Encode an image to JPEG (quality 1-100, recommended: 90).
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode_as(image, OutputFormat::Jpeg { quality })
}

/// Encode an image to PNG.
#[wasm_bindgen]
pub fn encode_png(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    encode_as(image, OutputFormat::Png)
}

fn encode_as(image: &JsDecodedImage, format: OutputFormat) -> Result<Vec<u8>, JsValue> {
    encode::encode(&image.to_decoded(), format).map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg() {
        let img = JsDecodedImage::new(50, 50, vec![128u8; 50 * 50 * 3]);
        let jpeg = encode_jpeg(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_invalid_image() {
        let img = JsDecodedImage::new(10, 10, vec![0u8; 12]);
        assert!(encode_png(&img).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_round_trip() {
        let img = JsDecodedImage::new(4, 4, vec![200u8; 4 * 4 * 3]);
        let png = encode_png(&img).unwrap();
        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.pixels(), img.pixels());
    }

    #[wasm_bindgen_test]
    fn test_decode_garbage() {
        assert!(decode_image(&[0x00, 0x01]).is_err());
    }
}
