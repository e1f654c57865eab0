//! Image decoding for the cropper.
//!
//! This module provides:
//! - Decoding JPEG and PNG photos from bytes
//! - Reading EXIF orientation and making images upright
//!
//! All operations are synchronous and run on the caller's thread.
//!
//! # Examples
//!
//! ```ignore
//! use snapcrop_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, orientation_of};
pub use types::{DecodeError, DecodedImage, Orientation};
