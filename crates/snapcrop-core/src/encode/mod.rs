//! Encoding of cropped images for hosts that want bytes.
//!
//! Supports JPEG with configurable quality and lossless PNG.
//!
//! # Examples
//!
//! ```ignore
//! use snapcrop_core::encode::{encode, OutputFormat};
//!
//! let bytes = encode(&cropped, OutputFormat::Jpeg { quality: 90 }).unwrap();
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod writer;

pub use writer::{encode, encode_pixels, EncodeError, OutputFormat};
