//! SnapCrop Core - Crop-to-aspect-ratio kernel
//!
//! This crate provides the headless part of an interactive photo cropper:
//! a fixed-aspect-ratio crop window over an image the user pinches and pans,
//! and the extraction of the selected region from the original bitmap.
//! Rendering and input recognition are left to the host UI.
//!
//! # Module Structure
//!
//! - `geometry` - Points, sizes and rectangles
//! - `transform` - Gesture-driven display transform of the image
//! - `crop` - Crop window to pixel rectangle, and pixel extraction
//! - `layout` - Initial crop window and image fit for a container
//! - `session` - The cropper state machine and its host callbacks
//! - `config` - Validated cropper settings
//! - `decode` / `encode` - Image bytes in and out

pub mod config;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod layout;
pub mod session;
pub mod transform;

pub use config::{ConfigError, CropperConfig, ImageSource};
pub use crop::{crop_image, extract_region, CropRequest, FractionalRect, OutOfBoundsPolicy};
pub use decode::{decode_image, DecodeError, DecodedImage, Orientation};
pub use encode::{encode, EncodeError, OutputFormat};
pub use geometry::{Point, Rect, Size};
pub use session::{
    CancelHandling, CropDelegate, CropOutcome, Cropper, CropperState, PickedImage, Presenter,
};
pub use transform::{DisplayTransform, GestureEvent};
