//! Turning the confirmed crop window into a sub-image.
//!
//! Two steps:
//! 1. [`CropRequest::resolve`] maps the on-screen crop window to a
//!    rectangle in native pixel space (pure geometry, unrounded).
//! 2. [`extract_region`] snaps that rectangle to whole pixels and copies the
//!    pixels out of the source bitmap.
//!
//! # Coordinate System
//!
//! - Fractions are relative to the displayed image frame (0.0 to 1.0 while
//!   the crop window lies inside the image)
//! - Pixel rectangles are relative to the original bitmap
//! - Origin is top-left corner

mod extract;
mod resolve;

pub use extract::{extract_region, pixel_region, OutOfBoundsPolicy, PixelRegion};
pub use resolve::{CropRequest, FractionalRect};

use crate::decode::DecodedImage;

/// Resolve and extract in one go.
///
/// Returns `None` when the request cannot be resolved or nothing can be
/// extracted; see [`extract_region`].
pub fn crop_image(
    image: &DecodedImage,
    request: &CropRequest,
    policy: OutOfBoundsPolicy,
) -> Option<DecodedImage> {
    let rect = request.resolve()?;
    log::debug!("crop resolved to pixel rect {rect:?}");
    if request.fractional().is_some_and(|f| !f.is_within_unit()) {
        log::debug!("crop window reaches past the image edges ({policy:?})");
    }
    extract_region(image, &rect, policy)
}
