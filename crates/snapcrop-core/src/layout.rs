//! Initial placement of the crop window and the image.
//!
//! Hosts that do their own layout can skip this module and hand frames to
//! [`crate::session::Cropper::layout_with`]. Otherwise, given the size of the
//! area the image is shown in, this computes:
//!
//! - the crop window: centered, as wide as `fill_fraction` of the container
//!   allows, shrunk to fit the height if the aspect ratio demands it;
//! - the image fit: the smallest aspect-preserving size that covers the
//!   crop window, centered on it.

use crate::geometry::{Point, Rect, Size};

/// Crop window for a container of `container` size.
///
/// Returns `None` if the container is empty or the parameters are not
/// positive.
pub fn crop_window(container: Size, aspect_ratio: f64, fill_fraction: f64) -> Option<Rect> {
    if container.is_empty()
        || !(aspect_ratio.is_finite() && aspect_ratio > 0.0)
        || !(fill_fraction > 0.0 && fill_fraction <= 1.0)
    {
        return None;
    }

    let max_width = container.width * fill_fraction;
    let max_height = container.height * fill_fraction;

    let mut width = max_width;
    let mut height = width / aspect_ratio;
    if height > max_height {
        height = max_height;
        width = height * aspect_ratio;
    }

    let center = Point::new(container.width / 2.0, container.height / 2.0);
    Some(Rect::centered_at(center, Size::new(width, height)))
}

/// Initial frame of an image with `native` pixel size under `crop_window`.
///
/// The image is scaled uniformly so it covers the whole window (aspect
/// fill), then centered on the window. Returns `None` for empty inputs.
pub fn fit_image(crop_window: &Rect, native: Size) -> Option<Rect> {
    if crop_window.is_empty() || native.is_empty() {
        return None;
    }

    let scale = (crop_window.width() / native.width).max(crop_window.height() / native.height);
    let size = Size::new(native.width * scale, native.height * scale);
    Some(Rect::centered_at(crop_window.center(), size))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
