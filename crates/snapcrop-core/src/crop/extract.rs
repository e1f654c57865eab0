//! Pixel extraction of a resolved crop rectangle.
//!
//! The resolver hands over an unrounded rectangle in native pixel space.
//! Extraction snaps it to whole pixels the way bitmap crop primitives do
//! (origin rounded down, far edge rounded up), then decides what to do with
//! any part that falls outside the bitmap according to [`OutOfBoundsPolicy`].
//!
//! Extraction never fails loudly: anything that cannot produce a sub-image
//! (no area, no overlap, rejected by policy, malformed source) yields `None`.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::geometry::Rect;

/// Values this close to a whole pixel are treated as that pixel, so float
/// noise like `499.99999999` does not grow the crop by a row or column.
const SNAP_EPSILON: f64 = 1e-6;

/// What to do when the crop rectangle reaches outside the source bitmap.
///
/// This happens when the image has been panned so that the crop window is
/// no longer fully covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutOfBoundsPolicy {
    /// Keep only the part of the rectangle that overlaps the bitmap.
    #[default]
    Clip,
    /// Produce no result unless the rectangle is fully inside the bitmap.
    Reject,
}

/// Whole-pixel crop region inside a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

#[inline]
fn snap(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < SNAP_EPSILON {
        r
    } else {
        v
    }
}

/// Snap `rect` to whole pixels and fit it to a `width` x `height` bitmap.
///
/// Returns `None` if the rectangle is empty, does not overlap the bitmap,
/// or (with [`OutOfBoundsPolicy::Reject`]) is not fully inside it.
pub fn pixel_region(
    rect: &Rect,
    width: u32,
    height: u32,
    policy: OutOfBoundsPolicy,
) -> Option<PixelRegion> {
    if rect.is_empty() || width == 0 || height == 0 {
        return None;
    }

    let min_x = snap(rect.min_x()).floor();
    let min_y = snap(rect.min_y()).floor();
    let max_x = snap(rect.max_x()).ceil();
    let max_y = snap(rect.max_y()).ceil();
    let snapped = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);

    let bounds = Rect::new(0.0, 0.0, width as f64, height as f64);
    if policy == OutOfBoundsPolicy::Reject && !bounds.contains_rect(&snapped) {
        return None;
    }

    // Both rects have whole-pixel edges, so the overlap does too
    let clipped = bounds.intersection(&snapped)?;

    Some(PixelRegion {
        left: clipped.x() as u32,
        top: clipped.y() as u32,
        width: clipped.width() as u32,
        height: clipped.height() as u32,
    })
}

/// Copy the pixels under `rect` out of `image`.
///
/// # Behavior
///
/// - The rectangle is snapped to whole pixels (floor origin, ceil far edge)
/// - Parts outside the bitmap are clipped or rejected per `policy`
/// - Zero-area or non-overlapping rectangles yield `None`
/// - A rectangle covering the whole bitmap returns a copy of it
pub fn extract_region(
    image: &DecodedImage,
    rect: &Rect,
    policy: OutOfBoundsPolicy,
) -> Option<DecodedImage> {
    if image.is_empty() || image.pixels.len() != image.width as usize * image.height as usize * 3
    {
        log::warn!(
            "cannot crop malformed {}x{} image ({} bytes)",
            image.width,
            image.height,
            image.pixels.len()
        );
        return None;
    }

    let region = pixel_region(rect, image.width, image.height, policy)?;

    // Fast path: full crop returns a clone
    if region.left == 0
        && region.top == 0
        && region.width == image.width
        && region.height == image.height
    {
        return Some(image.clone());
    }

    let src_stride = image.width as usize * 3;
    let row_len = region.width as usize * 3;
    let mut output = Vec::with_capacity(row_len * region.height as usize);

    for y in region.top..region.top + region.height {
        let start = y as usize * src_stride + region.left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Some(DecodedImage::new(region.width, region.height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
