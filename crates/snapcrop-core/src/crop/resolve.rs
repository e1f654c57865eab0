//! Mapping the on-screen crop window back into source pixels.
//!
//! The crop window and the displayed image live in the same (host)
//! coordinate space. Expressing the window as fractions of the displayed
//! image frame makes the result independent of the current zoom, and
//! multiplying by the native bitmap size gives the pixel rectangle.
//!
//! ```text
//! frac_x      = (crop.x - image.x) / image.width
//! frac_y      = (crop.y - image.y) / image.height
//! frac_width  = crop.width  / image.width
//! frac_height = crop.height / image.height
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};

/// A crop region expressed as ratios of the displayed image frame.
///
/// Values are in 0.0..=1.0 while the crop window lies inside the image; an
/// image panned away from the window yields values outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FractionalRect {
    /// The whole image.
    pub const FULL: FractionalRect = FractionalRect {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// True if the region lies within the unit square.
    pub fn is_within_unit(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= 1.0
            && self.y + self.height <= 1.0
    }

    /// Scale the fractions into a pixel rectangle of a `native` sized bitmap.
    pub fn to_pixels(&self, native: Size) -> Rect {
        Rect::new(
            self.x * native.width,
            self.y * native.height,
            self.width * native.width,
            self.height * native.height,
        )
    }
}

/// Everything needed to turn the on-screen crop window into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRequest {
    /// Crop window, in the same space as `image_frame`.
    pub crop_frame: Rect,
    /// Frame of the displayed (scaled and panned) image.
    pub image_frame: Rect,
    /// Pixel dimensions of the original bitmap.
    pub native_size: Size,
}

impl CropRequest {
    pub fn new(crop_frame: Rect, image_frame: Rect, native_size: Size) -> Self {
        Self {
            crop_frame,
            image_frame,
            native_size,
        }
    }

    /// Crop window as fractions of the displayed image frame.
    ///
    /// Returns `None` if the image frame has no usable width or height.
    pub fn fractional(&self) -> Option<FractionalRect> {
        if self.image_frame.is_empty() {
            return None;
        }

        let image = &self.image_frame;
        let crop = &self.crop_frame;

        Some(FractionalRect {
            x: (crop.x() - image.x()) / image.width(),
            y: (crop.y() - image.y()) / image.height(),
            width: crop.width() / image.width(),
            height: crop.height() / image.height(),
        })
    }

    /// Pixel-space rectangle to extract from the original bitmap.
    ///
    /// Not rounded and not clipped: an image panned partly away from the
    /// crop window yields a rectangle reaching outside `[0, native_size]`.
    pub fn resolve(&self) -> Option<Rect> {
        self.fractional().map(|f| f.to_pixels(self.native_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rect_eq(actual: Rect, expected: Rect) {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(
            close(actual.x(), expected.x())
                && close(actual.y(), expected.y())
                && close(actual.width(), expected.width())
                && close(actual.height(), expected.height()),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_reference_scenario() {
        let request = CropRequest::new(
            Rect::new(50.0, 25.0, 200.0, 150.0),
            Rect::new(0.0, 0.0, 300.0, 200.0),
            Size::new(3000.0, 2000.0),
        );
        let rect = request.resolve().unwrap();
        assert_rect_eq(rect, Rect::new(500.0, 250.0, 2000.0, 1500.0));
    }

    #[test]
    fn test_full_frame() {
        let frame = Rect::new(12.0, 34.0, 300.0, 200.0);
        let request = CropRequest::new(frame, frame, Size::new(4000.0, 3000.0));

        let frac = request.fractional().unwrap();
        assert_eq!(frac, FractionalRect::FULL);
        assert_rect_eq(request.resolve().unwrap(), Rect::new(0.0, 0.0, 4000.0, 3000.0));
    }

    #[test]
    fn test_zoomed_image() {
        // Image zoomed to 600x400 and panned so the window sits at its center
        let request = CropRequest::new(
            Rect::new(0.0, 0.0, 300.0, 200.0),
            Rect::new(-150.0, -100.0, 600.0, 400.0),
            Size::new(600.0, 400.0),
        );
        assert_rect_eq(request.resolve().unwrap(), Rect::new(150.0, 100.0, 300.0, 200.0));
    }

    #[test]
    fn test_panned_outside_image() {
        // Image dragged right so the window's left part hangs off the image
        let request = CropRequest::new(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(50.0, 0.0, 200.0, 200.0),
            Size::new(200.0, 200.0),
        );
        let frac = request.fractional().unwrap();
        assert!(frac.x < 0.0);
        assert!(!frac.is_within_unit());
        assert_rect_eq(request.resolve().unwrap(), Rect::new(-50.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_empty_image_frame() {
        let request = CropRequest::new(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Rect::new(0.0, 0.0, 0.0, 200.0),
            Size::new(200.0, 200.0),
        );
        assert!(request.fractional().is_none());
        assert!(request.resolve().is_none());
    }

    #[test]
    fn test_within_unit() {
        assert!(FractionalRect::FULL.is_within_unit());
        let shifted = FractionalRect {
            x: 0.5,
            y: 0.0,
            width: 0.6,
            height: 1.0,
        };
        assert!(!shifted.is_within_unit());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for an image frame and a crop window fully inside it.
    fn contained_strategy() -> impl Strategy<Value = (Rect, Rect)> {
        (
            -500.0f64..=500.0,
            -500.0f64..=500.0,
            10.0f64..=2000.0,
            10.0f64..=2000.0,
            0.0f64..=1.0,
            0.0f64..=1.0,
            0.0f64..=1.0,
            0.0f64..=1.0,
        )
            .prop_map(|(ix, iy, iw, ih, fx, fy, fw, fh)| {
                let image = Rect::new(ix, iy, iw, ih);
                let x = ix + fx * iw;
                let y = iy + fy * ih;
                let w = fw * (ix + iw - x);
                let h = fh * (iy + ih - y);
                (image, Rect::new(x, y, w, h))
            })
    }

    fn native_strategy() -> impl Strategy<Value = Size> {
        (1u32..=8000, 1u32..=8000).prop_map(|(w, h)| Size::from_pixels(w, h))
    }

    proptest! {
        /// Property: Crop window covering the image yields the full bitmap.
        #[test]
        fn prop_full_frame_round_trip(
            (ix, iy, iw, ih) in (-500.0f64..=500.0, -500.0f64..=500.0, 1.0f64..=2000.0, 1.0f64..=2000.0),
            native in native_strategy(),
        ) {
            let frame = Rect::new(ix, iy, iw, ih);
            let rect = CropRequest::new(frame, frame, native).resolve().unwrap();

            prop_assert_eq!(rect.x(), 0.0);
            prop_assert_eq!(rect.y(), 0.0);
            prop_assert!((rect.width() - native.width).abs() < 1e-6);
            prop_assert!((rect.height() - native.height).abs() < 1e-6);
        }

        /// Property: Doubling the native size doubles every component.
        #[test]
        fn prop_scaling_invariance(
            (image, crop) in contained_strategy(),
            native in native_strategy(),
        ) {
            let single = CropRequest::new(crop, image, native).resolve().unwrap();
            let doubled = CropRequest::new(
                crop,
                image,
                Size::new(native.width * 2.0, native.height * 2.0),
            )
            .resolve()
            .unwrap();

            let tol = 1e-6;
            prop_assert!((doubled.x() - 2.0 * single.x()).abs() < tol);
            prop_assert!((doubled.y() - 2.0 * single.y()).abs() < tol);
            prop_assert!((doubled.width() - 2.0 * single.width()).abs() < tol);
            prop_assert!((doubled.height() - 2.0 * single.height()).abs() < tol);
        }

        /// Property: A contained crop window stays inside the native bounds.
        #[test]
        fn prop_contained_crop_in_bounds(
            (image, crop) in contained_strategy(),
            native in native_strategy(),
        ) {
            let rect = CropRequest::new(crop, image, native).resolve().unwrap();
            let tol = 1e-6 * native.width.max(native.height);

            prop_assert!(rect.min_x() >= -tol);
            prop_assert!(rect.min_y() >= -tol);
            prop_assert!(rect.max_x() <= native.width + tol);
            prop_assert!(rect.max_y() <= native.height + tol);
        }
    }
}
