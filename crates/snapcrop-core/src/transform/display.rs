//! Display transform of the image surface under the crop window.
//!
//! The transform is a small value type updated by pure functions of
//! `(previous state, gesture event)`. Each gesture snapshots a base pose when
//! it begins; updates are then computed against that base, never
//! accumulated onto the previous update.
//!
//! # Clamping
//!
//! - Pinch: width and height each have their own floor (the crop window
//!   size), so the image never becomes smaller than the window. The floors
//!   are applied independently, which may distort the aspect ratio of the
//!   displayed image at the floor.
//! - Pan: no clamp. The image may be dragged arbitrarily far, including
//!   completely away from the crop window.

use serde::{Deserialize, Serialize};

use super::GestureEvent;
use crate::geometry::{Point, Rect, Size};

/// Current size and position of the displayed image, plus the snapshots
/// taken at the start of the active gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayTransform {
    /// Current rendered width.
    pub width: f64,
    /// Current rendered height.
    pub height: f64,
    /// Left edge relative to the containing frame.
    pub offset_x: f64,
    /// Top edge relative to the containing frame.
    pub offset_y: f64,
    /// Width at the last pinch start (or at the initial fit).
    pub base_width: f64,
    /// Height at the last pinch start (or at the initial fit).
    pub base_height: f64,
    /// Left edge at the last pan start.
    pub base_offset_x: f64,
    /// Top edge at the last pan start.
    pub base_offset_y: f64,
    /// Minimum width (crop window width).
    pub floor_width: f64,
    /// Minimum height (crop window height).
    pub floor_height: f64,
    /// Pinch midpoint at the last pinch start. Not used by the clamp math.
    pub pinch_anchor: Option<Point>,
}

impl DisplayTransform {
    /// Create a transform at its initial fit pose.
    ///
    /// `fit` is the initial frame of the image surface and `crop_window` the
    /// size the image must never shrink below. A fit smaller than the window
    /// is grown to the floor on each axis, keeping its origin.
    pub fn new(fit: Rect, crop_window: Size) -> Self {
        let width = fit.width().max(crop_window.width);
        let height = fit.height().max(crop_window.height);
        Self {
            width,
            height,
            offset_x: fit.x(),
            offset_y: fit.y(),
            base_width: width,
            base_height: height,
            base_offset_x: fit.x(),
            base_offset_y: fit.y(),
            floor_width: crop_window.width,
            floor_height: crop_window.height,
            pinch_anchor: None,
        }
    }

    /// Frame of the displayed image in the containing frame's coordinates.
    pub fn frame(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.width, self.height)
    }

    /// Snapshot the current size as the pinch base.
    #[must_use]
    pub fn begin_pinch(self, anchor: Option<Point>) -> Self {
        Self {
            base_width: self.width,
            base_height: self.height,
            pinch_anchor: anchor,
            ..self
        }
    }

    /// Scale the pinch base by `scale`, never going below the floors.
    ///
    /// `f64::max` returns the floor for a NaN product, so a degenerate scale
    /// leaves the image at the crop window size.
    #[must_use]
    pub fn update_pinch(self, scale: f64) -> Self {
        Self {
            width: (self.base_width * scale).max(self.floor_width),
            height: (self.base_height * scale).max(self.floor_height),
            ..self
        }
    }

    /// Snapshot the current offset as the pan base.
    #[must_use]
    pub fn begin_pan(self) -> Self {
        Self {
            base_offset_x: self.offset_x,
            base_offset_y: self.offset_y,
            ..self
        }
    }

    /// Translate the pan base by the cumulative gesture delta.
    #[must_use]
    pub fn update_pan(self, dx: f64, dy: f64) -> Self {
        Self {
            offset_x: self.base_offset_x + dx,
            offset_y: self.base_offset_y + dy,
            ..self
        }
    }

    /// Reduce one gesture event into a new transform.
    #[must_use]
    pub fn apply(self, event: GestureEvent) -> Self {
        match event {
            GestureEvent::PinchBegan { anchor } => self.begin_pinch(anchor),
            GestureEvent::PinchChanged { scale } => self.update_pinch(scale),
            GestureEvent::PanBegan => self.begin_pan(),
            GestureEvent::PanChanged { dx, dy } => self.update_pan(dx, dy),
            GestureEvent::Ended => self,
        }
    }

    /// True if the displayed image still fully covers `crop_window`.
    pub fn covers(&self, crop_window: &Rect) -> bool {
        self.frame().contains_rect(crop_window)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a base size and a crop window no larger than it.
    fn sizes_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
        (10.0f64..=4000.0, 10.0f64..=4000.0, 0.05f64..=1.0, 0.05f64..=1.0)
            .prop_map(|(bw, bh, fw, fh)| (bw, bh, bw * fw, bh * fh))
    }

    proptest! {
        /// Property: Zooming in never drops below the crop window.
        #[test]
        fn prop_zoom_in_respects_floor(
            (bw, bh, cw, ch) in sizes_strategy(),
            scale in 1.0f64..=20.0,
        ) {
            let t = DisplayTransform::new(Rect::new(0.0, 0.0, bw, bh), Size::new(cw, ch))
                .begin_pinch(None)
                .update_pinch(scale);

            prop_assert!(t.width >= cw);
            prop_assert!(t.height >= ch);
        }

        /// Property: Any scale, including shrinking, stays at or above the floor.
        #[test]
        fn prop_any_scale_respects_floor(
            (bw, bh, cw, ch) in sizes_strategy(),
            scale in -2.0f64..=20.0,
        ) {
            let t = DisplayTransform::new(Rect::new(0.0, 0.0, bw, bh), Size::new(cw, ch))
                .begin_pinch(None)
                .update_pinch(scale);

            prop_assert!(t.width >= cw);
            prop_assert!(t.height >= ch);
        }

        /// Property: The floor holds from the first pose, even for a fit
        /// smaller than the crop window, and through a later pan.
        #[test]
        fn prop_floor_holds_from_undersized_fit(
            (fw, fh) in (1.0f64..=2000.0, 1.0f64..=2000.0),
            (cw, ch) in (1.0f64..=2000.0, 1.0f64..=2000.0),
            (dx, dy) in (-500.0f64..=500.0, -500.0f64..=500.0),
        ) {
            let t = DisplayTransform::new(Rect::new(0.0, 0.0, fw, fh), Size::new(cw, ch));
            prop_assert!(t.width >= t.floor_width);
            prop_assert!(t.height >= t.floor_height);

            let t = t.begin_pan().update_pan(dx, dy);
            prop_assert!(t.width >= cw);
            prop_assert!(t.height >= ch);
        }

        /// Property: Pan is exact translation of the base offset.
        #[test]
        fn prop_pan_is_exact_translation(
            (x, y) in (-1000.0f64..=1000.0, -1000.0f64..=1000.0),
            (dx, dy) in (-1e6f64..=1e6, -1e6f64..=1e6),
        ) {
            let t = DisplayTransform::new(Rect::new(x, y, 100.0, 100.0), Size::new(50.0, 50.0))
                .begin_pan()
                .update_pan(dx, dy);

            prop_assert_eq!(t.offset_x, x + dx);
            prop_assert_eq!(t.offset_y, y + dy);
            prop_assert_eq!(t.width, 100.0);
            prop_assert_eq!(t.height, 100.0);
        }

        /// Property: Pinch never changes the offset.
        #[test]
        fn prop_pinch_preserves_offset(
            (x, y) in (-1000.0f64..=1000.0, -1000.0f64..=1000.0),
            scale in 0.0f64..=10.0,
        ) {
            let t = DisplayTransform::new(Rect::new(x, y, 100.0, 80.0), Size::new(40.0, 40.0))
                .begin_pinch(None)
                .update_pinch(scale);

            prop_assert_eq!(t.offset_x, x);
            prop_assert_eq!(t.offset_y, y);
        }
    }
}
