//! Gesture-driven display transform of the image surface.
//!
//! The host delivers pinch and pan events; this module turns them into the
//! size and position at which the image should be drawn underneath the crop
//! window.
//!
//! # Coordinate System
//!
//! - Offsets are relative to the containing frame (the host viewport)
//! - Origin is top-left corner, y grows downwards
//! - Pinch scale is cumulative since the gesture began (1.0 = no change)
//! - Pan deltas are cumulative since the gesture began

mod display;
mod gesture;

pub use display::DisplayTransform;
pub use gesture::GestureEvent;
