//! Gesture events delivered by the host's input system.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A single pinch or pan update.
///
/// Hosts forward the recognizer phases they receive: a `*Began` event when
/// the gesture starts, then `*Changed` events carrying the cumulative scale
/// or translation since the start of that gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GestureEvent {
    /// Two fingers touched down. `anchor` is the midpoint, if known.
    PinchBegan { anchor: Option<Point> },
    /// Cumulative scale relative to the size at `PinchBegan`.
    PinchChanged { scale: f64 },
    /// One finger started dragging.
    PanBegan,
    /// Cumulative translation since `PanBegan`.
    PanChanged { dx: f64, dy: f64 },
    /// The gesture finished or was cancelled by the recognizer.
    Ended,
}
