//! Rectangle and axis types in bed coordinates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bed axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    X,
    Y,
}

/// Axis-aligned rectangle in bed coordinates
///
/// `(x0, y0)` is the lower-left corner, `(x1, y1)` the upper-right. A
/// default rectangle is degenerate (all zeros) and fails [`Rect::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from its corners
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Both spans strictly increasing
    pub fn is_valid(&self) -> bool {
        self.x0 < self.x1 && self.y0 < self.y1
    }

    /// Extent on X
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Extent on Y
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Expand by `margin` on every side (negative shrinks)
    pub fn padded(&self, margin: f32) -> Self {
        Self {
            x0: self.x0 - margin,
            y0: self.y0 - margin,
            x1: self.x1 + margin,
            y1: self.y1 + margin,
        }
    }

    /// Intersection with `bounds`
    ///
    /// The result may be degenerate when the rectangles are disjoint;
    /// callers check [`Rect::is_valid`].
    pub fn clamped_to(&self, bounds: &Rect) -> Self {
        Self {
            x0: self.x0.max(bounds.x0),
            y0: self.y0.max(bounds.y0),
            x1: self.x1.min(bounds.x1),
            y1: self.y1.min(bounds.y1),
        }
    }

    /// Inclusive containment of a coordinate on one axis
    pub fn contains_axis(&self, axis: Axis, value: f32) -> bool {
        match axis {
            Axis::X => value >= self.x0 && value <= self.x1,
            Axis::Y => value >= self.y0 && value <= self.y1,
        }
    }
}
