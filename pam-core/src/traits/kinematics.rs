//! Kinematics collaborator trait.

use crate::geometry::Rect;

/// Exposes the printable area of the machine
pub trait Kinematics {
    /// Min/max travel of the X and Y axes as a rectangle
    fn bed_bounds(&self) -> Rect;
}
