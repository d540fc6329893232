//! Mesh-grid configuration and the connect-time geometry snapshot.

use super::region::Rect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interpolation algorithm configured for the host's bed mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InterpolationAlgorithm {
    #[default]
    Lagrange,
    Bicubic,
}

/// Configured full-bed mesh grid
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshGrid {
    /// Probed bounds of the full-bed mesh
    pub bounds: Rect,
    /// Grid points on X
    pub x_count: u16,
    /// Grid points on Y
    pub y_count: u16,
    /// Interpolation algorithm the host applies to the samples
    pub algorithm: InterpolationAlgorithm,
}

impl MeshGrid {
    /// Per-axis probe step of the full-bed grid
    ///
    /// Returns `None` when the grid cannot produce a usable step (zero
    /// point count or non-increasing bounds).
    pub fn probe_step(&self) -> Option<(f32, f32)> {
        if self.x_count == 0 || self.y_count == 0 || !self.bounds.is_valid() {
            return None;
        }
        Some((
            self.bounds.width() / f32::from(self.x_count),
            self.bounds.height() / f32::from(self.y_count),
        ))
    }
}

/// Geometry snapshot taken when the host connects
///
/// Neither the kinematic limits nor the mesh configuration change while
/// the host is running, so the snapshot is read once.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BedGeometry {
    /// Printable bed bounds from kinematics
    pub bed: Rect,
    /// Configured mesh grid
    pub grid: MeshGrid,
}
