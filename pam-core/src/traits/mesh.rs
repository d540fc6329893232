//! Bed-mesh collaborator traits.

use pam_gcode::CalibrationRequest;

use crate::geometry::MeshGrid;

/// Exposes the host's configured mesh grid
pub trait MeshSettings {
    /// The full-bed mesh configuration (bounds, point counts, algorithm)
    fn grid(&self) -> MeshGrid;
}

/// Executes the delegated full-bed-mesh-calibration command
///
/// Invocation is fire-and-forget: the planner neither waits on nor
/// inspects the outcome. Failures inside the delegated command surface
/// through the host's own error path.
pub trait MeshCalibrator {
    /// Run calibration as described by `request`
    fn calibrate(&mut self, request: &CalibrationRequest<'_>);
}
