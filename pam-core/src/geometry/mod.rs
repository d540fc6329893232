//! Bed and mesh-grid geometry
//!
//! Rectangle math for print areas and the probed-grid configuration.

pub mod grid;
pub mod region;

pub use grid::{BedGeometry, InterpolationAlgorithm, MeshGrid};
pub use region::{Axis, Rect};
