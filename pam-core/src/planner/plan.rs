//! Probe-plan computation
//!
//! Pads the declared print area, clamps it to the mesh bounds, and derives
//! probe counts that keep roughly the probing density of the full-bed grid.

use pam_gcode::ProbeArea;

use crate::geometry::{InterpolationAlgorithm, MeshGrid, Rect};

/// Minimum probe points per axis
pub const PROBE_MIN_COUNT: u16 = 3;
/// Lagrange interpolation oscillates above this many samples per axis
pub const LAGRANGE_MAX_COUNT: u16 = 6;
/// Bicubic interpolation needs at least this many samples per axis
pub const BICUBIC_MIN_COUNT: u16 = 4;

/// A bounded probing pass over part of the bed
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProbePlan {
    /// Clamped probe rectangle
    pub region: Rect,
    /// Probe points on X and Y
    pub counts: (u16, u16),
}

impl ProbePlan {
    /// Compute the plan for a declared print area
    ///
    /// Returns `None` when the declared area is degenerate, the grid is
    /// unusable, or the padded area clamps to an empty rectangle; callers
    /// fall back to full-bed calibration in every such case.
    pub fn compute(
        area: &Rect,
        grid: &MeshGrid,
        offset: f32,
        algorithm_clamp: bool,
    ) -> Option<Self> {
        if !area.is_valid() {
            return None;
        }
        let (step_x, step_y) = grid.probe_step()?;

        let region = area.padded(offset).clamped_to(&grid.bounds);
        if !region.is_valid() {
            return None;
        }

        let mut counts = (
            axis_count(region.width(), step_x),
            axis_count(region.height(), step_y),
        );
        if algorithm_clamp {
            counts = clamp_to_algorithm(counts, grid.algorithm);
        }

        Some(Self { region, counts })
    }

    /// Convert into the probe window of a calibration request
    pub fn probe_area(&self) -> ProbeArea {
        ProbeArea {
            mesh_min: (self.region.x0, self.region.y0),
            mesh_max: (self.region.x1, self.region.y1),
            probe_count: self.counts,
        }
    }
}

/// Probe count for one axis: floor of span over step, at least the minimum
///
/// Truncation is floor here; span and step are both positive.
fn axis_count(span: f32, step: f32) -> u16 {
    ((span / step) as u16).max(PROBE_MIN_COUNT)
}

/// Keep counts inside the configured interpolation algorithm's valid range
fn clamp_to_algorithm(counts: (u16, u16), algorithm: InterpolationAlgorithm) -> (u16, u16) {
    match algorithm {
        // Lagrange tends to oscillate with more than 6 samples per axis
        InterpolationAlgorithm::Lagrange => (
            counts.0.min(LAGRANGE_MAX_COUNT),
            counts.1.min(LAGRANGE_MAX_COUNT),
        ),
        // Bicubic needs at least 4 samples on each axis
        InterpolationAlgorithm::Bicubic => (
            counts.0.max(BICUBIC_MIN_COUNT),
            counts.1.max(BICUBIC_MIN_COUNT),
        ),
    }
}
