//! Typed `BED_MESH_CALIBRATE` delegation requests.
//!
//! The planner never formats raw command strings internally; it hands a
//! [`CalibrationRequest`] to the host's calibrator collaborator. Hosts that
//! dispatch textual G-code can render the request with
//! [`CalibrationRequest::render`], which reproduces the argument vocabulary
//! of the stock calibration command.

use core::fmt::Write;

use heapless::String;

/// Name of the delegated host command
pub const CMD_BED_MESH_CALIBRATE: &str = "BED_MESH_CALIBRATE";

/// Maximum rendered command length
pub const MAX_COMMAND_LEN: usize = 128;

/// Errors from rendering a request to text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Rendered command exceeds [`MAX_COMMAND_LEN`]
    CommandTooLong,
}

/// Explicit probe window for a bounded calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProbeArea {
    /// Lower-left corner of the probed rectangle
    pub mesh_min: (f32, f32),
    /// Upper-right corner of the probed rectangle
    pub mesh_max: (f32, f32),
    /// Probe points on X and Y
    pub probe_count: (u16, u16),
}

/// A single delegated calibration invocation
///
/// With no probe area the host performs its default full-bed calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationRequest<'a> {
    /// Mesh profile the result is stored under
    pub profile: Option<&'a str>,
    /// Explicit probe window; `None` requests full-bed calibration
    pub area: Option<ProbeArea>,
    /// Probe index used as the zero reference of the stored mesh
    pub relative_reference_index: Option<i32>,
}

impl<'a> CalibrationRequest<'a> {
    /// Default full-bed calibration
    pub fn full_bed(profile: Option<&'a str>) -> Self {
        Self {
            profile,
            area: None,
            relative_reference_index: None,
        }
    }

    /// Calibration bounded to an explicit probe window
    pub fn bounded(
        profile: Option<&'a str>,
        area: ProbeArea,
        relative_reference_index: Option<i32>,
    ) -> Self {
        Self {
            profile,
            area: Some(area),
            relative_reference_index,
        }
    }

    /// Whether this request covers the full bed
    pub fn is_full_bed(&self) -> bool {
        self.area.is_none()
    }

    /// Render the textual command for string-dispatching hosts
    pub fn render(&self) -> Result<String<MAX_COMMAND_LEN>, RenderError> {
        let mut out = String::new();
        out.push_str(CMD_BED_MESH_CALIBRATE)
            .map_err(|_| RenderError::CommandTooLong)?;
        if let Some(profile) = self.profile {
            write!(out, " PROFILE={}", profile).map_err(|_| RenderError::CommandTooLong)?;
        }
        if let Some(area) = &self.area {
            write!(
                out,
                " mesh_min={},{} mesh_max={},{} probe_count={},{}",
                area.mesh_min.0,
                area.mesh_min.1,
                area.mesh_max.0,
                area.mesh_max.1,
                area.probe_count.0,
                area.probe_count.1
            )
            .map_err(|_| RenderError::CommandTooLong)?;
        }
        if let Some(index) = self.relative_reference_index {
            write!(out, " relative_reference_index={}", index)
                .map_err(|_| RenderError::CommandTooLong)?;
        }
        Ok(out)
    }
}
