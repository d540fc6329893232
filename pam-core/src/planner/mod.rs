//! Probe planning
//!
//! Turns the declared print area into a bounded calibration request and
//! hosts the planner component that owns the session state.

pub mod area;
pub mod plan;

pub use area::{
    AreaMeshPlanner, CommandError, ConnectError, Lifecycle, CMD_MESH_CONFIG, CMD_PAM,
    EVENT_CONNECT,
};
pub use plan::{ProbePlan, BICUBIC_MIN_COUNT, LAGRANGE_MAX_COUNT, PROBE_MIN_COUNT};
