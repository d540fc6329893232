//! Planner configuration
//!
//! Static settings read once from the host's configuration section.

pub mod types;

pub use types::{PlannerConfig, DEFAULT_PROFILE, MAX_PROFILE_LEN};
