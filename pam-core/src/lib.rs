//! Host-agnostic planner logic for PAM adaptive bed-mesh calibration
//!
//! This crate contains all planner logic that does not depend on a
//! specific host process:
//!
//! - Collaborator traits (config, dispatch, kinematics, mesh, calibrator)
//! - Bed and mesh-grid geometry
//! - Probe-plan computation (pad, clamp, probe counts)
//! - The two-state planner lifecycle and command handlers

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod geometry;
pub mod planner;
pub mod traits;
