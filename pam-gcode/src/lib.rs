//! G-code command surface for the PAM adaptive bed-mesh planner
//!
//! This crate defines the host-facing command vocabulary: parsing and
//! validation of `KEY=VALUE` command parameters, and the typed
//! `BED_MESH_CALIBRATE` delegation request together with its textual
//! rendering for hosts that dispatch string commands.
//!
//! # Command Overview
//!
//! ```text
//! MESH_CONFIG X0=50 Y0=50 X1=150 Y1=150    declare the print area
//! PAM                                      plan and delegate calibration
//! BED_MESH_CALIBRATE PROFILE=ratos ...     the delegated host command
//! ```
//!
//! The planner itself lives in `pam-core`; this crate stays independent of
//! it so hosts can reuse the parameter layer on its own.

#![no_std]
#![deny(unsafe_code)]

pub mod calibrate;
pub mod params;

pub use calibrate::{
    CalibrationRequest, ProbeArea, RenderError, CMD_BED_MESH_CALIBRATE, MAX_COMMAND_LEN,
};
pub use params::{CommandArgs, ParamError, MAX_ARGS};
