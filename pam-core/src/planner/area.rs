//! The planner component and its lifecycle.
//!
//! `AreaMeshPlanner` owns the declared print area and the connect-time
//! geometry snapshot, and turns the `MESH_CONFIG`/`PAM` commands into
//! delegated calibration requests.

use core::fmt::Write;

use heapless::String;
use pam_gcode::{CalibrationRequest, CommandArgs, ParamError};

use crate::config::PlannerConfig;
use crate::geometry::{Axis, BedGeometry, Rect};
use crate::planner::plan::ProbePlan;
use crate::traits::{CommandRegistry, GcodeResponder, Kinematics, MeshCalibrator, MeshSettings};

/// Area-declaration command name
pub const CMD_MESH_CONFIG: &str = "MESH_CONFIG";
/// Mesh-trigger command name
pub const CMD_PAM: &str = "PAM";
/// Lifecycle event the planner subscribes to
pub const EVENT_CONNECT: &str = "printer:connect";

const HELP_MESH_CONFIG: &str = "Declare the print area: MESH_CONFIG X0= Y0= X1= Y1=";
const HELP_PAM: &str = "Run bed-mesh calibration over the declared print area";

/// Maximum user-visible response length
const MAX_RESPONSE_LEN: usize = 96;

/// Planner lifecycle
///
/// Geometry-dependent commands are unavailable until the host's connect
/// event delivers the kinematics and mesh configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Before the connect event; commands fail with `NotReady`
    Unconfigured,
    /// Geometry snapshot taken; full command functionality
    Ready,
}

impl Lifecycle {
    /// Whether command handlers may run
    pub fn commands_allowed(&self) -> bool {
        matches!(self, Lifecycle::Ready)
    }
}

/// Errors from the connect handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectError {
    /// Mesh grid has a zero point count or non-increasing bounds
    DegenerateGrid,
}

impl core::fmt::Display for ConnectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConnectError::DegenerateGrid => write!(f, "mesh grid configuration is unusable"),
        }
    }
}

/// Errors returned by command handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Command arrived before the connect event
    NotReady,
    /// Parameter missing, malformed, or outside its allowed range
    Param(ParamError),
    /// Declared coordinate outside the bed on the given axis
    OutOfBed(Axis),
}

impl From<ParamError> for CommandError {
    fn from(err: ParamError) -> Self {
        CommandError::Param(err)
    }
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::NotReady => write!(f, "printer not connected yet"),
            CommandError::Param(err) => write!(f, "{}", err),
            CommandError::OutOfBed(Axis::X) => {
                write!(f, "declared print area is outside the bed on X")
            }
            CommandError::OutOfBed(Axis::Y) => {
                write!(f, "declared print area is outside the bed on Y")
            }
        }
    }
}

/// Geometry-dependent session state, populated on connect
#[derive(Debug, Clone, Copy, PartialEq)]
struct Session {
    geometry: BedGeometry,
    /// Declared print area; starts as the full bed
    area: Rect,
}

/// Adaptive bed-mesh planner
///
/// Clamps bed-mesh calibration to the declared footprint of the object
/// being printed instead of always probing the full bed.
pub struct AreaMeshPlanner {
    config: PlannerConfig,
    session: Option<Session>,
}

impl AreaMeshPlanner {
    /// Create a planner from loaded configuration
    ///
    /// Geometry-dependent setup is deferred to [`Self::handle_connect`];
    /// the collaborators are not available at construction time.
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Register both commands and the connect event with the host
    pub fn register(&self, registry: &mut impl CommandRegistry) {
        registry.register_command(CMD_MESH_CONFIG, HELP_MESH_CONFIG);
        registry.register_command(CMD_PAM, HELP_PAM);
        registry.register_event_handler(EVENT_CONNECT);
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> Lifecycle {
        if self.session.is_some() {
            Lifecycle::Ready
        } else {
            Lifecycle::Unconfigured
        }
    }

    /// Last declared print area, once connected
    pub fn declared_area(&self) -> Option<Rect> {
        self.session.as_ref().map(|session| session.area)
    }

    /// Connect-event handler
    ///
    /// Snapshots bed geometry from the collaborators, initializes the
    /// declared area to the full bed, and transitions to Ready. On a
    /// degenerate grid the planner stays Unconfigured.
    pub fn handle_connect<K, M>(&mut self, kinematics: &K, mesh: &M) -> Result<(), ConnectError>
    where
        K: Kinematics,
        M: MeshSettings,
    {
        let bed = kinematics.bed_bounds();
        let grid = mesh.grid();
        if grid.probe_step().is_none() {
            return Err(ConnectError::DegenerateGrid);
        }
        self.session = Some(Session {
            geometry: BedGeometry { bed, grid },
            area: bed,
        });
        Ok(())
    }

    /// Declare the print area
    ///
    /// Every coordinate must lie within the bed bounds for its axis; a
    /// violation rejects the whole declaration and keeps the previous
    /// area. A degenerate rectangle is accepted here and handled at
    /// trigger time.
    pub fn declare_area(&mut self, area: Rect) -> Result<(), CommandError> {
        let session = self.session.as_mut().ok_or(CommandError::NotReady)?;
        let bed = session.geometry.bed;
        for (axis, lo, hi) in [
            (Axis::X, area.x0, area.x1),
            (Axis::Y, area.y0, area.y1),
        ] {
            if !bed.contains_axis(axis, lo) || !bed.contains_axis(axis, hi) {
                return Err(CommandError::OutOfBed(axis));
            }
        }
        session.area = area;
        Ok(())
    }

    /// `MESH_CONFIG` handler: parse and declare the print area
    pub fn cmd_mesh_config(&mut self, args: &CommandArgs<'_>) -> Result<(), CommandError> {
        let session = self.session.as_ref().ok_or(CommandError::NotReady)?;
        let bed = session.geometry.bed;
        let x0 = args.get_float("X0", None, Some(bed.x0), Some(bed.x1))?;
        let y0 = args.get_float("Y0", None, Some(bed.y0), Some(bed.y1))?;
        let x1 = args.get_float("X1", None, Some(bed.x0), Some(bed.x1))?;
        let y1 = args.get_float("Y1", None, Some(bed.y0), Some(bed.y1))?;
        self.declare_area(Rect::new(x0, y0, x1, y1))
    }

    /// `PAM` handler: plan and delegate bed-mesh calibration
    ///
    /// A degenerate or unclampable declared area is not an error; it
    /// falls back to default full-bed calibration with a warning.
    pub fn cmd_pam<C, R>(&self, calibrator: &mut C, gcode: &mut R) -> Result<(), CommandError>
    where
        C: MeshCalibrator,
        R: GcodeResponder,
    {
        let session = self.session.as_ref().ok_or(CommandError::NotReady)?;
        let profile = (!self.config.profile.is_empty()).then(|| self.config.profile.as_str());

        let plan = ProbePlan::compute(
            &session.area,
            &session.geometry.grid,
            self.config.offset,
            self.config.algorithm_clamp,
        );
        let request = match &plan {
            Some(plan) => {
                let mut banner: String<MAX_RESPONSE_LEN> = String::new();
                if write!(
                    banner,
                    "PAM: probing ({},{}) to ({},{}) with {}x{} points",
                    plan.region.x0,
                    plan.region.y0,
                    plan.region.x1,
                    plan.region.y1,
                    plan.counts.0,
                    plan.counts.1
                )
                .is_ok()
                {
                    gcode.respond(&banner);
                }
                CalibrationRequest::bounded(
                    profile,
                    plan.probe_area(),
                    Some(self.config.relative_reference_index),
                )
            }
            None => {
                gcode.respond("PAM: no usable print area declared, probing the full bed");
                CalibrationRequest::full_bed(profile)
            }
        };
        calibrator.calibrate(&request);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{InterpolationAlgorithm, MeshGrid};
    use heapless::Vec;
    use pam_gcode::MAX_COMMAND_LEN;

    struct FakeKinematics {
        bed: Rect,
    }

    impl Kinematics for FakeKinematics {
        fn bed_bounds(&self) -> Rect {
            self.bed
        }
    }

    struct FakeMeshSettings {
        grid: MeshGrid,
    }

    impl MeshSettings for FakeMeshSettings {
        fn grid(&self) -> MeshGrid {
            self.grid
        }
    }

    #[derive(Default)]
    struct FakeCalibrator {
        invocations: Vec<String<MAX_COMMAND_LEN>, 4>,
    }

    impl MeshCalibrator for FakeCalibrator {
        fn calibrate(&mut self, request: &CalibrationRequest<'_>) {
            let _ = self.invocations.push(request.render().unwrap());
        }
    }

    #[derive(Default)]
    struct FakeResponder {
        messages: Vec<String<MAX_RESPONSE_LEN>, 4>,
    }

    impl GcodeResponder for FakeResponder {
        fn respond(&mut self, msg: &str) {
            let mut line = String::new();
            let _ = line.push_str(msg);
            let _ = self.messages.push(line);
        }
    }

    #[derive(Default)]
    struct FakeRegistry {
        commands: Vec<(&'static str, &'static str), 4>,
        events: Vec<&'static str, 4>,
    }

    impl CommandRegistry for FakeRegistry {
        fn register_command(&mut self, name: &'static str, help: &'static str) {
            let _ = self.commands.push((name, help));
        }

        fn register_event_handler(&mut self, event: &'static str) {
            let _ = self.events.push(event);
        }
    }

    fn connected_planner(offset: f32) -> AreaMeshPlanner {
        let mut planner = AreaMeshPlanner::new(PlannerConfig {
            offset,
            ..PlannerConfig::default()
        });
        let kinematics = FakeKinematics {
            bed: Rect::new(0.0, 0.0, 300.0, 300.0),
        };
        let mesh = FakeMeshSettings {
            grid: MeshGrid {
                bounds: Rect::new(0.0, 0.0, 300.0, 300.0),
                x_count: 5,
                y_count: 5,
                algorithm: InterpolationAlgorithm::Lagrange,
            },
        };
        planner.handle_connect(&kinematics, &mesh).unwrap();
        planner
    }

    #[test]
    fn test_register() {
        let planner = AreaMeshPlanner::new(PlannerConfig::default());
        let mut registry = FakeRegistry::default();
        planner.register(&mut registry);
        assert_eq!(registry.commands.len(), 2);
        assert_eq!(registry.commands[0].0, CMD_MESH_CONFIG);
        assert_eq!(registry.commands[1].0, CMD_PAM);
        assert_eq!(registry.events.as_slice(), [EVENT_CONNECT]);
    }

    #[test]
    fn test_commands_fail_before_connect() {
        let mut planner = AreaMeshPlanner::new(PlannerConfig::default());
        assert_eq!(planner.lifecycle(), Lifecycle::Unconfigured);
        assert!(!planner.lifecycle().commands_allowed());

        let args = CommandArgs::parse("X0=50 Y0=50 X1=150 Y1=150").unwrap();
        assert_eq!(
            planner.cmd_mesh_config(&args),
            Err(CommandError::NotReady)
        );

        let mut calibrator = FakeCalibrator::default();
        let mut responder = FakeResponder::default();
        assert_eq!(
            planner.cmd_pam(&mut calibrator, &mut responder),
            Err(CommandError::NotReady)
        );
        assert!(calibrator.invocations.is_empty());
    }

    #[test]
    fn test_connect_initializes_full_bed() {
        let planner = connected_planner(0.0);
        assert_eq!(planner.lifecycle(), Lifecycle::Ready);
        assert_eq!(
            planner.declared_area(),
            Some(Rect::new(0.0, 0.0, 300.0, 300.0))
        );
    }

    #[test]
    fn test_connect_rejects_degenerate_grid() {
        let mut planner = AreaMeshPlanner::new(PlannerConfig::default());
        let kinematics = FakeKinematics {
            bed: Rect::new(0.0, 0.0, 300.0, 300.0),
        };
        let mesh = FakeMeshSettings {
            grid: MeshGrid {
                bounds: Rect::new(0.0, 0.0, 300.0, 300.0),
                x_count: 0,
                y_count: 5,
                algorithm: InterpolationAlgorithm::Lagrange,
            },
        };
        assert_eq!(
            planner.handle_connect(&kinematics, &mesh),
            Err(ConnectError::DegenerateGrid)
        );
        assert_eq!(planner.lifecycle(), Lifecycle::Unconfigured);
    }

    #[test]
    fn test_declare_then_pam() {
        let mut planner = connected_planner(10.0);
        let args = CommandArgs::parse("X0=50 Y0=50 X1=150 Y1=150").unwrap();
        planner.cmd_mesh_config(&args).unwrap();

        let mut calibrator = FakeCalibrator::default();
        let mut responder = FakeResponder::default();
        planner.cmd_pam(&mut calibrator, &mut responder).unwrap();

        assert_eq!(
            calibrator.invocations[0].as_str(),
            "BED_MESH_CALIBRATE PROFILE=ratos mesh_min=40,40 mesh_max=160,160 \
             probe_count=3,3 relative_reference_index=-1"
        );
        assert_eq!(
            responder.messages[0].as_str(),
            "PAM: probing (40,40) to (160,160) with 3x3 points"
        );
    }

    #[test]
    fn test_degenerate_area_falls_back_to_full_bed() {
        let mut planner = connected_planner(10.0);
        let args = CommandArgs::parse("X0=100 Y0=100 X1=100 Y1=100").unwrap();
        planner.cmd_mesh_config(&args).unwrap();

        let mut calibrator = FakeCalibrator::default();
        let mut responder = FakeResponder::default();
        planner.cmd_pam(&mut calibrator, &mut responder).unwrap();

        assert_eq!(
            calibrator.invocations[0].as_str(),
            "BED_MESH_CALIBRATE PROFILE=ratos"
        );
        assert_eq!(
            responder.messages[0].as_str(),
            "PAM: no usable print area declared, probing the full bed"
        );
    }

    #[test]
    fn test_out_of_bed_declaration_rejected() {
        let mut planner = connected_planner(0.0);
        let good = CommandArgs::parse("X0=50 Y0=50 X1=150 Y1=150").unwrap();
        planner.cmd_mesh_config(&good).unwrap();

        let bad = CommandArgs::parse("X0=50 Y0=50 X1=400 Y1=150").unwrap();
        assert_eq!(
            planner.cmd_mesh_config(&bad),
            Err(CommandError::Param(ParamError::AboveMaximum("X1")))
        );
        // Previous declaration survives the rejection.
        assert_eq!(
            planner.declared_area(),
            Some(Rect::new(50.0, 50.0, 150.0, 150.0))
        );
    }

    #[test]
    fn test_direct_declare_out_of_bed() {
        let mut planner = connected_planner(0.0);
        assert_eq!(
            planner.declare_area(Rect::new(-5.0, 0.0, 100.0, 100.0)),
            Err(CommandError::OutOfBed(Axis::X))
        );
        assert_eq!(
            planner.declare_area(Rect::new(0.0, 0.0, 100.0, 301.0)),
            Err(CommandError::OutOfBed(Axis::Y))
        );
    }

    #[test]
    fn test_missing_parameter_rejected() {
        let mut planner = connected_planner(0.0);
        let args = CommandArgs::parse("X0=50 Y0=50 X1=150").unwrap();
        assert_eq!(
            planner.cmd_mesh_config(&args),
            Err(CommandError::Param(ParamError::Missing("Y1")))
        );
    }

    #[test]
    fn test_pam_is_idempotent() {
        let mut planner = connected_planner(10.0);
        let args = CommandArgs::parse("X0=50 Y0=50 X1=150 Y1=150").unwrap();
        planner.cmd_mesh_config(&args).unwrap();

        let mut calibrator = FakeCalibrator::default();
        let mut responder = FakeResponder::default();
        planner.cmd_pam(&mut calibrator, &mut responder).unwrap();
        planner.cmd_pam(&mut calibrator, &mut responder).unwrap();

        assert_eq!(calibrator.invocations.len(), 2);
        assert_eq!(calibrator.invocations[0], calibrator.invocations[1]);
    }

    #[test]
    fn test_connect_resets_declared_area() {
        let mut planner = connected_planner(0.0);
        let args = CommandArgs::parse("X0=50 Y0=50 X1=150 Y1=150").unwrap();
        planner.cmd_mesh_config(&args).unwrap();

        let kinematics = FakeKinematics {
            bed: Rect::new(0.0, 0.0, 250.0, 250.0),
        };
        let mesh = FakeMeshSettings {
            grid: MeshGrid {
                bounds: Rect::new(0.0, 0.0, 250.0, 250.0),
                x_count: 5,
                y_count: 5,
                algorithm: InterpolationAlgorithm::Lagrange,
            },
        };
        planner.handle_connect(&kinematics, &mesh).unwrap();
        assert_eq!(
            planner.declared_area(),
            Some(Rect::new(0.0, 0.0, 250.0, 250.0))
        );
    }

    #[test]
    fn test_empty_profile_omitted_from_request() {
        let mut planner = AreaMeshPlanner::new(PlannerConfig {
            profile: String::new(),
            ..PlannerConfig::default()
        });
        let kinematics = FakeKinematics {
            bed: Rect::new(0.0, 0.0, 300.0, 300.0),
        };
        let mesh = FakeMeshSettings {
            grid: MeshGrid {
                bounds: Rect::new(0.0, 0.0, 300.0, 300.0),
                x_count: 5,
                y_count: 5,
                algorithm: InterpolationAlgorithm::Lagrange,
            },
        };
        planner.handle_connect(&kinematics, &mesh).unwrap();

        let mut calibrator = FakeCalibrator::default();
        let mut responder = FakeResponder::default();
        planner.cmd_pam(&mut calibrator, &mut responder).unwrap();
        assert_eq!(
            calibrator.invocations[0].as_str(),
            "BED_MESH_CALIBRATE mesh_min=0,0 mesh_max=300,300 \
             probe_count=5,5 relative_reference_index=-1"
        );
    }
}
