//! Implementations for the PursuitCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;

// Internal
use super::{
    curvature::{bearing_error, calc_curvature},
    lookahead::{find_lookahead, lookahead_radius},
    vis, Demand, Params, PursuitCtrlError, StopCause,
};
use crate::data_store::DataStore;
use comms_if::{
    marker::ImageMarker,
    motion::{Control, ImagePoint},
};
use util::params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Pure pursuit control module state
#[derive(Debug, Default)]
pub struct PursuitCtrl {
    pub(crate) params: Params,
}

/// Output of one control cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputData {
    /// The demand computed on this cycle
    pub demand: Demand,

    /// The demand as a command to be sent to the robot
    pub control: Control,

    /// Visualisation markers, empty on a stop or if visualisation is disabled
    pub markers: Vec<ImageMarker>,
}

/// Status report for PursuitCtrl processing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusReport {
    /// Reason for stopping, if this cycle was a stop
    pub stop_cause: Option<StopCause>,

    /// The blended pixel scale for the robot's heading
    pub scale: Option<f64>,

    /// The lookahead point found on this cycle
    pub lookahead: Option<ImagePoint>,

    /// The progress cursor after this cycle
    pub cursor: usize,

    /// Bearing of the lookahead point relative to the robot
    ///
    /// Units: radians
    pub alpha: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PursuitCtrl {
    /// Initialise the PursuitCtrl module.
    ///
    /// Expected init data is the path to the parameter file, relative to the parameters
    /// directory.
    pub fn init(params_file: &str) -> Result<Self, PursuitCtrlError> {
        let params: Params = params::load(params_file).map_err(PursuitCtrlError::ParamLoadError)?;

        Self::new(params)
    }

    /// Create the module from already loaded parameters.
    pub fn new(params: Params) -> Result<Self, PursuitCtrlError> {
        params.validate()?;

        Ok(Self { params })
    }

    /// Get the parameters the module is running with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Perform one control cycle.
    ///
    /// The latest inputs are taken from the data store, and the progress along the trajectory
    /// is updated in it. Processing never fails: if any input is missing, or no lookahead point
    /// can be found, a stop is demanded.
    pub fn proc(&self, data_store: &DataStore) -> (OutputData, StatusReport) {
        let mut report = StatusReport::default();

        // Snapshot the independent inputs before taking the trajectory lock, there's no need to
        // hold them together.
        let pose = data_store.pose();
        let pixel_scale = data_store.pixel_scale();

        let mut guard = data_store.lock_track();
        let track = &mut *guard;
        report.cursor = track.progress.cursor;

        let path = match track.trajectory {
            Some(ref p) => p,
            None => return Self::stop(StopCause::NoTrajectory, report),
        };
        let pose = match pose {
            Some(p) => p,
            None => return Self::stop(StopCause::NoPose, report),
        };
        let pixel_scale = match pixel_scale {
            Some(s) => s,
            None => return Self::stop(StopCause::NoPixelScale, report),
        };

        let scale = pixel_scale.at_heading(pose.theta);
        let radius = lookahead_radius(self.params.lookahead_m, scale);
        report.scale = Some(scale);

        let lookahead = match find_lookahead(path, &mut track.progress, &pose, radius) {
            Some(l) => l,
            None => return Self::stop(StopCause::NoLookahead, report),
        };
        report.cursor = track.progress.cursor;

        // Progress is updated, the rest of the cycle doesn't need the trajectory
        drop(guard);

        trace!(
            "Lookahead point ({:.3}, {:.3}) on segment {}, cursor {}",
            lookahead.point.x,
            lookahead.point.y,
            lookahead.segment,
            report.cursor
        );

        let (curvature_m, velocity_ms) =
            calc_curvature(&lookahead.point, &pose, scale, self.params.speed_ms);
        report.lookahead = Some(lookahead.point);
        report.alpha = Some(bearing_error(&lookahead.point, &pose));

        trace!(
            "Demand curvature {:.4} 1/m, velocity {:.3} m/s",
            curvature_m,
            velocity_ms
        );

        let demand = Demand::Drive {
            curvature_m,
            velocity_ms,
        };

        let markers = vis::build_markers(
            &self.params.vis,
            &lookahead.point,
            &pose,
            curvature_m,
            scale,
            radius,
        );

        (
            OutputData {
                demand,
                control: demand.to_control(),
                markers,
            },
            report,
        )
    }

    fn stop(cause: StopCause, mut report: StatusReport) -> (OutputData, StatusReport) {
        trace!("Stop demanded: {:?}", cause);

        report.stop_cause = Some(cause);

        let demand = Demand::Stop(cause);

        (
            OutputData {
                demand,
                control: demand.to_control(),
                markers: Vec::new(),
            },
            report,
        )
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::data_store::Progress;
    use comms_if::motion::{ImagePath, ImagePixelScale, ImagePose};
    use std::f64::consts::FRAC_PI_2;

    fn straight_path(id: u64) -> ImagePath {
        ImagePath::new(
            id,
            vec![
                ImagePoint::new(0.0, 0.0),
                ImagePoint::new(10.0, 0.0),
                ImagePoint::new(20.0, 0.0),
            ],
        )
    }

    /// Controller with a 5 m lookahead, which is 5 px at unit scale
    fn ctrl() -> PursuitCtrl {
        let mut params = Params::default();
        params.lookahead_m = 5.0;
        PursuitCtrl::new(params).unwrap()
    }

    fn ready_store(pose: ImagePose) -> DataStore {
        let ds = DataStore::new();
        ds.set_trajectory(straight_path(1));
        ds.set_pose(pose);
        ds.set_pixel_scale(ImagePixelScale::new(1.0, 1.0));
        ds
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut params = Params::default();
        params.period_s = 0.0;
        assert!(PursuitCtrl::new(params).is_err());
    }

    #[test]
    fn test_missing_inputs_stop() {
        let ctrl = ctrl();
        let ds = DataStore::new();

        let (out, report) = ctrl.proc(&ds);
        assert_eq!(out.demand, Demand::Stop(StopCause::NoTrajectory));
        assert_eq!(out.control, Control::new(0.0, 0.0));
        assert!(out.markers.is_empty());
        assert_eq!(report.stop_cause, Some(StopCause::NoTrajectory));

        ds.set_trajectory(straight_path(1));
        let (out, _) = ctrl.proc(&ds);
        assert_eq!(out.demand, Demand::Stop(StopCause::NoPose));
        assert!(out.control.is_stop());

        ds.set_pose(ImagePose::new(0.0, 0.0, FRAC_PI_2));
        let (out, _) = ctrl.proc(&ds);
        assert_eq!(out.demand, Demand::Stop(StopCause::NoPixelScale));
        assert!(out.control.is_stop());

        // Missing inputs don't touch the progress
        assert_eq!(ds.progress(), Progress::default());
    }

    #[test]
    fn test_straight_line() {
        let ctrl = ctrl();
        let ds = ready_store(ImagePose::new(0.0, 0.0, FRAC_PI_2));

        let (out, report) = ctrl.proc(&ds);

        assert_eq!(
            out.demand,
            Demand::Drive {
                curvature_m: 0.0,
                velocity_ms: 0.5
            }
        );
        assert_eq!(out.control, Control::new(0.0, 0.5));
        assert_eq!(report.stop_cause, None);
        assert_eq!(report.cursor, 0);
        assert_eq!(report.alpha, Some(0.0));

        let la = report.lookahead.unwrap();
        assert!((la.x - 5.0).abs() < 1e-9 && la.y.abs() < 1e-9);
        assert!((report.scale.unwrap() - 1.0).abs() < 1e-12);

        // Lookahead point and turn radius markers by default
        assert_eq!(out.markers.len(), 2);
        assert_eq!(out.markers[0].ns, vis::NS_LOOKAHEAD);
        assert_eq!(out.markers[1].ns, vis::NS_TURN_RADIUS);
    }

    #[test]
    fn test_past_end_stops() {
        let ctrl = ctrl();
        let ds = ready_store(ImagePose::new(30.0, 0.0, FRAC_PI_2));

        let (out, report) = ctrl.proc(&ds);

        assert_eq!(out.demand, Demand::Stop(StopCause::NoLookahead));
        assert!(out.control.is_stop());
        assert!(out.markers.is_empty());
        assert_eq!(report.scale, Some(1.0));
        assert_eq!(report.lookahead, None);
    }

    #[test]
    fn test_zero_scale_stops() {
        let ctrl = ctrl();
        let ds = ready_store(ImagePose::new(0.0, 0.0, FRAC_PI_2));
        ds.set_pixel_scale(ImagePixelScale::new(0.0, 0.0));

        let (out, _) = ctrl.proc(&ds);
        assert!(out.control.is_stop());
        assert!(out.control.curvature.is_finite());
    }

    #[test]
    fn test_stationary_is_idempotent() {
        let ctrl = ctrl();
        let ds = ready_store(ImagePose::new(2.0, 0.0, FRAC_PI_2));

        let (out_0, report_0) = ctrl.proc(&ds);
        let progress_0 = ds.progress();
        let (out_1, report_1) = ctrl.proc(&ds);

        assert_eq!(out_0, out_1);
        assert_eq!(report_0, report_1);
        assert_eq!(ds.progress(), progress_0);
        assert_eq!(ds.progress().cursor, 0);
    }

    #[test]
    fn test_progress_and_reset() {
        let ctrl = ctrl();
        let ds = ready_store(ImagePose::new(0.0, 0.0, FRAC_PI_2));

        ctrl.proc(&ds);
        ds.set_pose(ImagePose::new(1.0, 0.0, FRAC_PI_2));
        let (_, report) = ctrl.proc(&ds);
        assert_eq!(report.cursor, 1);

        // Repeat delivery of the same trajectory keeps the progress
        ds.set_trajectory(straight_path(1));
        assert_eq!(ds.progress().cursor, 1);

        // A new trajectory resets it
        ds.set_trajectory(straight_path(2));
        assert_eq!(ds.progress(), Progress::default());

        ds.set_pose(ImagePose::new(0.0, 0.0, FRAC_PI_2));
        let (out, report) = ctrl.proc(&ds);
        assert_eq!(report.cursor, 0);
        assert_eq!(out.control, Control::new(0.0, 0.5));
    }

    #[test]
    fn test_vis_disabled() {
        let mut params = Params::default();
        params.lookahead_m = 5.0;
        params.vis.enabled = false;
        let ctrl = PursuitCtrl::new(params).unwrap();
        let ds = ready_store(ImagePose::new(0.0, 0.0, FRAC_PI_2));

        let (out, _) = ctrl.proc(&ds);
        assert!(!out.control.is_stop());
        assert!(out.markers.is_empty());
    }
}
