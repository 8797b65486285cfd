//! Demands produced by PursuitCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::motion::Control;
use serde::Serialize;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The demand computed on one control cycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Demand {
    /// Drive along an arc towards the lookahead point.
    Drive {
        /// Units: 1/meters
        curvature_m: f64,

        /// Units: meters/second
        velocity_ms: f64,
    },

    /// Bring the robot to a stop.
    Stop(StopCause),
}

/// The reason a stop was demanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StopCause {
    /// No trajectory has been received yet
    NoTrajectory,

    /// No pose has been received yet
    NoPose,

    /// No pixel scale has been received yet
    NoPixelScale,

    /// The lookahead circle doesn't cross the remaining trajectory, which is normally because the
    /// end of the trajectory has been reached.
    NoLookahead,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Demand {
    /// Convert the demand into the command sent to the robot. Stops become a command with zero
    /// curvature and zero velocity.
    pub fn to_control(&self) -> Control {
        match *self {
            Demand::Drive {
                curvature_m,
                velocity_ms,
            } => Control::new(curvature_m, velocity_ms),
            Demand::Stop(_) => Control::stop(),
        }
    }

    /// Get the cause of the stop, or `None` if this isn't a stop.
    pub fn stop_cause(&self) -> Option<StopCause> {
        match *self {
            Demand::Stop(cause) => Some(cause),
            Demand::Drive { .. } => None,
        }
    }
}
