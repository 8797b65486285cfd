//! # Pure pursuit control module
//!
//! Pure pursuit control keeps the robot on the planned trajectory. On every cycle a circle of
//! radius equal to the lookahead distance is drawn around the robot, and the point at which it
//! crosses the trajectory (the lookahead point) becomes the target. The curvature of the arc
//! joining the robot to the lookahead point is then commanded.
//!
//! The trajectory, the robot's pose, and the camera's pixel scale are all held in the
//! `DataStore`, and may change between any two cycles. Positions are in the image (pixel) frame,
//! while the lookahead distance and the output command are in metric units. The pixel scale,
//! blended according to the robot's heading, converts between the two.
//!
//! Progress along the trajectory is tracked by a cursor, the index of the first segment which may
//! be searched for the lookahead point. The cursor only moves forwards, so the robot never turns
//! back towards parts of the trajectory it has already passed.
//!
//! If any of the inputs are missing, or if no lookahead point can be found (which is the case
//! once the robot reaches the end of the trajectory), a stop command is issued.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
pub mod curvature;
pub mod lookahead;
mod params;
mod state;
pub mod vis;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use params::*;
pub use state::*;
use util::params::LoadError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while setting up PursuitCtrl.
///
/// Cyclic processing never fails, missing inputs and geometric dead ends result in a stop
/// command instead.
#[derive(Debug, thiserror::Error)]
pub enum PursuitCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(LoadError),

    #[error("Invalid parameter `{0}`: {1}")]
    InvalidParam(&'static str, String),
}
