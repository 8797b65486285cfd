//! Pure pursuit control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

use super::PursuitCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for pure pursuit control.
///
/// Any parameter missing from the file takes its default value.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Params {
    /// Period of the control cycle.
    ///
    /// Units: seconds
    pub period_s: f64,

    /// Radius of the lookahead circle.
    ///
    /// Units: meters
    pub lookahead_m: f64,

    /// Magnitude of the commanded velocity. The sign is chosen by the controller.
    ///
    /// Units: meters/second
    pub speed_ms: f64,

    /// Reliability of the pose channel. Not interpreted by the controller, it is passed on to the
    /// transport which delivers poses.
    pub pose_reliability: Reliability,

    /// Visualisation parameters
    pub vis: VisParams,
}

/// Parameters controlling which markers are produced.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct VisParams {
    /// If false no markers are produced at all
    pub enabled: bool,

    /// Draw the lookahead circle around the robot
    pub lookahead_circle: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Delivery reliability of an input channel.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    /// Whatever the transport does by default
    SystemDefault,

    /// Every message is delivered, retrying if necessary
    Reliable,

    /// Messages may be dropped, only the latest matters
    BestEffort,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            period_s: 0.02,
            lookahead_m: 0.2,
            speed_ms: 0.5,
            pose_reliability: Reliability::SystemDefault,
            vis: VisParams::default(),
        }
    }
}

impl Default for VisParams {
    fn default() -> Self {
        Self {
            enabled: true,
            lookahead_circle: false,
        }
    }
}

impl Params {
    /// Check that the parameters can be used by the controller.
    pub fn validate(&self) -> Result<(), PursuitCtrlError> {
        if !(self.period_s > 0.0 && self.period_s.is_finite()) {
            return Err(PursuitCtrlError::InvalidParam(
                "period_s",
                format!("must be positive, found {}", self.period_s),
            ));
        }

        if !(self.lookahead_m > 0.0 && self.lookahead_m.is_finite()) {
            return Err(PursuitCtrlError::InvalidParam(
                "lookahead_m",
                format!("must be positive, found {}", self.lookahead_m),
            ));
        }

        if !self.speed_ms.is_finite() {
            return Err(PursuitCtrlError::InvalidParam(
                "speed_ms",
                format!("must be finite, found {}", self.speed_ms),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
