//! # Input events
//!
//! The controller's inputs arrive independently of one another. Each event carries a complete
//! replacement for one of the three inputs.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::motion::{ImagePath, ImagePixelScale, ImagePose};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// An update to one of the controller's inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A new (or repeated) trajectory to follow
    Trajectory(ImagePath),

    /// The latest estimated pose of the robot
    Pose(ImagePose),

    /// Calibration derived pixel scale factors
    Scale(ImagePixelScale),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum InputParseError {
    #[error("Input event contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl InputEvent {
    /// Parse an event from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, InputParseError> {
        serde_json::from_str(json_str).map_err(InputParseError::InvalidJson)
    }

    /// Get a short name for the kind of event, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InputEvent::Trajectory(_) => "trajectory",
            InputEvent::Pose(_) => "pose",
            InputEvent::Scale(_) => "scale",
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
