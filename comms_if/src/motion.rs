//! # Motion messages
//!
//! All positions are in the image (pixel) frame. The pixel scale converts between pixels and the
//! metric units used by the control command.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A point in the image frame.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagePoint {
    /// Units: pixels
    pub x: f64,

    /// Units: pixels
    pub y: f64,
}

/// A planned trajectory, traversed in the order of its points.
///
/// The `id` is the identity of the trajectory. Receiving a path with the same `id` as the current
/// one is a repeat delivery of the same trajectory, whatever its content. A new `id` is a new
/// trajectory, even if the points are identical.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagePath {
    pub id: u64,

    pub points: Vec<ImagePoint>,
}

/// The estimated pose of the robot in the image frame.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagePose {
    /// Units: pixels
    pub x: f64,

    /// Units: pixels
    pub y: f64,

    /// Heading of the robot.
    ///
    /// A heading of `+pi/2` corresponds to forward motion along the image y axis.
    ///
    /// Units: radians
    pub theta: f64,
}

/// Per-axis pixel to metric conversion factors, produced by camera calibration.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagePixelScale {
    pub scale_x: f64,

    pub scale_y: f64,
}

/// A control command for the robot.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Control {
    /// Signed steering curvature.
    ///
    /// Units: 1/meters
    pub curvature: f64,

    /// Signed forward velocity. Negative velocities drive the robot backwards.
    ///
    /// Units: meters/second
    pub velocity: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ImagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl ImagePath {
    /// Create a new trajectory with the given identity.
    pub fn new(id: u64, points: Vec<ImagePoint>) -> Self {
        Self { id, points }
    }

    /// Number of segments in the path, i.e. one fewer than the number of points.
    pub fn num_segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

impl ImagePose {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// The position part of the pose.
    pub fn position(&self) -> ImagePoint {
        ImagePoint::new(self.x, self.y)
    }
}

impl ImagePixelScale {
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x, scale_y }
    }

    /// Blend the per-axis factors into a single isotropic scale for a robot with the given
    /// heading, `cos^2(theta) * scale_x + sin^2(theta) * scale_y`.
    pub fn at_heading(&self, theta: f64) -> f64 {
        theta.cos().powi(2) * self.scale_x + theta.sin().powi(2) * self.scale_y
    }
}

impl Control {
    pub fn new(curvature: f64, velocity: f64) -> Self {
        Self { curvature, velocity }
    }

    /// The stop command, zero curvature and zero velocity.
    pub fn stop() -> Self {
        Self::default()
    }

    /// Returns true if this is the stop command.
    pub fn is_stop(&self) -> bool {
        self.curvature == 0.0 && self.velocity == 0.0
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
