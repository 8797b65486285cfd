//! # Curvature and velocity calculation
//!
//! The classic pure pursuit result: the arc through the robot and the lookahead point, tangent to
//! the robot's heading, has curvature `2 * sin(alpha) / chord`, where `chord` is the straight line
//! distance to the lookahead point and `alpha` its bearing relative to the robot.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::f64::consts::FRAC_PI_2;

use comms_if::motion::{ImagePoint, ImagePose};
use util::maths::norm;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Bearing of the lookahead point relative to the robot, corrected for the image frame in which
/// a heading of `pi/2` points along the image y axis.
pub fn bearing_error(lookahead: &ImagePoint, pose: &ImagePose) -> f64 {
    (lookahead.y - pose.y).atan2(lookahead.x - pose.x) - FRAC_PI_2 + pose.theta
}

/// Calculate the curvature and velocity needed to reach the lookahead point.
///
/// Returns `(curvature, velocity)`, in 1/meters and meters/second:
///
/// - The velocity has magnitude `speed_ms`, and is negative (reversing) when the lookahead point
///   is behind the robot, i.e. `sin(alpha) < 0`.
/// - The curvature has magnitude `2 * |sin(alpha)| / chord` with the chord converted to meters,
///   and is negative when `cos(alpha) < 0`.
///
/// If the robot is already at the lookahead point, or the scale is zero, no arc can be computed
/// and `(0, 0)` is returned.
pub fn calc_curvature(
    lookahead: &ImagePoint,
    pose: &ImagePose,
    scale: f64,
    speed_ms: f64,
) -> (f64, f64) {
    let chord_px = match norm(&[lookahead.x, lookahead.y], &[pose.x, pose.y]) {
        Some(c) => c,
        None => return (0.0, 0.0),
    };

    if chord_px == 0.0 || scale == 0.0 {
        return (0.0, 0.0);
    }

    let alpha = bearing_error(lookahead, pose);
    let chord_m = chord_px / scale;

    let velocity = if alpha.sin() < 0.0 { -speed_ms } else { speed_ms };

    let curvature = 2.0 * alpha.sin().abs() / chord_m;

    if alpha.cos() >= 0.0 {
        (curvature, velocity)
    } else {
        (-curvature, velocity)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
