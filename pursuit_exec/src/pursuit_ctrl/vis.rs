//! # Visualisation markers
//!
//! Markers are for monitoring only and have no effect on the command. Geometry which can't be
//! drawn (infinite or NaN positions or sizes) produces no marker rather than an error.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::f64::consts::FRAC_PI_2;

use comms_if::{
    marker::{ColorRgba, ImageMarker},
    motion::{ImagePoint, ImagePose},
};

use super::VisParams;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Namespace of the lookahead point marker
pub const NS_LOOKAHEAD: &str = "0";

/// Namespace of the lookahead circle marker
pub const NS_LOOKAHEAD_CIRCLE: &str = "1";

/// Namespace of the turn radius marker
pub const NS_TURN_RADIUS: &str = "2";

const LOOKAHEAD_COLOR: ColorRgba = ColorRgba::new(0.0, 0.0, 1.0, 1.0);
const LOOKAHEAD_CIRCLE_COLOR: ColorRgba = ColorRgba::new(0.0, 0.5, 0.5, 1.0);
const TURN_RADIUS_COLOR: ColorRgba = ColorRgba::new(0.0, 1.0, 0.0, 1.0);

/// Turn radius drawn for straight line motion, in meters
const STRAIGHT_TURN_RADIUS_M: f64 = 100.0;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Build all enabled markers for a cycle which produced a lookahead point.
pub fn build_markers(
    params: &VisParams,
    lookahead: &ImagePoint,
    pose: &ImagePose,
    curvature: f64,
    scale: f64,
    lookahead_radius: f64,
) -> Vec<ImageMarker> {
    if !params.enabled {
        return Vec::new();
    }

    let mut markers = Vec::with_capacity(3);

    if params.lookahead_circle {
        markers.extend(lookahead_circle_marker(pose, lookahead_radius));
    }

    markers.extend(lookahead_marker(lookahead, scale));
    markers.extend(turn_radius_marker(curvature, pose, scale));

    markers
}

/// A filled circle on the lookahead point.
pub fn lookahead_marker(lookahead: &ImagePoint, scale: f64) -> Option<ImageMarker> {
    let position = ImagePoint::new(lookahead.x * scale, lookahead.y * scale);
    let radius = 0.1 * scale;

    if !is_drawable(&position, radius) {
        return None;
    }

    Some(ImageMarker::circle(NS_LOOKAHEAD, position, radius, LOOKAHEAD_COLOR).filled())
}

/// An outline of the lookahead circle around the robot.
pub fn lookahead_circle_marker(pose: &ImagePose, radius: f64) -> Option<ImageMarker> {
    let position = pose.position();

    if !is_drawable(&position, radius) {
        return None;
    }

    Some(ImageMarker::circle(
        NS_LOOKAHEAD_CIRCLE,
        position,
        radius,
        LOOKAHEAD_CIRCLE_COLOR,
    ))
}

/// The circle the robot will drive around for the given curvature.
///
/// The centre of the circle is perpendicular to the robot's heading, on the side the robot is
/// turning towards. For zero curvature a large circle is drawn instead of an infinite one.
pub fn turn_radius_marker(curvature: f64, pose: &ImagePose, scale: f64) -> Option<ImageMarker> {
    let radius = if curvature != 0.0 && scale != 0.0 {
        1.0 / (curvature * scale)
    } else {
        STRAIGHT_TURN_RADIUS_M / scale
    };

    let angle = pose.theta + FRAC_PI_2;
    let position = ImagePoint::new(
        pose.x + radius * angle.cos(),
        pose.y + radius * angle.sin(),
    );

    if !is_drawable(&position, radius) {
        return None;
    }

    Some(ImageMarker::circle(
        NS_TURN_RADIUS,
        position,
        radius.abs(),
        TURN_RADIUS_COLOR,
    ))
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn is_drawable(position: &ImagePoint, size: f64) -> bool {
    position.x.is_finite() && position.y.is_finite() && size.is_finite()
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lookahead_marker() {
        let m = lookahead_marker(&ImagePoint::new(5.0, 2.0), 2.0).unwrap();

        assert_eq!(m.ns, NS_LOOKAHEAD);
        assert_eq!(m.position, ImagePoint::new(10.0, 4.0));
        assert!((m.scale - 0.2).abs() < 1e-12);
        assert!(m.filled);
        assert_eq!(m.fill_color, LOOKAHEAD_COLOR);
    }

    #[test]
    fn test_turn_radius_sides() {
        let pose = ImagePose::new(10.0, 10.0, 0.0);

        // Positive curvature, centre on the +pi/2 side
        let left = turn_radius_marker(0.5, &pose, 1.0).unwrap();
        assert!((left.position.x - 10.0).abs() < 1e-9);
        assert!((left.position.y - 12.0).abs() < 1e-9);
        assert!((left.scale - 2.0).abs() < 1e-9);

        // Negative curvature, centre on the -pi/2 side
        let right = turn_radius_marker(-0.5, &pose, 1.0).unwrap();
        assert!((right.position.x - 10.0).abs() < 1e-9);
        assert!((right.position.y - 8.0).abs() < 1e-9);
        assert!((right.scale - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_turn_radius_straight() {
        let pose = ImagePose::new(0.0, 0.0, 0.0);

        let m = turn_radius_marker(0.0, &pose, 2.0).unwrap();
        assert!((m.scale - 50.0).abs() < 1e-9);
        assert!((m.position.y - 50.0).abs() < 1e-9);

        // No scale means no sensible radius
        assert!(turn_radius_marker(0.0, &pose, 0.0).is_none());
    }

    #[test]
    fn test_build_markers() {
        let pose = ImagePose::new(0.0, 0.0, 0.0);
        let la = ImagePoint::new(5.0, 0.0);

        let mut params = VisParams::default();
        let markers = build_markers(&params, &la, &pose, 0.4, 1.0, 5.0);
        let ns: Vec<&str> = markers.iter().map(|m| m.ns.as_str()).collect();
        assert_eq!(ns, vec![NS_LOOKAHEAD, NS_TURN_RADIUS]);

        params.lookahead_circle = true;
        let markers = build_markers(&params, &la, &pose, 0.4, 1.0, 5.0);
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].ns, NS_LOOKAHEAD_CIRCLE);
        assert_eq!(markers[0].scale, 5.0);

        params.enabled = false;
        assert!(build_markers(&params, &la, &pose, 0.4, 1.0, 5.0).is_empty());
    }
}
