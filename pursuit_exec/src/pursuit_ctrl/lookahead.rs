//! # Lookahead search
//!
//! Finds the point at which the lookahead circle around the robot crosses the trajectory.
//!
//! Each segment is parametrised as `P(t) = start + t * (end - start)` for `t` in `[0, 1]`.
//! Substituting into the equation of the circle gives a quadratic in `t`, whose roots inside
//! `[0, 1]` are the crossing points. Of the two roots the smaller is preferred, which is the
//! crossing nearer the start of the segment.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;

use comms_if::motion::{ImagePath, ImagePoint, ImagePose};
use util::{
    convert::Convert,
    maths::{in_unit_interval, quadratic_roots},
};

use crate::data_store::Progress;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A lookahead point on the trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookahead {
    /// The lookahead point
    pub point: ImagePoint,

    /// Index of the segment the point lies on. Segment `i` joins points `i` and `i + 1`.
    pub segment: usize,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Radius of the lookahead circle in pixels.
pub fn lookahead_radius(lookahead_m: f64, scale: f64) -> f64 {
    lookahead_m / scale
}

/// Find the crossing of the circle of the given radius around the pose with the segment from
/// `start` to `end`.
///
/// Returns `None` if the circle doesn't cross the segment, or if the segment has zero length.
pub fn check_segment(
    start: &ImagePoint,
    end: &ImagePoint,
    pose: &ImagePose,
    radius: f64,
) -> Option<ImagePoint> {
    let start_v: Vector2<f64> = start.convert();
    let end_v: Vector2<f64> = end.convert();
    let centre_v: Vector2<f64> = pose.convert();

    let seg = end_v - start_v;
    let offset = start_v - centre_v;

    let (t1, t2) = quadratic_roots(
        seg.norm_squared(),
        2.0 * offset.dot(&seg),
        offset.norm_squared() - radius.powi(2),
    )?;

    let t = if in_unit_interval(t1) {
        t1
    } else if in_unit_interval(t2) {
        t2
    } else {
        return None;
    };

    Some((start_v + seg * t).convert())
}

/// Find the lookahead point on the trajectory, searching forwards from the progress cursor.
///
/// Segments before the cursor are never searched. The first segment (in traversal order) which
/// the circle crosses gives the lookahead point. If the point differs from the last lookahead
/// point the robot has moved along the trajectory, and the cursor advances by one segment.
///
/// `None` is returned if no remaining segment crosses the circle, in which case the progress is
/// left untouched.
pub fn find_lookahead(
    path: &ImagePath,
    progress: &mut Progress,
    pose: &ImagePose,
    radius: f64,
) -> Option<Lookahead> {
    for i in (progress.cursor + 1)..path.points.len() {
        let point = match check_segment(&path.points[i - 1], &path.points[i], pose, radius) {
            Some(p) => p,
            None => continue,
        };

        if let Some(last) = progress.last_point {
            if last != point {
                progress.cursor += 1;
            }
        }

        progress.last_point = Some(point);

        return Some(Lookahead {
            point,
            segment: i - 1,
        });
    }

    None
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn straight_path() -> ImagePath {
        ImagePath::new(
            1,
            vec![
                ImagePoint::new(0.0, 0.0),
                ImagePoint::new(10.0, 0.0),
                ImagePoint::new(20.0, 0.0),
            ],
        )
    }

    fn assert_point_near(point: ImagePoint, x: f64, y: f64) {
        assert!(
            (point.x - x).abs() < 1e-9 && (point.y - y).abs() < 1e-9,
            "Expected ({}, {}), found ({}, {})",
            x,
            y,
            point.x,
            point.y
        );
    }

    #[test]
    fn test_check_segment() {
        let pose = ImagePose::new(0.0, 0.0, 0.0);
        let start = ImagePoint::new(0.0, 0.0);
        let end = ImagePoint::new(10.0, 0.0);

        // Robot at the start of the segment, only the forward crossing lies on it
        assert_point_near(check_segment(&start, &end, &pose, 5.0).unwrap(), 5.0, 0.0);

        // Circle too small to reach a parallel segment
        let off_start = ImagePoint::new(0.0, 6.0);
        let off_end = ImagePoint::new(10.0, 6.0);
        assert!(check_segment(&off_start, &off_end, &pose, 5.0).is_none());

        // Zero length segment
        assert!(check_segment(&start, &start, &pose, 5.0).is_none());

        // Segment entirely inside the circle
        assert!(check_segment(&start, &end, &pose, 50.0).is_none());
    }

    #[test]
    fn test_check_segment_prefers_first_crossing() {
        // The segment passes through the circle, crossing it twice
        let pose = ImagePose::new(10.0, 0.0, 0.0);
        let start = ImagePoint::new(0.0, 0.0);
        let end = ImagePoint::new(20.0, 0.0);

        assert_point_near(check_segment(&start, &end, &pose, 5.0).unwrap(), 5.0, 0.0);

        // Same segment in reverse gives the crossing nearest the new start
        assert_point_near(check_segment(&end, &start, &pose, 5.0).unwrap(), 15.0, 0.0);
    }

    #[test]
    fn test_find_lookahead() {
        let path = straight_path();
        let mut progress = Progress::default();
        let pose = ImagePose::new(0.0, 0.0, 0.0);

        let la = find_lookahead(&path, &mut progress, &pose, 5.0).unwrap();

        assert_point_near(la.point, 5.0, 0.0);
        assert_eq!(la.segment, 0);
        assert_eq!(progress.cursor, 0);
        assert_eq!(progress.last_point, Some(la.point));
    }

    #[test]
    fn test_find_lookahead_past_end() {
        let path = straight_path();
        let mut progress = Progress::default();
        let pose = ImagePose::new(30.0, 0.0, 0.0);

        assert!(find_lookahead(&path, &mut progress, &pose, 5.0).is_none());
        assert_eq!(progress, Progress::default());
    }

    #[test]
    fn test_find_lookahead_degenerate_paths() {
        let pose = ImagePose::new(0.0, 0.0, 0.0);
        let mut progress = Progress::default();

        let empty = ImagePath::new(1, vec![]);
        assert!(find_lookahead(&empty, &mut progress, &pose, 5.0).is_none());

        let single = ImagePath::new(2, vec![ImagePoint::new(5.0, 0.0)]);
        assert!(find_lookahead(&single, &mut progress, &pose, 5.0).is_none());

        // Repeated points are skipped over
        let repeated = ImagePath::new(
            3,
            vec![
                ImagePoint::new(0.0, 0.0),
                ImagePoint::new(0.0, 0.0),
                ImagePoint::new(10.0, 0.0),
            ],
        );
        let la = find_lookahead(&repeated, &mut progress, &pose, 5.0).unwrap();
        assert_eq!(la.segment, 1);
        assert_point_near(la.point, 5.0, 0.0);
        assert_eq!(progress.cursor, 0);
    }

    #[test]
    fn test_stationary_robot_keeps_cursor() {
        let path = straight_path();
        let mut progress = Progress::default();
        let pose = ImagePose::new(2.0, 0.0, 0.0);

        let first = find_lookahead(&path, &mut progress, &pose, 5.0).unwrap();
        let second = find_lookahead(&path, &mut progress, &pose, 5.0).unwrap();

        assert_eq!(first, second);
        assert_point_near(first.point, 7.0, 0.0);
        assert_eq!(progress.cursor, 0);
    }

    #[test]
    fn test_moving_lookahead_advances_cursor() {
        let path = straight_path();
        let mut progress = Progress::default();

        find_lookahead(&path, &mut progress, &ImagePose::new(0.0, 0.0, 0.0), 5.0).unwrap();
        assert_eq!(progress.cursor, 0);

        // The lookahead point moves, so the cursor advances by one
        let la =
            find_lookahead(&path, &mut progress, &ImagePose::new(1.0, 0.0, 0.0), 5.0).unwrap();
        assert_eq!(la.segment, 0);
        assert_point_near(la.point, 6.0, 0.0);
        assert_eq!(progress.cursor, 1);

        // Segment 0 is no longer searched, even though the circle crosses it at (4, 0)
        let la =
            find_lookahead(&path, &mut progress, &ImagePose::new(9.0, 0.0, 0.0), 5.0).unwrap();
        assert_eq!(la.segment, 1);
        assert_point_near(la.point, 14.0, 0.0);
        assert_eq!(progress.cursor, 2);

        // Nothing is searched past the final segment
        assert!(
            find_lookahead(&path, &mut progress, &ImagePose::new(10.0, 0.0, 0.0), 5.0).is_none()
        );
        assert_eq!(progress.cursor, 2);
    }

    #[test]
    fn test_cursor_limits_search() {
        let path = straight_path();
        let pose = ImagePose::new(0.0, 0.0, 0.0);
        let mut progress = Progress {
            cursor: 1,
            last_point: None,
        };

        // The circle only crosses segment 0, which is behind the cursor
        assert!(find_lookahead(&path, &mut progress, &pose, 5.0).is_none());
        assert_eq!(progress.cursor, 1);
    }

    #[test]
    fn test_never_returns_segment_before_cursor() {
        let path = ImagePath::new(
            1,
            (0..20).map(|i| ImagePoint::new(i as f64, (i % 3) as f64)).collect(),
        );

        for cursor in 0..20 {
            for x in 0..20 {
                let mut progress = Progress {
                    cursor,
                    last_point: None,
                };
                let pose = ImagePose::new(x as f64 + 0.5, 1.0, 0.0);

                if let Some(la) = find_lookahead(&path, &mut progress, &pose, 2.0) {
                    assert!(la.segment >= cursor);
                }
            }
        }
    }
}
