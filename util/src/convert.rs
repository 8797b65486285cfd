//! Implements `Convert` functions between message types and `nalgebra` types.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Vector2;

use comms_if::motion::{ImagePoint, ImagePose};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

pub trait Convert<O> {
    fn convert(&self) -> O;
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Convert<Vector2<f64>> for ImagePoint {
    fn convert(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl Convert<ImagePoint> for Vector2<f64> {
    fn convert(&self) -> ImagePoint {
        ImagePoint::new(self[0], self[1])
    }
}

/// Only the position of the pose is converted.
impl Convert<Vector2<f64>> for ImagePose {
    fn convert(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}
