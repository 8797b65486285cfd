//! # Visualisation markers
//!
//! Markers are advisory only. They allow an external viewer to draw the lookahead point and turn
//! radius on top of the camera image.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::motion::ImagePoint;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A marker drawn in the image frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMarker {
    /// Namespace of the marker. Markers in the same namespace replace each other.
    pub ns: String,

    pub kind: MarkerKind,

    pub action: MarkerAction,

    /// Centre of the marker
    pub position: ImagePoint,

    /// Size of the marker, for circles this is the radius.
    pub scale: f64,

    pub filled: bool,

    pub outline_color: ColorRgba,

    pub fill_color: ColorRgba,
}

/// An RGBA colour with components in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    Circle,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerAction {
    Add,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ColorRgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl ImageMarker {
    /// Create a new unfilled circle marker.
    pub fn circle(ns: &str, position: ImagePoint, radius: f64, color: ColorRgba) -> Self {
        Self {
            ns: ns.to_string(),
            kind: MarkerKind::Circle,
            action: MarkerAction::Add,
            position,
            scale: radius,
            filled: false,
            outline_color: color,
            fill_color: ColorRgba::default(),
        }
    }

    /// Fill the marker with its outline colour.
    pub fn filled(mut self) -> Self {
        self.filled = true;
        self.fill_color = self.outline_color;
        self
    }
}
