//! # Communications interface crate.
//!
//! Provides the messages exchanged between the pursuit controller and the rest of the system.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Trajectory, pose, pixel scale and control messages
pub mod motion;

/// Visualisation markers published alongside the control command
pub mod marker;

/// Input events delivered to the controller
pub mod input;
