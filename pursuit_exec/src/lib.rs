//! # Pure pursuit library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the pursuit crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Data store - holds the latest inputs and the progress along the trajectory
pub mod data_store;

/// Pure pursuit control module - computes curvature and velocity commands to follow a trajectory
pub mod pursuit_ctrl;

/// Publisher - hands commands and markers to the outside world
pub mod publisher;
