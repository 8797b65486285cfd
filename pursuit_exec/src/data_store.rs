//! # Data Store
//!
//! Holds the latest inputs received by the controller, along with the progress made along the
//! current trajectory.
//!
//! The inputs arrive independently from other threads, so each is held behind its own lock. The
//! trajectory and the progress along it share a lock, so that replacing the trajectory and
//! updating the progress during a control cycle can never interleave.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::sync::{Mutex, MutexGuard, PoisonError};

use comms_if::{
    input::InputEvent,
    motion::{ImagePath, ImagePixelScale, ImagePoint, ImagePose},
};
use log::debug;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the controller.
#[derive(Default, Debug)]
pub struct DataStore {
    /// The trajectory being followed and the progress along it
    track: Mutex<Track>,

    /// Latest estimated pose of the robot
    pose: Mutex<Option<ImagePose>>,

    /// Latest pixel scale factors
    pixel_scale: Mutex<Option<ImagePixelScale>>,
}

/// A trajectory and the progress along it.
#[derive(Default, Debug, Clone)]
pub struct Track {
    pub trajectory: Option<ImagePath>,

    pub progress: Progress,
}

/// Progress made along the trajectory.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Index of the first segment that may be searched for the lookahead point.
    ///
    /// Never decreases while the trajectory is unchanged.
    pub cursor: usize,

    /// The last lookahead point found, used to detect when the robot has moved along the path.
    pub last_point: Option<ImagePoint>,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Create an empty store, with no inputs and no progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trajectory to follow.
    ///
    /// If the trajectory has the same identity as the current one nothing happens. Otherwise it
    /// replaces the current trajectory and the progress is reset. Returns `true` if the trajectory
    /// was replaced.
    pub fn set_trajectory(&self, path: ImagePath) -> bool {
        let mut track = lock(&self.track);

        if let Some(ref current) = track.trajectory {
            if current.id == path.id {
                return false;
            }
        }

        debug!(
            "New trajectory (id {}) with {} points, progress reset",
            path.id,
            path.points.len()
        );

        track.trajectory = Some(path);
        track.progress = Progress::default();

        true
    }

    /// Replace the robot's pose.
    pub fn set_pose(&self, pose: ImagePose) {
        *lock(&self.pose) = Some(pose);
    }

    /// Replace the pixel scale factors.
    pub fn set_pixel_scale(&self, scale: ImagePixelScale) {
        *lock(&self.pixel_scale) = Some(scale);
    }

    /// Apply an input event to the store.
    pub fn apply(&self, event: InputEvent) {
        match event {
            InputEvent::Trajectory(path) => {
                self.set_trajectory(path);
            }
            InputEvent::Pose(pose) => self.set_pose(pose),
            InputEvent::Scale(scale) => self.set_pixel_scale(scale),
        }
    }

    /// Get the latest pose, if one has been received.
    pub fn pose(&self) -> Option<ImagePose> {
        *lock(&self.pose)
    }

    /// Get the latest pixel scale, if one has been received.
    pub fn pixel_scale(&self) -> Option<ImagePixelScale> {
        *lock(&self.pixel_scale)
    }

    /// Get a copy of the current progress along the trajectory.
    pub fn progress(&self) -> Progress {
        lock(&self.track).progress
    }

    /// Get the identity of the current trajectory, if there is one.
    pub fn trajectory_id(&self) -> Option<u64> {
        lock(&self.track).trajectory.as_ref().map(|t| t.id)
    }

    /// Lock the trajectory and its progress.
    ///
    /// The lock should be held for as short a time as possible since it blocks delivery of new
    /// trajectories.
    pub fn lock_track(&self) -> MutexGuard<'_, Track> {
        lock(&self.track)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Lock a mutex, recovering the data if another thread panicked while holding it. All data in the
/// store is replaced whole, so it is never left half-written.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
