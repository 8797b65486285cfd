//! # Input script interpreter module
//!
//! This module provides an interpreter for input scripts, which replay timestamped input events
//! (trajectories, poses and pixel scales) into the controller.
//!
//! A script is made up of entries of the form
//!
//! ```text
//! <time_s>: <event json>;
//! ```
//!
//! where `time_s` is the number of seconds since the start of the session at which the event
//! should be delivered. The event JSON may span multiple lines.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::input::{InputEvent, InputParseError};
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An event which is scripted to occur at a specific time.
#[derive(Debug)]
struct ScriptedEvent {
    /// The time the event is supposed to be delivered at
    exec_time_s: f64,

    event: InputEvent
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use `.get_pending_events` to
/// acquire a list of events that need delivering.
#[derive(Debug)]
pub struct ScriptInterpreter {
    _script_path: Option<PathBuf>,
    events: VecDeque<ScriptedEvent>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid event at {0} s: {1}")]
    InvalidEvent(f64, InputParseError)
}

#[derive(Debug)]
pub enum PendingEvents {
    None,
    Some(Vec<InputEvent>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        let path = PathBuf::from(script_path.as_ref());

        if !path.exists() {
            return Err(
                ScriptError::ScriptNotFound(path.display().to_string()));
        }

        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_script_str(&script)?;
        si._script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script_str(script: &str) -> Result<Self, ScriptError> {

        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("Script regex is invalid");

        let mut events: Vec<ScriptedEvent> = vec![];

        for cap in re.captures_iter(script) {
            let exec_time_s: f64 = cap[1].parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            let event = InputEvent::from_json(&cap[3])
                .map_err(|e| ScriptError::InvalidEvent(exec_time_s, e))?;

            events.push(ScriptedEvent {
                exec_time_s,
                event
            });
        }

        if events.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        // Deliver in time order, keeping the script order for events at the same time. A
        // trajectory and pose scripted at the same instant must arrive in the order written.
        events.sort_by(|a, b| a.exec_time_s
            .partial_cmp(&b.exec_time_s)
            .unwrap_or(std::cmp::Ordering::Equal));

        Ok(ScriptInterpreter {
            _script_path: None,
            events: events.into()
        })
    }

    /// Return the events which are due at the current session time.
    pub fn get_pending_events(&mut self) -> PendingEvents {
        self.get_pending_at(get_elapsed_seconds())
    }

    /// Return the events which are due at or before the given time since the session start.
    pub fn get_pending_at(&mut self, current_time_s: f64) -> PendingEvents {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.events.is_empty() {
            return PendingEvents::EndOfScript
        }

        let mut event_vec: Vec<InputEvent> = vec![];

        while let Some(head) = self.events.front() {
            if head.exec_time_s > current_time_s {
                break;
            }

            if let Some(e) = self.events.pop_front() {
                event_vec.push(e.event);
            }
        }

        if event_vec.len() > 0 {
            PendingEvents::Some(event_vec)
        }
        else {
            PendingEvents::None
        }
    }

    /// Get the number of events remaining in the script
    pub fn get_num_events(&self) -> usize {
        self.events.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.events.back() {
            Some(e) => e.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::motion::{ImagePixelScale, ImagePose};

    const SCRIPT: &str = r#"
        # Scale first, then the pose
        0.5: {"Pose": {"x": 1.0, "y": 2.0, "theta": 0.0}};
        0.0: {"Scale": {"scale_x": 1.0, "scale_y": 1.0}};
        1.0: {"Trajectory": {
            "id": 1,
            "points": [{"x": 0.0, "y": 0.0}, {"x": 10.0, "y": 0.0}]
        }};
    "#;

    #[test]
    fn test_pending_events() {
        let mut si = ScriptInterpreter::from_script_str(SCRIPT).unwrap();

        assert_eq!(si.get_num_events(), 3);
        assert_eq!(si.get_duration(), 1.0);

        match si.get_pending_at(0.0) {
            PendingEvents::Some(events) => assert_eq!(
                events,
                vec![InputEvent::Scale(ImagePixelScale::new(1.0, 1.0))]
            ),
            p => panic!("Expected one pending event, got {:?}", p)
        }

        assert!(matches!(si.get_pending_at(0.25), PendingEvents::None));

        match si.get_pending_at(2.0) {
            PendingEvents::Some(events) => {
                assert_eq!(events.len(), 2);
                assert_eq!(events[0], InputEvent::Pose(ImagePose::new(1.0, 2.0, 0.0)));
                assert_eq!(events[1].kind(), "trajectory");
            },
            p => panic!("Expected two pending events, got {:?}", p)
        }

        assert!(matches!(si.get_pending_at(3.0), PendingEvents::EndOfScript));
    }

    #[test]
    fn test_empty_script() {
        assert!(matches!(
            ScriptInterpreter::from_script_str("# nothing here"),
            Err(ScriptError::ScriptEmpty)
        ));
    }

    #[test]
    fn test_invalid_event() {
        assert!(matches!(
            ScriptInterpreter::from_script_str("1.5: {\"Speed\": 2.0};"),
            Err(ScriptError::InvalidEvent(t, _)) if t == 1.5
        ));
    }

    #[test]
    fn test_missing_script() {
        assert!(matches!(
            ScriptInterpreter::new("/definitely/not/a/script.pps"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
