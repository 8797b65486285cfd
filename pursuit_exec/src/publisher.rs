//! # Publisher
//!
//! Hands the controller's outputs to the outside world. Each channel is a CSV archive in the
//! session's archive directory, one row per published item, stamped with the session time.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use crate::pursuit_ctrl::{StatusReport, StopCause};
use comms_if::{
    marker::{ImageMarker, MarkerAction, MarkerKind},
    motion::Control,
};
use util::{
    archive::{ArchiveError, Archiver},
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Writes commands, markers, and status reports to their channels.
pub struct Publisher {
    arch_control: Archiver,
    arch_markers: Archiver,
    arch_status: Archiver,
}

#[derive(Serialize)]
struct ControlRecord {
    time_s: f64,
    curvature: f64,
    velocity: f64,
}

#[derive(Serialize)]
struct MarkerRecord<'a> {
    time_s: f64,
    ns: &'a str,
    kind: MarkerKind,
    action: MarkerAction,
    x: f64,
    y: f64,
    scale: f64,
    filled: bool,
    outline_r: f32,
    outline_g: f32,
    outline_b: f32,
    outline_a: f32,
    fill_r: f32,
    fill_g: f32,
    fill_b: f32,
    fill_a: f32,
}

#[derive(Serialize)]
struct StatusRecord {
    time_s: f64,
    stop_cause: Option<StopCause>,
    scale: Option<f64>,
    lookahead_x: Option<f64>,
    lookahead_y: Option<f64>,
    cursor: usize,
    alpha_rad: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Publisher {
    /// Create the publisher, opening the archives in the session.
    pub fn new(session: &Session) -> Result<Self, ArchiveError> {
        Ok(Self {
            arch_control: Archiver::from_path(session, "control.csv")?,
            arch_markers: Archiver::from_path(session, "markers.csv")?,
            arch_status: Archiver::from_path(session, "status.csv")?,
        })
    }

    /// Publish the command for this cycle.
    pub fn send_control(&mut self, time_s: f64, control: &Control) -> Result<(), ArchiveError> {
        self.arch_control.serialise(ControlRecord {
            time_s,
            curvature: control.curvature,
            velocity: control.velocity,
        })
    }

    /// Publish this cycle's markers. Stops at the first marker that fails to publish.
    pub fn send_markers(
        &mut self,
        time_s: f64,
        markers: &[ImageMarker],
    ) -> Result<(), ArchiveError> {
        for m in markers {
            self.arch_markers.serialise(MarkerRecord {
                time_s,
                ns: &m.ns,
                kind: m.kind,
                action: m.action,
                x: m.position.x,
                y: m.position.y,
                scale: m.scale,
                filled: m.filled,
                outline_r: m.outline_color.r,
                outline_g: m.outline_color.g,
                outline_b: m.outline_color.b,
                outline_a: m.outline_color.a,
                fill_r: m.fill_color.r,
                fill_g: m.fill_color.g,
                fill_b: m.fill_color.b,
                fill_a: m.fill_color.a,
            })?;
        }

        Ok(())
    }

    /// Publish the status report for this cycle.
    pub fn send_status(&mut self, time_s: f64, report: &StatusReport) -> Result<(), ArchiveError> {
        self.arch_status.serialise(StatusRecord {
            time_s,
            stop_cause: report.stop_cause,
            scale: report.scale,
            lookahead_x: report.lookahead.map(|p| p.x),
            lookahead_y: report.lookahead.map(|p| p.y),
            cursor: report.cursor,
            alpha_rad: report.alpha,
        })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
