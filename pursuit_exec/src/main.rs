//! Pure pursuit controller executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and PursuitCtrl
//!     - Start the input replay thread, which delivers trajectories, poses and pixel scales into
//!       the data store as they fall due in the input script
//!     - Main loop:
//!         - Pure pursuit processing
//!         - Publish the command, markers and status
//!         - Sleep until the next cycle
//!     - Once the script is exhausted publish a stop command and exit

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};
use structopt::StructOpt;

// Internal
use comms_if::motion::Control;
use pursuit_lib::{
    data_store::DataStore,
    publisher::Publisher,
    pursuit_ctrl::{PursuitCtrl, StopCause},
};
use util::{
    logger::{logger_init, LevelFilter},
    script_interpreter::{PendingEvents, ScriptInterpreter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Period at which the input replay thread checks for due events.
const REPLAY_PERIOD_S: f64 = 0.005;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(
    name = "pursuit_exec",
    about = "Pure pursuit path tracking controller, driven from an input script"
)]
struct Opt {
    /// Path to the input script
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Parameter file, relative to the parameters directory
    #[structopt(long, default_value = "pure_pursuit.toml")]
    params: String,

    /// Log at trace level, including every control cycle
    #[structopt(short, long)]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("pursuit_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    let level = if opt.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    logger_init(level, &session).wrap_err("Failed to initialise logging")?;

    info!("Pure Pursuit Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opt);

    // ---- INITIALISE MODULES ----

    let pursuit_ctrl = PursuitCtrl::init(&opt.params).wrap_err("Failed to initialise PursuitCtrl")?;
    let params = pursuit_ctrl.params().clone();
    info!(
        "PursuitCtrl init complete: period {} s, lookahead {} m, speed {} m/s",
        params.period_s, params.lookahead_m, params.speed_ms
    );
    info!("Pose channel reliability: {:?}", params.pose_reliability);

    let mut publisher = Publisher::new(&session).wrap_err("Failed to initialise the publisher")?;

    // ---- INITIALISE INPUTS ----

    info!("Loading script from {:?}", opt.script);

    let si = ScriptInterpreter::new(&opt.script).wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} events\n",
        si.get_duration(),
        si.get_num_events()
    );

    let ds = Arc::new(DataStore::new());
    let replay_done = Arc::new(AtomicBool::new(false));

    let replay_jh = {
        let ds = ds.clone();
        let done = replay_done.clone();
        thread::Builder::new()
            .name("input_replay".into())
            .spawn(move || replay_thread(si, ds, done))
            .wrap_err("Failed to start the input replay thread")?
    };

    // ---- MAIN LOOP ----

    info!("Beginning main loop\n");

    let cycle_period = Duration::from_secs_f64(params.period_s);
    let mut last_stop_cause: Option<Option<StopCause>> = None;
    let mut num_cycles: u64 = 0;

    while !replay_done.load(Ordering::Relaxed) {
        // Get cycle start time
        let cycle_start_instant = Instant::now();
        let time_s = session::get_elapsed_seconds();

        // ---- PURE PURSUIT PROCESSING ----

        let (output, report) = pursuit_ctrl.proc(&ds);

        if last_stop_cause != Some(report.stop_cause) {
            match report.stop_cause {
                Some(cause) => info!("Stopping: {:?}", cause),
                None => info!("Following trajectory"),
            }
            last_stop_cause = Some(report.stop_cause);
        }

        // ---- PUBLISH ----

        if let Err(e) = publisher.send_control(time_s, &output.control) {
            warn!("Could not publish the control command: {}", e);
        }

        if let Err(e) = publisher.send_markers(time_s, &output.markers) {
            warn!("Could not publish markers: {}", e);
        }

        if let Err(e) = publisher.send_status(time_s, &report) {
            warn!("Could not publish the status report: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
            ),
        }

        num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!("End of script reached after {} cycles", num_cycles);

    publisher
        .send_control(session::get_elapsed_seconds(), &Control::stop())
        .wrap_err("Failed to publish the final stop command")?;

    if replay_jh.join().is_err() {
        warn!("Input replay thread panicked");
    }

    info!("End of execution");

    Ok(())
}

/// Deliver scripted input events into the data store as they fall due.
fn replay_thread(mut si: ScriptInterpreter, ds: Arc<DataStore>, done: Arc<AtomicBool>) {
    let period = Duration::from_secs_f64(REPLAY_PERIOD_S);

    loop {
        match si.get_pending_events() {
            PendingEvents::Some(events) => {
                for event in events {
                    debug!("Delivering {} event", event.kind());
                    ds.apply(event);
                }
            }
            PendingEvents::None => (),
            PendingEvents::EndOfScript => break,
        }

        thread::sleep(period);
    }

    done.store(true, Ordering::Relaxed);
}
