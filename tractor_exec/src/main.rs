//! # Tractor simulation executable
//!
//! Runs a single tractor along a Bezier curve and outputs the time series of
//! its state.
//!
//! # Architecture
//!
//! The execution consists of:
//!
//!     - Session and logging initialisation
//!     - Parameter loading
//!     - Tractor setup (trajectory and initial acceleration)
//!     - Simulation
//!     - Output:
//!         - Table of the time series on stdout
//!         - Time series archive (`arch/sim_records.csv`)
//!         - Run summary (`sim_summary.json`)
//!
//! # Usage
//!
//! The `TRACTOR_SIM_ROOT` environment variable must point at the directory
//! containing `params` and `sessions`. An optional single argument gives the
//! parameter file name relative to `params`, by default `tractor_sim.toml`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use log::{debug, info};
use std::env;

// Internal
use tractor_lib::{
    params::ExecParams,
    sim::{self, table, SimSummary},
    tractor::{ConstantAccel, Tractor},
};
use util::{
    archive::Archiver,
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Parameter file used if none is given on the command line
const DEFAULT_PARAMS_FILE: &str = "tractor_sim.toml";

// ---------------------------------------------------------------------------
// MAIN
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("tractor_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Tractor Simulation\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let params_file = match args.len() {
        1 => DEFAULT_PARAMS_FILE,
        2 => args[1].as_str(),
        _ => return Err(eyre!("Expected at most one argument, the parameter file name")),
    };

    let params: ExecParams = util::params::load(params_file)
        .wrap_err_with(|| format!("Could not load parameters from {}", params_file))?;

    info!("Parameters loaded from \"{}\"", params_file);

    // ---- TRACTOR SETUP ----

    let control_points = params.control_points();

    let mut tractor = Tractor::new(&params.tractor);
    tractor
        .set_trajectory(&control_points)
        .wrap_err("Failed to set the tractor's trajectory")?;

    info!(
        "Trajectory set: degree {} curve through {} control points",
        control_points.len() - 1,
        control_points.len()
    );

    // The acceleration policy takes the first three path points, a straight
    // line curve only has two so its end point is reused.
    let p2 = control_points.get(2).unwrap_or(&control_points[1]);
    tractor.set_acceleration(
        &ConstantAccel::new(params.tractor.const_accel_mss),
        &control_points[0],
        &control_points[1],
        p2,
    );

    info!("Initial acceleration: {} m/s^2", tractor.state().accel_mss);

    // ---- SIMULATION ----

    let series = sim::simulate(&mut tractor, params.sim).wrap_err("Simulation failed")?;

    // ---- OUTPUT ----

    table::print(&series);

    let mut archiver = Archiver::from_path(&session, "sim_records.csv")
        .wrap_err("Failed to create the time series archive")?;
    archiver
        .serialise_all(&series)
        .wrap_err("Failed to archive the time series")?;
    info!(
        "{} records archived to {:?}",
        archiver.num_records(),
        archiver.path()
    );

    let summary_path = session
        .save_json("sim_summary.json", &SimSummary::new(&params.sim, &series, &tractor))
        .wrap_err("Failed to save the simulation summary")?;
    info!("Summary saved to {:?}", summary_path);

    Ok(())
}
