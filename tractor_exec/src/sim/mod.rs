//! # Simulation module
//!
//! Runs a tractor along its trajectory with a fixed time step. Each step:
//!
//!  1. Moves the tractor towards its tracked point.
//!  2. Checks the safe zone, correcting the direction if the tractor is
//!     outside of it.
//!  3. Records the time and the tractor's state.
//!
//! Stepping continues while the simulation time is less than or equal to the
//! total time, so both `t = 0` and `t = total_time` are stepped and a 3 s
//! simulation with a 0.1 s step takes 31 steps. The time of step `k` is
//! `k * dt` rather than a running sum, and the end boundary is compared with a
//! small tolerance so that rounding in `k * dt` never drops the final step.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod params;
pub mod table;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use serde::Serialize;

// Internal
use crate::tractor::{Tractor, TractorError, TractorState};
pub use params::SimParams;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Tolerance on the end time, as a fraction of the time step
const END_TIME_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The recorded output of a single simulation step.
///
/// `time_s` is the simulation time at the start of the step, all other fields
/// are the tractor's state at the end of the step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimRecord {
    pub time_s: f64,
    pub x_m: f64,
    pub y_m: f64,
    pub speed_ms: f64,
    pub heading_rad: f64,
    pub accel_mss: f64,
}

/// Monitoring quantities of a single step, not part of the recorded output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepReport {
    /// Distance from the tractor to the tracked point after moving
    pub dist_to_target_m: f64,

    /// True if the tractor was inside the safe zone after moving
    pub inside_safe_zone: bool,

    /// The heading error used for the correction, if one was applied
    pub head_error_rad: Option<f64>,
}

/// A running simulation.
///
/// The simulation is an iterator over the records of each step, so the time
/// series can be consumed lazily. Use `simulate` to run it to completion.
pub struct Simulation<'a> {
    tractor: &'a mut Tractor,

    params: SimParams,

    /// Index of the next step to take
    step_index: u64,

    /// Number of steps in which a correction was applied
    num_corrections: usize,

    /// Report of the last step taken
    last_report: Option<StepReport>,

    /// Set once the simulation has ended, either normally or on an error
    finished: bool,
}

/// The full output of a simulation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimeSeries {
    records: Vec<SimRecord>,

    /// Number of steps in which a correction was applied
    pub num_corrections: usize,
}

/// Summary of a simulation run, saved alongside the archive.
#[derive(Debug, Clone, Serialize)]
pub struct SimSummary {
    pub params: SimParamsSummary,
    pub num_steps: usize,
    pub num_corrections: usize,
    pub final_state: Option<TractorState>,
}

/// Serialisable copy of the parameters used in a run
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SimParamsSummary {
    pub dt_s: f64,
    pub total_time_s: f64,
    pub safe_zone_threshold_m: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur during a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Invalid simulation parameter {0}: {1}")]
    InvalidParameter(&'static str, f64),

    /// The tractor has no trajectory so no steps are taken.
    #[error("The tractor has no trajectory set")]
    NoTrajectory,

    #[error("Error driving the tractor: {0}")]
    TractorError(#[from] TractorError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<'a> Simulation<'a> {
    /// Start a new simulation of the given tractor.
    ///
    /// The tractor must have a trajectory set.
    pub fn new(tractor: &'a mut Tractor, params: SimParams) -> Result<Self, SimError> {
        params.validate()?;

        if tractor.trajectory().is_none() {
            warn!("No trajectory set on the tractor, the simulation will not run");
            return Err(SimError::NoTrajectory);
        }

        Ok(Self {
            tractor,
            params,
            step_index: 0,
            num_corrections: 0,
            last_report: None,
            finished: false,
        })
    }

    /// Number of steps so far in which a correction was applied
    pub fn num_corrections(&self) -> usize {
        self.num_corrections
    }

    /// Report of the last step taken
    pub fn last_report(&self) -> Option<&StepReport> {
        self.last_report.as_ref()
    }

    /// The tractor being simulated
    pub fn tractor(&self) -> &Tractor {
        &*self.tractor
    }

    /// Simulation time of the next step
    pub fn time_s(&self) -> f64 {
        self.step_index as f64 * self.params.dt_s
    }

    /// True if all steps up to the total time have been taken
    pub fn is_finished(&self) -> bool {
        self.finished
            || self.time_s() > self.params.total_time_s + END_TIME_TOLERANCE * self.params.dt_s
    }

    /// Take a single step of the simulation.
    fn step(&mut self) -> Result<SimRecord, SimError> {
        let dt = self.params.dt_s;
        let time_s = self.time_s();

        self.tractor.step(dt);

        let mut report = StepReport {
            dist_to_target_m: self.tractor.get_dist_to_target().unwrap_or(std::f64::NAN),
            inside_safe_zone: self
                .tractor
                .is_inside_safe_zone(self.params.safe_zone_threshold_m),
            head_error_rad: None,
        };

        if !report.inside_safe_zone {
            report.head_error_rad = self.tractor.correct_direction(dt)?;
            self.num_corrections += 1;

            debug!(
                "t = {:.2} s: outside safe zone ({:.3} m), heading error {:?} rad, new accel {:.4}",
                time_s,
                report.dist_to_target_m,
                report.head_error_rad,
                self.tractor.state().accel_mss
            );
        }

        let state = self.tractor.state();
        let record = SimRecord {
            time_s,
            x_m: state.position_m[0],
            y_m: state.position_m[1],
            speed_ms: state.speed_ms,
            heading_rad: state.heading_rad,
            accel_mss: state.accel_mss,
        };

        trace!("{:?}", record);

        self.last_report = Some(report);
        self.step_index += 1;

        Ok(record)
    }
}

impl<'a> Iterator for Simulation<'a> {
    type Item = Result<SimRecord, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished() {
            self.finished = true;
            return None;
        }

        let res = self.step();

        if res.is_err() {
            self.finished = true;
        }

        Some(res)
    }
}

impl TimeSeries {
    /// The recorded steps, in order
    pub fn records(&self) -> &[SimRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&SimRecord> {
        self.records.last()
    }
}

impl IntoIterator for TimeSeries {
    type Item = SimRecord;
    type IntoIter = std::vec::IntoIter<SimRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a SimRecord;
    type IntoIter = std::slice::Iter<'a, SimRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl SimSummary {
    /// Summarise a finished run.
    pub fn new(params: &SimParams, series: &TimeSeries, tractor: &Tractor) -> Self {
        Self {
            params: SimParamsSummary {
                dt_s: params.dt_s,
                total_time_s: params.total_time_s,
                safe_zone_threshold_m: params.safe_zone_threshold_m,
            },
            num_steps: series.len(),
            num_corrections: series.num_corrections,
            final_state: if series.is_empty() {
                None
            } else {
                Some(*tractor.state())
            },
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Run the simulation of the tractor to completion, returning the recorded
/// time series.
pub fn simulate(tractor: &mut Tractor, params: SimParams) -> Result<TimeSeries, SimError> {
    let mut sim = Simulation::new(tractor, params)?;

    info!(
        "Simulating {:.2} s with a {:.3} s time step",
        params.total_time_s, params.dt_s
    );

    let mut records = Vec::new();
    for record in &mut sim {
        records.push(record?);
    }

    info!(
        "Simulation complete: {} steps, {} corrections",
        records.len(),
        sim.num_corrections()
    );

    Ok(TimeSeries {
        records,
        num_corrections: sim.num_corrections(),
    })
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
