//! Executable parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use crate::{curve::ControlPoint, sim::SimParams, tractor};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for a full simulation run
#[derive(Deserialize, Debug, Clone)]
pub struct ExecParams {
    /// Control points of the trajectory as `[x, y]` pairs
    pub control_points: Vec<[f64; 2]>,

    pub tractor: tractor::Params,

    pub sim: SimParams,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ExecParams {
    /// The control points of the trajectory
    pub fn control_points(&self) -> Vec<ControlPoint> {
        self.control_points
            .iter()
            .map(|p| ControlPoint::new(p[0], p[1]))
            .collect()
    }
}
