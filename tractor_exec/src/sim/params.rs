//! Simulation parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use super::SimError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of a simulation run
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct SimParams {
    /// Time step of the simulation
    pub dt_s: f64,

    /// Duration of the simulation. The last step is taken at a time less than
    /// or equal to this value.
    pub total_time_s: f64,

    /// Radius of the safe zone around the tracked point. Outside of this
    /// radius the tractor's direction is corrected.
    pub safe_zone_threshold_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimParams {
    /// Check that the parameters describe a runnable simulation.
    ///
    /// The time step and total time must both be finite, otherwise the
    /// simulation would never end.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.dt_s > 0f64 && self.dt_s.is_finite()) {
            return Err(SimError::InvalidParameter("dt_s", self.dt_s));
        }
        if !(self.total_time_s >= 0f64 && self.total_time_s.is_finite()) {
            return Err(SimError::InvalidParameter("total_time_s", self.total_time_s));
        }
        if !(self.safe_zone_threshold_m > 0f64) {
            return Err(SimError::InvalidParameter(
                "safe_zone_threshold_m",
                self.safe_zone_threshold_m,
            ));
        }

        Ok(())
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            dt_s: 0.1,
            total_time_s: 3.0,
            safe_zone_threshold_m: 10.0,
        }
    }
}
