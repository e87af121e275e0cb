//! # Tractor controllers module
//!
//! This module provides the PD controller used to correct the tractor's
//! direction, including the heading error calculation.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use util::maths::wrap_pi;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PD controller
#[derive(Debug, Serialize, Clone)]
pub struct PdController {
    /// Proportional gain
    k_p: f64,

    /// Dervative gain
    k_d: f64,

    /// Previous error
    prev_error: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PdController {
    /// Create a new controller with the given gains.
    pub fn new(k_p: f64, k_d: f64) -> Self {
        Self {
            k_p,
            k_d,
            prev_error: 0f64,
        }
    }

    /// Get the value of the controller for the given error.
    ///
    /// `dt` must be strictly positive, the caller is responsible for checking
    /// this.
    pub fn get(&mut self, error: f64, dt: f64) -> f64 {
        // The derivative is taken against the previous error, which starts at
        // zero.
        let deriv = (error - self.prev_error) / dt;

        self.prev_error = error;

        self.k_p * error + self.k_d * deriv
    }

    /// The error passed in on the last call to `get`.
    pub fn prev_error(&self) -> f64 {
        self.prev_error
    }

    /// Forget the previous error.
    pub fn reset(&mut self) {
        self.prev_error = 0f64;
    }
}

impl Default for PdController {
    fn default() -> Self {
        Self::new(0.5, 0.1)
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Calculate the heading error between the target heading and the current
/// heading.
///
/// The error is positive if the target is anticlockwise of the current heading
/// and is always in `(-pi, pi]`.
pub fn calc_head_error(target_heading_rad: f64, heading_rad: f64) -> f64 {
    wrap_pi(target_heading_rad - heading_rad)
}
