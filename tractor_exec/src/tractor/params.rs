//! Tractor parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the tractor
#[derive(Deserialize, Debug, Clone)]
pub struct Params {
    /// Initial position of the tractor in world coordinates
    pub init_position_m: [f64; 2],

    /// Initial speed of the tractor
    pub init_speed_ms: f64,

    /// Initial acceleration of the tractor, before any acceleration policy
    /// is applied.
    pub init_accel_mss: f64,

    /// Heading controller proportional gain
    pub k_p: f64,

    /// Heading controller derivative gain
    pub k_d: f64,

    /// Acceleration set by the constant acceleration policy
    pub const_accel_mss: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            init_position_m: [0.0, 0.0],
            init_speed_ms: 0.0,
            init_accel_mss: 0.0,
            k_p: 0.5,
            k_d: 0.1,
            const_accel_mss: 0.5,
        }
    }
}
