//! # Tractor module
//!
//! The tractor is a point vehicle which follows a Bezier curve. On each step
//! the tractor points itself at the curve point it is currently tracking and
//! integrates its speed and position forward in time.
//!
//! The curve parameter of the tracked point is the tractor's own speed. As the
//! speed grows past 1 the tracked point moves beyond the end of the curve and
//! the curve is extrapolated.
//!
//! A safe zone of fixed radius surrounds the tracked point. When the tractor
//! leaves the safe zone a PD controller on the heading error to the tracked
//! point recomputes the tractor's acceleration.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod accel;
pub mod controllers;
pub mod params;
pub mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use accel::*;
pub use controllers::*;
pub use params::Params;
pub use state::*;
