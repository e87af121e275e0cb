//! # Tractor library.
//!
//! This library allows other crates in the workspace, and the benchmarks, to
//! access items defined inside the tractor crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Bezier curve - the path the tractor follows
pub mod curve;

/// Executable parameters - everything needed to set up a run
pub mod params;

/// Simulation - steps the tractor over time and records its state
pub mod sim;

/// Tractor - the vehicle state, motion and direction correction
pub mod tractor;
