//! # Acceleration policies
//!
//! An acceleration policy sets the tractor's acceleration before the
//! simulation starts, from the first three points of the path.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::curve::ControlPoint;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A policy computing the initial acceleration of the tractor.
pub trait AccelPolicy {
    /// Get the acceleration for a path starting with the given three points.
    fn get_accel_mss(&self, p0: &ControlPoint, p1: &ControlPoint, p2: &ControlPoint) -> f64;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A policy which ignores the path and always gives the same acceleration.
#[derive(Debug, Clone, Copy)]
pub struct ConstantAccel {
    pub accel_mss: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ConstantAccel {
    pub fn new(accel_mss: f64) -> Self {
        Self { accel_mss }
    }
}

impl Default for ConstantAccel {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl AccelPolicy for ConstantAccel {
    fn get_accel_mss(&self, _p0: &ControlPoint, _p1: &ControlPoint, _p2: &ControlPoint) -> f64 {
        self.accel_mss
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_constant_accel() {
        let policy = ConstantAccel::default();
        let a = ControlPoint::new(0.0, 0.0);
        let b = ControlPoint::new(2.0, 4.0);
        let c = ControlPoint::new(4.0, 1.0);

        assert_eq!(policy.get_accel_mss(&a, &b, &c), 0.5);
        assert_eq!(policy.get_accel_mss(&c, &a, &b), 0.5);
        assert_eq!(ConstantAccel::new(-1.25).get_accel_mss(&a, &b, &c), -1.25);
    }
}
