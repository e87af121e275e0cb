//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::{Float, FloatConst};

/// Return the euclidian norm (distance between) of two points.
///
/// If the points do not have the same number of dimentions then `None` is
/// returned.
pub fn norm<T>(point_0: &[T], point_1: &[T]) -> Option<T>
where
    T: Float + std::ops::AddAssign,
{
    // Check that the dimentions match
    if point_0.len() != point_1.len() {
        return None;
    }

    let mut sum = T::zero();

    for (a, b) in point_0.iter().zip(point_1.iter()) {
        sum += (*a - *b).powi(2);
    }

    Some(sum.sqrt())
}

/// Binomial coefficient `C(n, k)`.
///
/// The coefficient is built up as a running product rather than as a ratio of
/// factorials, which overflow `f64` from `n = 171`. Returns zero if `k > n`.
pub fn binomial(n: u32, k: u32) -> f64 {
    if k > n {
        return 0f64;
    }

    let k = k.min(n - k);

    (1..=k).fold(1f64, |c, i| c * (n - k + i) as f64 / i as f64)
}

/// Wrap an angle into the range `(-pi, pi]`.
///
/// Only a single wrap of `2pi` is applied, so the input is expected to be
/// within `(-3pi, 3pi]`, which is always the case for the difference of two
/// angles returned by `atan2`. Values already inside the range are returned
/// untouched.
pub fn wrap_pi<T>(angle: T) -> T
where
    T: Float + FloatConst,
{
    let tau = T::PI() + T::PI();

    if angle > T::PI() {
        angle - tau
    } else if angle <= -T::PI() {
        angle + tau
    } else {
        angle
    }
}
