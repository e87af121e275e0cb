//! # Bezier curve
//!
//! The target path of the tractor is described by a single Bezier curve of
//! arbitrary degree. The curve is evaluated in the Bernstein basis:
//!
//! ```text
//! B(t) = sum_{i=0}^{n} C(n, i) (1 - t)^(n - i) t^i P_i
//! ```
//!
//! The parameter `t` is not range checked. Values outside of `[0, 1]` give the
//! polynomial extrapolation of the curve, which lies outside of the convex hull
//! of the control points.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::Serialize;

// Internal
use util::maths::binomial;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A control point of a curve, in world coordinates.
pub type ControlPoint = Vector2<f64>;

/// A Bezier curve defined by an ordered sequence of control points.
#[derive(Debug, Clone, Serialize)]
pub struct BezierCurve {
    control_points: Vec<ControlPoint>,

    /// Degree of the curve, always one less than the number of points
    degree: u32,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CurveError {
    /// A curve needs at least a start and an end point.
    #[error("A Bezier curve needs at least 2 control points, found {0}")]
    TooFewPoints(usize),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl BezierCurve {
    /// Build a new curve from the given control points.
    pub fn new(control_points: Vec<ControlPoint>) -> Result<Self, CurveError> {
        if control_points.len() < 2 {
            return Err(CurveError::TooFewPoints(control_points.len()));
        }

        let degree = (control_points.len() - 1) as u32;

        Ok(Self {
            control_points,
            degree,
        })
    }

    /// Build a new curve from `[x, y]` pairs.
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Result<Self, CurveError> {
        Self::new(pairs.iter().map(|p| Vector2::new(p[0], p[1])).collect())
    }

    /// The degree of the curve
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// The control points of the curve
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    /// Get the position on the curve at the parameter `t`.
    pub fn get_position(&self, t: f64) -> ControlPoint {
        let n = self.degree;

        self.control_points
            .iter()
            .enumerate()
            .fold(Vector2::zeros(), |sum, (i, point)| {
                let i = i as u32;
                let weight =
                    binomial(n, i) * (1f64 - t).powi((n - i) as i32) * t.powi(i as i32);

                sum + weight * *point
            })
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn test_curve() -> BezierCurve {
        BezierCurve::from_pairs(&[[0.0, 0.0], [2.0, 4.0], [4.0, 1.0], [6.0, 3.0]]).unwrap()
    }

    #[test]
    fn test_too_few_points() {
        assert!(matches!(
            BezierCurve::new(vec![]),
            Err(CurveError::TooFewPoints(0))
        ));
        assert!(matches!(
            BezierCurve::from_pairs(&[[1.0, 1.0]]),
            Err(CurveError::TooFewPoints(1))
        ));
    }

    #[test]
    fn test_degree() -> Result<(), CurveError> {
        assert_eq!(BezierCurve::from_pairs(&[[0.0, 0.0], [1.0, 1.0]])?.degree(), 1);
        assert_eq!(test_curve().degree(), 3);

        let points: Vec<[f64; 2]> = (0..8).map(|i| [i as f64, (i * i) as f64]).collect();
        assert_eq!(BezierCurve::from_pairs(&points)?.degree(), 7);

        Ok(())
    }

    #[test]
    fn test_endpoints() -> Result<(), CurveError> {
        let curves = vec![
            test_curve(),
            BezierCurve::from_pairs(&[
                [0.0, 0.0],
                [2.0, 5.0],
                [5.0, 7.0],
                [8.0, 5.0],
                [10.0, 0.0],
            ])?,
            BezierCurve::from_pairs(&[
                [0.0, 0.0],
                [10.0, 5.0],
                [15.0, 10.0],
                [35.0, 3.0],
                [7500.0, -5.0],
            ])?,
            BezierCurve::from_pairs(&[[-1.0, 2.0], [3.0, -4.0]])?,
        ];

        for curve in curves.iter() {
            let first = curve.control_points()[0];
            let last = curve.control_points()[curve.control_points().len() - 1];

            assert!((curve.get_position(0.0) - first).norm() < TOLERANCE);
            assert!((curve.get_position(1.0) - last).norm() < TOLERANCE);
        }

        Ok(())
    }

    #[test]
    fn test_high_degree_constant_curve() -> Result<(), CurveError> {
        // Weights of any degree sum to one, so a curve whose points are all
        // equal is that point everywhere.
        for &num_points in [171usize, 201].iter() {
            let curve = BezierCurve::from_pairs(&vec![[1.0, 1.0]; num_points])?;
            assert_eq!(curve.degree() as usize, num_points - 1);

            for &t in [0.0, 0.3, 0.5, 0.9, 1.0].iter() {
                let point = curve.get_position(t);
                assert!(
                    (point - Vector2::new(1.0, 1.0)).norm() < 1e-6,
                    "degree {} at t = {} gave {:?}",
                    curve.degree(),
                    t,
                    point
                );
            }
        }

        Ok(())
    }

    #[test]
    fn test_linear_midpoint() -> Result<(), CurveError> {
        let line = BezierCurve::from_pairs(&[[0.0, 0.0], [4.0, 2.0]])?;

        assert!((line.get_position(0.5) - Vector2::new(2.0, 1.0)).norm() < TOLERANCE);
        assert!((line.get_position(0.25) - Vector2::new(1.0, 0.5)).norm() < TOLERANCE);

        Ok(())
    }

    #[test]
    fn test_cubic_midpoint() {
        // B(0.5) = (P0 + 3 P1 + 3 P2 + P3) / 8
        let expected = Vector2::new((0.0 + 6.0 + 12.0 + 6.0) / 8.0, (0.0 + 12.0 + 3.0 + 3.0) / 8.0);

        assert!((test_curve().get_position(0.5) - expected).norm() < TOLERANCE);
    }

    #[test]
    fn test_convex_hull() {
        // The hull of the test curve's control points is the quadrilateral
        // (0,0) -> (4,1) -> (6,3) -> (2,4), listed anticlockwise.
        let hull = [
            Vector2::new(0.0, 0.0),
            Vector2::new(4.0, 1.0),
            Vector2::new(6.0, 3.0),
            Vector2::new(2.0, 4.0),
        ];
        let curve = test_curve();

        for i in 0..=100 {
            let point = curve.get_position(i as f64 / 100.0);

            for j in 0..hull.len() {
                let edge = hull[(j + 1) % hull.len()] - hull[j];
                let rel = point - hull[j];

                // Point must never be to the right of an anticlockwise edge
                let cross = edge.x * rel.y - edge.y * rel.x;
                assert!(cross >= -TOLERANCE, "t = {} outside hull", i);
            }
        }
    }

    #[test]
    fn test_extrapolation() {
        // Beyond t = 1 the curve keeps following the cubic polynomial
        let point = test_curve().get_position(2.0);

        // With t = 2 the weights are -1, 6, -12 and 8
        let expected = Vector2::new(6.0 * 2.0 - 12.0 * 4.0 + 8.0 * 6.0, 6.0 * 4.0 - 12.0 * 1.0 + 8.0 * 3.0);

        assert!((point - expected).norm() < TOLERANCE);
    }
}
