//! Tractor state and motion

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use nalgebra::Vector2;
use serde::Serialize;

// Internal
use super::*;
use crate::curve::{BezierCurve, ControlPoint, CurveError};
use util::maths::{norm, wrap_pi};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Kinematic state of the tractor.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct TractorState {
    /// Position in world coordinates
    pub position_m: Vector2<f64>,

    /// Scalar speed. This is also the curve parameter of the tracked point.
    pub speed_ms: f64,

    /// Heading (angle to the +ve x axis), in `(-pi, pi]`
    pub heading_rad: f64,

    /// Scalar acceleration
    pub accel_mss: f64,
}

/// A tractor following a Bezier curve.
#[derive(Debug, Clone)]
pub struct Tractor {
    state: TractorState,

    /// The curve to follow. Until it is set the tractor does not move.
    trajectory: Option<BezierCurve>,

    /// Controller used to correct the direction of the tractor
    controller: PdController,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur while driving the tractor.
#[derive(Debug, thiserror::Error)]
pub enum TractorError {
    #[error("Invalid trajectory: {0}")]
    InvalidTrajectory(#[from] CurveError),

    /// The time step is used as a divisor and must be positive.
    #[error("The time step must be greater than zero, found {0}")]
    InvalidTimeStep(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tractor {
    /// Create a new tractor from the parameters, with no trajectory set.
    pub fn new(params: &Params) -> Self {
        Self {
            state: TractorState {
                position_m: Vector2::new(params.init_position_m[0], params.init_position_m[1]),
                speed_ms: params.init_speed_ms,
                heading_rad: 0f64,
                accel_mss: params.init_accel_mss,
            },
            trajectory: None,
            controller: PdController::new(params.k_p, params.k_d),
        }
    }

    /// Current kinematic state
    pub fn state(&self) -> &TractorState {
        &self.state
    }

    /// The trajectory being followed, if one has been set
    pub fn trajectory(&self) -> Option<&BezierCurve> {
        self.trajectory.as_ref()
    }

    /// The heading controller
    pub fn controller(&self) -> &PdController {
        &self.controller
    }

    /// Set the trajectory to follow as the Bezier curve through the given
    /// control points.
    pub fn set_trajectory(&mut self, control_points: &[ControlPoint]) -> Result<(), TractorError> {
        self.trajectory = Some(BezierCurve::new(control_points.to_vec())?);

        Ok(())
    }

    /// Set the acceleration using the given policy and the first three points
    /// of the path.
    pub fn set_acceleration<A>(
        &mut self,
        policy: &A,
        p0: &ControlPoint,
        p1: &ControlPoint,
        p2: &ControlPoint,
    ) where
        A: AccelPolicy + ?Sized,
    {
        self.state.accel_mss = policy.get_accel_mss(p0, p1, p2);
    }

    /// Advance the tractor by `dt` along its trajectory.
    ///
    /// The heading is pointed at the tracked point before integrating, and the
    /// position is integrated with the updated speed. Does nothing if no
    /// trajectory is set.
    pub fn step(&mut self, dt: f64) {
        let target_m = match self.get_target() {
            Some(t) => t,
            None => return,
        };

        self.state.heading_rad = self.heading_to(&target_m);

        self.state.speed_ms += self.state.accel_mss * dt;

        let speed_ms = self.state.speed_ms;
        let heading_rad = self.state.heading_rad;
        self.state.position_m += Vector2::new(
            speed_ms * heading_rad.cos() * dt,
            speed_ms * heading_rad.sin() * dt,
        );

        trace!(
            "Stepped to ({:.4}, {:.4}), v = {:.4}, heading = {:.4}",
            self.state.position_m[0],
            self.state.position_m[1],
            self.state.speed_ms,
            self.state.heading_rad
        );
    }

    /// Get the distance between the tractor and the tracked point, or `None`
    /// if no trajectory is set.
    pub fn get_dist_to_target(&self) -> Option<f64> {
        let target_m = self.get_target()?;

        norm(self.state.position_m.as_slice(), target_m.as_slice())
    }

    /// Check whether the tractor is within `threshold_m` of the tracked point.
    ///
    /// Always false if no trajectory is set.
    pub fn is_inside_safe_zone(&self, threshold_m: f64) -> bool {
        match self.get_dist_to_target() {
            Some(d) => d <= threshold_m,
            None => false,
        }
    }

    /// Recompute the acceleration from the heading error to the tracked point.
    ///
    /// Neither the heading nor the position are changed. Returns the heading
    /// error which was passed to the controller, or `None` if no trajectory is
    /// set.
    pub fn correct_direction(&mut self, dt: f64) -> Result<Option<f64>, TractorError> {
        let target_m = match self.get_target() {
            Some(t) => t,
            None => return Ok(None),
        };

        if !(dt > 0f64) {
            return Err(TractorError::InvalidTimeStep(dt));
        }

        let head_err_rad = calc_head_error(self.heading_to(&target_m), self.state.heading_rad);

        self.state.accel_mss = self.controller.get(head_err_rad, dt);

        Ok(Some(head_err_rad))
    }

    /// Get the tracked point, the point on the trajectory at the parameter
    /// equal to the current speed.
    fn get_target(&self) -> Option<ControlPoint> {
        self.trajectory
            .as_ref()
            .map(|c| c.get_position(self.state.speed_ms))
    }

    /// Heading from the tractor's position to the given point.
    fn heading_to(&self, point_m: &ControlPoint) -> f64 {
        let diff = point_m - self.state.position_m;

        wrap_pi(diff[1].atan2(diff[0]))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::PI;

    fn path() -> Vec<ControlPoint> {
        vec![
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(2.0, 4.0),
            ControlPoint::new(4.0, 1.0),
            ControlPoint::new(6.0, 3.0),
        ]
    }

    fn tractor_on_path() -> Tractor {
        let mut tractor = Tractor::new(&Params::default());
        tractor.set_trajectory(&path()).unwrap();
        tractor
    }

    #[test]
    fn test_no_trajectory_is_noop() -> Result<(), TractorError> {
        let mut tractor = Tractor::new(&Params::default());
        tractor.set_acceleration(&ConstantAccel::default(), &path()[0], &path()[1], &path()[2]);
        let before = *tractor.state();

        tractor.step(0.1);
        assert_eq!(*tractor.state(), before);

        assert_eq!(tractor.is_inside_safe_zone(10.0), false);
        assert_eq!(tractor.get_dist_to_target(), None);

        assert_eq!(tractor.correct_direction(0.1)?, None);
        assert_eq!(*tractor.state(), before);
        assert_eq!(tractor.controller().prev_error(), 0.0);

        Ok(())
    }

    #[test]
    fn test_invalid_trajectory() {
        let mut tractor = Tractor::new(&Params::default());

        assert!(matches!(
            tractor.set_trajectory(&path()[..1]),
            Err(TractorError::InvalidTrajectory(CurveError::TooFewPoints(1)))
        ));
        assert!(tractor.trajectory().is_none());
    }

    #[test]
    fn test_set_acceleration() {
        let mut tractor = tractor_on_path();
        assert_eq!(tractor.state().accel_mss, 0.0);

        let points = path();
        tractor.set_acceleration(&ConstantAccel::default(), &points[0], &points[1], &points[2]);
        assert_eq!(tractor.state().accel_mss, 0.5);

        let policy: Box<dyn AccelPolicy> = Box::new(ConstantAccel::new(0.2));
        tractor.set_acceleration(policy.as_ref(), &points[0], &points[1], &points[2]);
        assert_eq!(tractor.state().accel_mss, 0.2);
    }

    #[test]
    fn test_first_step() {
        let mut tractor = tractor_on_path();
        let points = path();
        tractor.set_acceleration(&ConstantAccel::default(), &points[0], &points[1], &points[2]);

        tractor.step(0.1);

        // Curve at t = 0 is the start point, which is where the tractor is, so
        // the heading is atan2(0, 0).
        let heading = 0f64.atan2(0f64);
        let state = tractor.state();
        assert_eq!(state.heading_rad, heading);
        assert_eq!(state.speed_ms, 0.5 * 0.1);
        assert_eq!(state.position_m[0], 0.05 * heading.cos() * 0.1);
        assert_eq!(state.position_m[1], 0.05 * heading.sin() * 0.1);
    }

    #[test]
    fn test_step_heads_to_target() {
        let mut tractor = Tractor::new(&Params {
            init_position_m: [1.0, -1.0],
            init_speed_ms: 0.0,
            init_accel_mss: 1.0,
            ..Default::default()
        });
        tractor.set_trajectory(&path()).unwrap();

        tractor.step(0.5);

        // Target was the start point at (0, 0)
        let heading = 1f64.atan2(-1f64);
        let state = tractor.state();
        assert_eq!(state.heading_rad, heading);
        assert!((state.heading_rad - 3.0 * PI / 4.0).abs() < 1e-12);
        assert_eq!(state.speed_ms, 0.5);
        let offset = 0.25 * 0.5f64.sqrt();
        assert!((state.position_m - Vector2::new(1.0 - offset, -1.0 + offset)).norm() < 1e-12);
    }

    #[test]
    fn test_speed_is_not_limited() {
        let mut tractor = Tractor::new(&Params {
            init_accel_mss: 5.0,
            ..Default::default()
        });
        tractor.set_trajectory(&path()).unwrap();

        for _ in 0..10 {
            tractor.step(0.1);
        }

        // Speed grows past the end of the curve parameter range
        assert!((tractor.state().speed_ms - 5.0).abs() < 1e-12);
        assert!(tractor.get_dist_to_target().unwrap().is_finite());
    }

    #[test]
    fn test_safe_zone() {
        let mut tractor = Tractor::new(&Params {
            init_position_m: [3.0, 4.0],
            ..Default::default()
        });
        tractor.set_trajectory(&path()).unwrap();

        // Tracked point is the start point, 5 m away
        assert_eq!(tractor.get_dist_to_target(), Some(5.0));
        assert!(tractor.is_inside_safe_zone(5.0));
        assert!(tractor.is_inside_safe_zone(10.0));
        assert!(!tractor.is_inside_safe_zone(4.99));
    }

    #[test]
    fn test_correct_direction() -> Result<(), TractorError> {
        let mut tractor = Tractor::new(&Params {
            init_position_m: [-1.0, 0.0],
            ..Default::default()
        });
        tractor.set_trajectory(&path()).unwrap();

        // Heading is 0 and the tracked point (0, 0) is straight ahead
        let err = tractor.correct_direction(0.1)?;
        assert_eq!(err, Some(0.0));
        assert_eq!(tractor.state().accel_mss, 0.0);

        // Turn the tractor to face backwards, the error is then pi
        tractor.state.heading_rad = PI;
        let before = *tractor.state();
        let err = tractor.correct_direction(0.1)?;
        assert_eq!(err, Some(PI));
        assert_eq!(tractor.controller().prev_error(), PI);
        assert!((tractor.state().accel_mss - (0.5 * PI + 0.1 * PI / 0.1)).abs() < 1e-9);

        // Position and heading untouched
        assert_eq!(tractor.state().position_m, before.position_m);
        assert_eq!(tractor.state().heading_rad, before.heading_rad);

        Ok(())
    }

    #[test]
    fn test_head_error_range() -> Result<(), TractorError> {
        // Sweep the tractor around the start point with different headings,
        // the error seen by the controller must always be in (-pi, pi].
        let mut tractor = tractor_on_path();

        for i in 0..36 {
            let angle = i as f64 * PI / 18.0;
            tractor.state.position_m = Vector2::new(angle.cos(), angle.sin());

            for j in 0..36 {
                tractor.state.heading_rad = wrap_pi(j as f64 * PI / 18.0);
                let err = tractor.correct_direction(0.1)?.unwrap();

                assert!(err > -PI && err <= PI);
                assert_eq!(tractor.controller().prev_error(), err);
            }
        }

        Ok(())
    }

    #[test]
    fn test_correct_direction_invalid_dt() {
        let mut tractor = tractor_on_path();

        assert!(matches!(
            tractor.correct_direction(0.0),
            Err(TractorError::InvalidTimeStep(_))
        ));
        assert!(matches!(
            tractor.correct_direction(-0.1),
            Err(TractorError::InvalidTimeStep(_))
        ));
        assert_eq!(tractor.state().accel_mss, 0.0);
    }
}
