//! Point-mass bodies for the gravity simulation

use crate::error::BodyError;
use crate::outcome::StepOutcome;
use crate::world::PhysicsConfig;
use orrery_math::Vec3;
use slotmap::new_key_type;

// Define generational key type for bodies
new_key_type! {
    /// Key to a body in the physics world
    ///
    /// Uses generational indexing so a key to a removed body never resolves
    /// to whatever body later reuses its slot.
    pub struct BodyKey;
}

/// A point mass with position, velocity and the force acting on it this step
///
/// The body carries no rendering data. Presentation code reads
/// [`position`](Body::position) after each frame.
#[derive(Clone, Debug)]
pub struct Body {
    /// Position in world space
    position: Vec3,
    /// Velocity in world units per second
    velocity: Vec3,
    /// Force computed for the current step only; overwritten, never summed
    force: Vec3,
    /// Mass, positive and fixed at construction
    mass: f64,
    /// Driver timestamp of the last frame this body moved on (None until the first frame)
    last_update_time: Option<f64>,
    /// Advance calls made while not frozen
    step_count: u64,
    /// Step ceiling and unit scales
    config: PhysicsConfig,
}

impl Body {
    /// Create a body at rest with the default configuration
    pub fn new(position: Vec3, mass: f64) -> Result<Self, BodyError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(BodyError::InvalidMass(mass));
        }
        if !position.is_finite() {
            return Err(BodyError::NonFinite("position"));
        }
        Ok(Self {
            position,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            mass,
            last_update_time: None,
            step_count: 0,
            config: PhysicsConfig::default(),
        })
    }

    /// Set the initial velocity of this body
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the step ceiling and unit scales of this body
    pub fn with_config(mut self, config: PhysicsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn force(&self) -> Vec3 {
        self.force
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Timestamp of the last frame, or None before the first frame
    pub fn last_update_time(&self) -> Option<f64> {
        self.last_update_time
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// True once the step count has passed the ceiling
    pub fn is_frozen(&self) -> bool {
        self.step_count > self.config.max_steps
    }

    /// Replace the position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Replace the force
    pub fn set_force(&mut self, force: Vec3) {
        self.force = force;
    }

    /// Compute the attraction toward `other` and store it as this step's force
    ///
    /// Magnitude is `G * m1 * m2 / r^2`, directed from this body toward
    /// `other`. Coincident bodies leave the previous force in place.
    pub fn update_force(&mut self, other: &Body) -> StepOutcome {
        if self.is_frozen() {
            return StepOutcome::Frozen;
        }

        let separation = other.position - self.position;
        let distance_sq = separation.length_squared();
        if distance_sq == 0.0 {
            return StepOutcome::SkippedDegenerate;
        }

        let magnitude =
            self.config.gravitational_constant * other.mass * self.mass / distance_sq;
        self.set_force(separation.normalized() * magnitude);
        StepOutcome::Applied
    }

    /// Kick the velocity by `force / mass` over the time since the last frame
    ///
    /// Does not record `now`; [`advance`](Body::advance) does that after
    /// moving the body.
    pub fn update_velocity(&mut self, now: f64) {
        let acceleration = self.force / self.mass;
        self.velocity += acceleration * self.elapsed_seconds(now);
    }

    /// Run one frame for this body
    ///
    /// The step count is bumped before the timestamp is checked, so skipped
    /// frames still use up budget. The first valid frame only records the
    /// timestamp. After that the velocity is updated first and the new
    /// velocity moves the position (semi-implicit Euler).
    pub fn advance(&mut self, now: f64) -> StepOutcome {
        if self.is_frozen() {
            return StepOutcome::Frozen;
        }

        self.step_count += 1;

        if !now.is_finite() {
            return StepOutcome::SkippedInvalidTime;
        }

        let last = match self.last_update_time {
            Some(last) => last,
            None => {
                self.last_update_time = Some(now);
                return StepOutcome::Initialized;
            }
        };

        if now < last {
            return StepOutcome::SkippedInvalidTime;
        }

        self.update_velocity(now);
        let dt = self.elapsed_seconds(now);
        self.position += self.velocity * dt;
        self.last_update_time = Some(now);
        StepOutcome::Applied
    }

    /// Seconds between the last frame and `now` (zero before the first frame)
    fn elapsed_seconds(&self, now: f64) -> f64 {
        match self.last_update_time {
            Some(last) => (now - last) / self.config.time_scale,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn body(position: Vec3, mass: f64) -> Body {
        Body::new(position, mass).unwrap()
    }

    /// Body that is already moving and feeling a force, so a frozen frame is
    /// distinguishable from a zero-dt frame
    fn moving_body(max_steps: u64) -> Body {
        let mut b = body(Vec3::ZERO, 2.0)
            .with_velocity(Vec3::new(1.0, 0.0, 0.0))
            .with_config(PhysicsConfig::new(max_steps));
        b.set_force(Vec3::new(0.0, 4.0, 0.0));
        b
    }

    #[test]
    fn test_new_body() {
        let b = body(Vec3::new(-100.0, 0.0, 0.0), 10.0);
        assert_eq!(b.position(), Vec3::new(-100.0, 0.0, 0.0));
        assert_eq!(b.velocity(), Vec3::ZERO);
        assert_eq!(b.force(), Vec3::ZERO);
        assert_eq!(b.mass(), 10.0);
        assert_eq!(b.step_count(), 0);
        assert_eq!(b.last_update_time(), None);
        assert!(!b.is_frozen());
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        assert_eq!(
            Body::new(Vec3::ZERO, 0.0).unwrap_err(),
            BodyError::InvalidMass(0.0)
        );
        assert_eq!(
            Body::new(Vec3::ZERO, -5.0).unwrap_err(),
            BodyError::InvalidMass(-5.0)
        );
        assert!(Body::new(Vec3::ZERO, f64::NAN).is_err());
        assert!(Body::new(Vec3::ZERO, f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_non_finite_position() {
        let err = Body::new(Vec3::new(f64::NAN, 0.0, 0.0), 1.0).unwrap_err();
        assert_eq!(err, BodyError::NonFinite("position"));
    }

    #[test]
    fn test_setters() {
        let mut b = body(Vec3::ZERO, 1.0);
        b.set_position(Vec3::new(1.0, 2.0, 3.0));
        b.set_force(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(b.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.force(), Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_force_points_toward_other() {
        let mut orbiter = body(Vec3::new(-10.0, 0.0, 0.0), 1.0);
        let sun = body(Vec3::new(10.0, 0.0, 0.0), 1.0);

        assert_eq!(orbiter.update_force(&sun), StepOutcome::Applied);

        let direction = orbiter.force().normalized();
        assert!((direction.x - 1.0).abs() < EPS);
        assert!(direction.y.abs() < EPS);
        assert!(direction.z.abs() < EPS);
    }

    #[test]
    fn test_force_off_axis_direction() {
        let mut orbiter = body(Vec3::new(1.0, 1.0, 1.0), 3.0);
        let sun = body(Vec3::new(4.0, 5.0, 1.0), 7.0);

        orbiter.update_force(&sun);

        let expected = Vec3::new(3.0, 4.0, 0.0).normalized();
        let direction = orbiter.force().normalized();
        assert!((direction - expected).length() < EPS);
        // 3 * 7 / 25
        assert!((orbiter.force().length() - 21.0 / 25.0).abs() < EPS);
    }

    #[test]
    fn test_force_inverse_square() {
        let sun = body(Vec3::ZERO, 1000.0);
        let mut near = body(Vec3::new(10.0, 0.0, 0.0), 10.0);
        let mut far = body(Vec3::new(20.0, 0.0, 0.0), 10.0);

        near.update_force(&sun);
        far.update_force(&sun);

        // 10 * 1000 / 100
        assert!((near.force().length() - 100.0).abs() < EPS);
        assert!((near.force().length() / far.force().length() - 4.0).abs() < EPS);
    }

    #[test]
    fn test_force_scales_with_gravitational_constant() {
        let sun = body(Vec3::ZERO, 1000.0);
        let mut orbiter = body(Vec3::new(10.0, 0.0, 0.0), 10.0)
            .with_config(PhysicsConfig::default().with_gravitational_constant(0.5));

        orbiter.update_force(&sun);
        assert!((orbiter.force().length() - 50.0).abs() < EPS);
    }

    #[test]
    fn test_force_overwrites_previous_value() {
        let sun = body(Vec3::ZERO, 100.0);
        let mut orbiter = body(Vec3::new(0.0, 10.0, 0.0), 1.0);
        orbiter.set_force(Vec3::new(1000.0, 1000.0, 1000.0));

        orbiter.update_force(&sun);
        orbiter.update_force(&sun);

        // Two calls give one interaction's worth of force, pointing down
        assert!((orbiter.force() - Vec3::new(0.0, -1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_coincident_bodies_keep_previous_force() {
        let mut a = body(Vec3::new(5.0, 5.0, 5.0), 1.0);
        let b = body(Vec3::new(5.0, 5.0, 5.0), 1.0);
        let previous = Vec3::new(0.25, -0.5, 2.0);
        a.set_force(previous);

        assert_eq!(a.update_force(&b), StepOutcome::SkippedDegenerate);
        assert_eq!(a.force(), previous);
        assert_eq!(a.update_force(&b), StepOutcome::SkippedDegenerate);
        assert_eq!(a.force(), previous);
    }

    #[test]
    fn test_first_advance_only_records_time() {
        for now in [0.0, 16.0, 1234.5, 1.0e9] {
            let mut b = moving_body(100);
            let start = b.position();

            assert_eq!(b.advance(now), StepOutcome::Initialized);
            assert_eq!(b.position(), start);
            assert_eq!(b.velocity(), Vec3::new(1.0, 0.0, 0.0));
            assert_eq!(b.last_update_time(), Some(now));
            assert_eq!(b.step_count(), 1);
        }
    }

    #[test]
    fn test_semi_implicit_step() {
        let mut b = body(Vec3::ZERO, 10.0);
        b.set_force(Vec3::new(10.0, 0.0, 0.0));

        b.advance(1000.0);
        assert_eq!(b.advance(2000.0), StepOutcome::Applied);

        // a = 1, dt = 1 s: velocity kicked first, then used for the drift
        assert!((b.velocity().x - 1.0).abs() < EPS);
        assert!((b.position().x - 1.0).abs() < EPS);
        assert_eq!(b.last_update_time(), Some(2000.0));
    }

    #[test]
    fn test_update_velocity_does_not_record_time() {
        let mut b = body(Vec3::ZERO, 2.0);
        b.set_force(Vec3::new(0.0, 2.0, 0.0));
        b.advance(500.0);

        b.update_velocity(1500.0);

        assert!((b.velocity().y - 1.0).abs() < EPS);
        assert_eq!(b.last_update_time(), Some(500.0));
        assert_eq!(b.position(), Vec3::ZERO);
    }

    #[test]
    fn test_update_velocity_before_first_frame_is_zero_dt() {
        let mut b = body(Vec3::ZERO, 1.0);
        b.set_force(Vec3::X);
        b.update_velocity(5000.0);
        assert_eq!(b.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_zero_force_keeps_body_at_rest() {
        let mut b = body(Vec3::new(3.0, -2.0, 1.0), 5.0);

        for now in [1000.0, 2000.0, 3000.0] {
            b.advance(now);
            assert_eq!(b.position(), Vec3::new(3.0, -2.0, 1.0));
            assert_eq!(b.velocity(), Vec3::ZERO);
        }
    }

    #[test]
    fn test_zero_force_constant_velocity() {
        let mut b = body(Vec3::ZERO, 5.0).with_velocity(Vec3::new(2.0, 0.0, 0.0));

        b.advance(1000.0);
        b.advance(2000.0);
        b.advance(3000.0);

        assert_eq!(b.velocity(), Vec3::new(2.0, 0.0, 0.0));
        assert!((b.position().x - 4.0).abs() < EPS);
    }

    #[test]
    fn test_custom_time_scale() {
        // Timestamps in seconds
        let mut b = body(Vec3::ZERO, 1.0)
            .with_velocity(Vec3::Y)
            .with_config(PhysicsConfig::default().with_time_scale(1.0));

        b.advance(1.0);
        b.advance(3.0);
        assert!((b.position().y - 2.0).abs() < EPS);
    }

    #[test]
    fn test_zero_timestamp_initializes() {
        // A driver starting at t = 0 must not re-initialize on its second frame
        let mut b = moving_body(100);
        let start = b.position();

        assert_eq!(b.advance(0.0), StepOutcome::Initialized);
        assert_eq!(b.last_update_time(), Some(0.0));

        assert_eq!(b.advance(16.0), StepOutcome::Applied);
        assert_eq!(b.last_update_time(), Some(16.0));
        assert_ne!(b.position(), start);
    }

    #[test]
    fn test_nan_timestamp_is_skipped() {
        let mut b = moving_body(100);
        b.advance(1000.0);
        let (position, velocity) = (b.position(), b.velocity());

        assert_eq!(b.advance(f64::NAN), StepOutcome::SkippedInvalidTime);

        assert_eq!(b.position(), position);
        assert_eq!(b.velocity(), velocity);
        assert_eq!(b.last_update_time(), Some(1000.0));
        // Counter still moved
        assert_eq!(b.step_count(), 2);
    }

    #[test]
    fn test_nan_first_timestamp_does_not_initialize() {
        let mut b = moving_body(100);
        assert_eq!(b.advance(f64::NAN), StepOutcome::SkippedInvalidTime);
        assert_eq!(b.last_update_time(), None);
        assert_eq!(b.advance(100.0), StepOutcome::Initialized);
    }

    #[test]
    fn test_infinite_timestamp_is_skipped() {
        let mut b = moving_body(100);
        b.advance(1000.0);
        assert_eq!(b.advance(f64::INFINITY), StepOutcome::SkippedInvalidTime);
        assert_eq!(b.last_update_time(), Some(1000.0));
    }

    #[test]
    fn test_backwards_timestamp_is_skipped() {
        let mut b = moving_body(100);
        b.advance(2000.0);
        let (position, velocity) = (b.position(), b.velocity());

        assert_eq!(b.advance(1000.0), StepOutcome::SkippedInvalidTime);
        assert_eq!(b.position(), position);
        assert_eq!(b.velocity(), velocity);
        assert_eq!(b.last_update_time(), Some(2000.0));
    }

    #[test]
    fn test_repeated_timestamp_is_a_zero_step() {
        let mut b = moving_body(100);
        b.advance(1000.0);
        assert_eq!(b.advance(1000.0), StepOutcome::Applied);
        assert_eq!(b.position(), Vec3::ZERO);
        assert_eq!(b.velocity(), Vec3::new(1.0, 0.0, 0.0));
    }

    fn assert_freezes_after(max_steps: u64) {
        let mut b = moving_body(max_steps);

        for i in 0..=max_steps {
            assert!(!b.is_frozen(), "frozen early at call {}", i);
            let outcome = b.advance(1000.0 + 16.0 * i as f64);
            assert!(outcome.is_applied(), "call {} returned {}", i, outcome);
        }
        assert!(b.is_frozen());
        assert_eq!(b.step_count(), max_steps + 1);

        let (position, velocity, force) = (b.position(), b.velocity(), b.force());
        let other = body(Vec3::new(50.0, 0.0, 0.0), 1000.0);

        assert_eq!(b.update_force(&other), StepOutcome::Frozen);
        assert_eq!(b.advance(1.0e7), StepOutcome::Frozen);

        assert_eq!(b.position(), position);
        assert_eq!(b.velocity(), velocity);
        assert_eq!(b.force(), force);
        assert_eq!(b.step_count(), max_steps + 1);
    }

    #[test]
    fn test_freezes_after_zero_steps() {
        assert_freezes_after(0);
    }

    #[test]
    fn test_freezes_after_one_step() {
        assert_freezes_after(1);
    }

    #[test]
    fn test_freezes_after_thousand_steps() {
        assert_freezes_after(1000);
    }

    #[test]
    fn test_invalid_frames_use_up_budget() {
        let mut b = moving_body(2);
        b.advance(f64::NAN);
        b.advance(f64::NAN);
        b.advance(f64::NAN);
        assert!(b.is_frozen());
        assert_eq!(b.advance(1000.0), StepOutcome::Frozen);
        assert_eq!(b.last_update_time(), None);
    }
}
