//! Physics world and step configuration

use crate::body::{Body, BodyKey};
use crate::error::{BodyError, PhysicsError};
use orrery_math::Vec3;
use slotmap::SlotMap;

/// Steps a body may take before it freezes
pub const DEFAULT_MAX_STEPS: u64 = 100_000;

/// Divisor turning driver timestamps (milliseconds) into seconds
pub const DEFAULT_TIME_SCALE: f64 = 1000.0;

/// Configuration for the physics simulation
///
/// Every body carries a copy, so a session can be built without any
/// process-wide counters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Step ceiling; a body freezes once its step count exceeds this
    pub max_steps: u64,
    /// Timestamp units per second (1000 for a millisecond clock)
    pub time_scale: f64,
    /// Gravitational constant folded into the mass units
    pub gravitational_constant: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            time_scale: DEFAULT_TIME_SCALE,
            gravitational_constant: 1.0,
        }
    }
}

impl PhysicsConfig {
    /// Create a config with the given step ceiling and default scales
    pub fn new(max_steps: u64) -> Self {
        Self {
            max_steps,
            ..Self::default()
        }
    }

    /// Set the timestamp divisor
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Set the gravitational constant
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Check that the scales are usable
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.time_scale.is_finite() && self.time_scale > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "time_scale must be positive and finite, got {}",
                self.time_scale
            )));
        }
        if !(self.gravitational_constant.is_finite() && self.gravitational_constant > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "gravitational_constant must be positive and finite, got {}",
                self.gravitational_constant
            )));
        }
        Ok(())
    }
}

/// The physics world owning every body in a session
///
/// Steppers hold [`BodyKey`]s into this world rather than the bodies
/// themselves.
pub struct PhysicsWorld {
    /// All bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, Body>,
    /// Configuration handed to bodies created through [`spawn_body`](Self::spawn_body)
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            config,
        }
    }

    /// Build a body with this world's configuration and add it
    pub fn spawn_body(
        &mut self,
        position: Vec3,
        mass: f64,
        velocity: Vec3,
    ) -> Result<BodyKey, BodyError> {
        if !velocity.is_finite() {
            return Err(BodyError::NonFinite("velocity"));
        }
        let body = Body::new(position, mass)?
            .with_velocity(velocity)
            .with_config(self.config);
        Ok(self.add_body(body))
    }

    /// Add an already built body and return its key
    pub fn add_body(&mut self, body: Body) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<Body> {
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.bodies.get_mut(key)
    }

    /// Current position of a body, for the presentation side
    pub fn position(&self, key: BodyKey) -> Option<Vec3> {
        self.bodies.get(key).map(Body::position)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all bodies with their keys
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &Body)> + '_ {
        self.bodies.iter()
    }

    /// True once every body has exhausted its step budget
    pub fn all_frozen(&self) -> bool {
        !self.bodies.is_empty() && self.bodies.values().all(Body::is_frozen)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig::default();
        assert_eq!(config.max_steps, 100_000);
        assert_eq!(config.time_scale, 1000.0);
        assert_eq!(config.gravitational_constant, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_physics_config_builder() {
        let config = PhysicsConfig::new(10)
            .with_time_scale(1.0)
            .with_gravitational_constant(6.674e-11);
        assert_eq!(config.max_steps, 10);
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.gravitational_constant, 6.674e-11);
    }

    #[test]
    fn test_physics_config_rejects_bad_scales() {
        assert!(PhysicsConfig::default().with_time_scale(0.0).validate().is_err());
        assert!(PhysicsConfig::default().with_time_scale(f64::NAN).validate().is_err());
        assert!(PhysicsConfig::default()
            .with_gravitational_constant(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_spawn_body_uses_world_config() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(7));
        let key = world
            .spawn_body(Vec3::new(1.0, 2.0, 3.0), 5.0, Vec3::Y)
            .unwrap();

        let body = world.get_body(key).expect("Body should exist");
        assert_eq!(body.config().max_steps, 7);
        assert_eq!(body.velocity(), Vec3::Y);
        assert_eq!(world.position(key), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_spawn_body_rejects_bad_mass() {
        let mut world = PhysicsWorld::new();
        let result = world.spawn_body(Vec3::ZERO, 0.0, Vec3::ZERO);
        assert_eq!(result, Err(BodyError::InvalidMass(0.0)));
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_stale_key_returns_none() {
        let mut world = PhysicsWorld::new();
        let key = world.spawn_body(Vec3::ZERO, 1.0, Vec3::ZERO).unwrap();

        assert!(world.remove_body(key).is_some());
        assert!(world.get_body(key).is_none());

        // Old key stays dead after the slot is reused
        let new_key = world.spawn_body(Vec3::X, 1.0, Vec3::ZERO).unwrap();
        assert!(world.get_body(key).is_none());
        assert!(world.get_body(new_key).is_some());
    }

    #[test]
    fn test_all_frozen() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(0));
        assert!(!world.all_frozen());

        let key = world.spawn_body(Vec3::ZERO, 1.0, Vec3::ZERO).unwrap();
        assert!(!world.all_frozen());

        world.get_body_mut(key).unwrap().advance(1.0);
        assert!(world.all_frozen());
        assert_eq!(world.bodies().count(), 1);
    }
}
