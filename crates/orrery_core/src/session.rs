//! A running simulation session
//!
//! The session owns the physics world, the stepper wired to its two bodies,
//! and the orbiter's trail. Frame drivers call [`Session::frame`] once per
//! rendered frame and read positions back afterwards.

use orrery_math::Vec3;
use orrery_physics::{
    BodyKey, FrameReport, PhysicsConfig, PhysicsError, PhysicsWorld, StepOutcome, TwoBodyStepper,
};

use crate::scene::{Scene, SceneError};
use crate::scene_validator::SceneValidator;
use crate::trail::Trail;

/// Running counts over a session's frames
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionStats {
    /// Frames handed to the stepper
    pub frames: u64,
    /// Frames where the orbiter actually moved
    pub applied: u64,
    /// Frames whose force update hit coincident bodies
    pub skipped_degenerate: u64,
    /// Frames with a NaN, infinite, or backwards timestamp
    pub skipped_invalid_time: u64,
    /// Frames that arrived after the orbiter froze
    pub frozen: u64,
    /// Closest the orbiter has been to the attractor
    pub min_distance: Option<f64>,
    /// Farthest the orbiter has been from the attractor
    pub max_distance: Option<f64>,
}

impl SessionStats {
    fn record(&mut self, report: &FrameReport, distance: f64) {
        self.frames += 1;
        match report.orbiter {
            StepOutcome::Applied => self.applied += 1,
            StepOutcome::SkippedInvalidTime => self.skipped_invalid_time += 1,
            StepOutcome::Frozen => self.frozen += 1,
            StepOutcome::Initialized | StepOutcome::SkippedDegenerate => {}
        }
        if report.force == StepOutcome::SkippedDegenerate {
            self.skipped_degenerate += 1;
        }
        self.min_distance = Some(self.min_distance.map_or(distance, |d| d.min(distance)));
        self.max_distance = Some(self.max_distance.map_or(distance, |d| d.max(distance)));
    }
}

/// Display data for one body, kept apart from its physics state
#[derive(Clone, Debug, PartialEq)]
struct BodyLabel {
    name: String,
    radius: f64,
}

/// A two-body simulation built from a [`Scene`]
pub struct Session {
    name: String,
    world: PhysicsWorld,
    stepper: TwoBodyStepper,
    orbiter_label: BodyLabel,
    attractor_label: BodyLabel,
    trail: Trail,
    stats: SessionStats,
}

impl Session {
    /// Validate a scene and build its world, stepper, and trail
    ///
    /// A gravitational constant set in the scene overrides the one in `config`.
    pub fn from_scene(
        scene: &Scene,
        config: PhysicsConfig,
        trail_capacity: usize,
    ) -> Result<Self, SceneError> {
        SceneValidator::validate_or_error(scene)?;

        let mut config = config;
        if let Some(g) = scene.gravitational_constant {
            config.gravitational_constant = g;
        }
        config.validate()?;

        let mut world = PhysicsWorld::with_config(config);
        let orbiter = world
            .spawn_body(
                scene.orbiter.position_vec(),
                scene.orbiter.mass,
                scene.orbiter.velocity_vec(),
            )
            .map_err(PhysicsError::from)?;
        let attractor = world
            .spawn_body(
                scene.attractor.position_vec(),
                scene.attractor.mass,
                scene.attractor.velocity_vec(),
            )
            .map_err(PhysicsError::from)?;
        let stepper = TwoBodyStepper::new(orbiter, attractor)?;

        log::info!(
            "Session '{}': '{}' (mass {}) around '{}' (mass {}), max {} steps",
            scene.name,
            scene.orbiter.name,
            scene.orbiter.mass,
            scene.attractor.name,
            scene.attractor.mass,
            config.max_steps
        );

        Ok(Self {
            name: scene.name.clone(),
            world,
            stepper,
            orbiter_label: BodyLabel {
                name: scene.orbiter.name.clone(),
                radius: scene.orbiter.radius,
            },
            attractor_label: BodyLabel {
                name: scene.attractor.name.clone(),
                radius: scene.attractor.radius,
            },
            trail: Trail::new(trail_capacity),
            stats: SessionStats::default(),
        })
    }

    /// Run one frame at driver timestamp `now` (milliseconds)
    ///
    /// Records the orbiter's new position in the trail whenever it moved.
    pub fn frame(&mut self, now: f64) -> Result<FrameReport, PhysicsError> {
        let was_frozen = self.world.all_frozen();
        let report = self.stepper.step(&mut self.world, now)?;

        let orbiter = self.orbiter_position()?;
        let attractor = self.attractor_position()?;
        self.stats.record(&report, orbiter.distance(attractor));

        if report.orbiter.is_applied() {
            self.trail.push(orbiter);
        }

        if report.force == StepOutcome::SkippedDegenerate {
            log::debug!(
                "'{}' and '{}' coincide at t={}; keeping previous force",
                self.orbiter_label.name,
                self.attractor_label.name,
                now
            );
        }
        if report.orbiter == StepOutcome::SkippedInvalidTime {
            log::debug!("Skipped frame with invalid timestamp {}", now);
        }
        if !was_frozen && self.world.all_frozen() {
            log::info!(
                "Session '{}' frozen after {} frames",
                self.name,
                self.stats.frames
            );
        }

        log::trace!(
            "t={} {} at ({:.3}, {:.3}, {:.3})",
            now,
            self.orbiter_label.name,
            orbiter.x,
            orbiter.y,
            orbiter.z
        );

        Ok(report)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orbiter_name(&self) -> &str {
        &self.orbiter_label.name
    }

    pub fn attractor_name(&self) -> &str {
        &self.attractor_label.name
    }

    /// Display radii (orbiter, attractor) from the scene
    pub fn radii(&self) -> (f64, f64) {
        (self.orbiter_label.radius, self.attractor_label.radius)
    }

    pub fn orbiter_position(&self) -> Result<Vec3, PhysicsError> {
        self.position(self.stepper.orbiter())
    }

    pub fn attractor_position(&self) -> Result<Vec3, PhysicsError> {
        self.position(self.stepper.attractor())
    }

    /// True once both bodies have exhausted their step budget
    pub fn is_frozen(&self) -> bool {
        self.world.all_frozen()
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn stepper(&self) -> &TwoBodyStepper {
        &self.stepper
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Mutable trail access for contiguous/byte views
    pub fn trail_mut(&mut self) -> &mut Trail {
        &mut self.trail
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    fn position(&self, key: BodyKey) -> Result<Vec3, PhysicsError> {
        self.world
            .position(key)
            .ok_or(PhysicsError::BodyNotFound(key))
    }
}
