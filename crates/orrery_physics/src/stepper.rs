//! Per-frame sequencing of the two-body update

use crate::body::BodyKey;
use crate::error::PhysicsError;
use crate::outcome::StepOutcome;
use crate::world::PhysicsWorld;

/// What one stepper invocation did to each body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Timestamp the frame ran with
    pub now: f64,
    /// Result of the orbiter's force update
    pub force: StepOutcome,
    /// Result of advancing the orbiter
    pub orbiter: StepOutcome,
    /// Result of advancing the attractor
    pub attractor: StepOutcome,
}

impl FrameReport {
    /// True if both bodies are frozen
    pub fn is_frozen(&self) -> bool {
        self.orbiter == StepOutcome::Frozen && self.attractor == StepOutcome::Frozen
    }

    /// True if any part of the frame took a skip branch
    pub fn has_skips(&self) -> bool {
        self.force.is_skipped() || self.orbiter.is_skipped() || self.attractor.is_skipped()
    }
}

/// Drives one orbiter around one attractor
///
/// Only the orbiter feels a force. The attractor is advanced every frame but
/// keeps whatever velocity it started with, so a "sun" at rest stays put.
/// Both bodies are owned by the [`PhysicsWorld`]; the stepper only holds keys.
///
/// More than two bodies would need every force summed before any body moves;
/// this stepper overwrites the single force each frame instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TwoBodyStepper {
    orbiter: BodyKey,
    attractor: BodyKey,
}

impl TwoBodyStepper {
    /// Create a stepper for two distinct bodies
    pub fn new(orbiter: BodyKey, attractor: BodyKey) -> Result<Self, PhysicsError> {
        if orbiter == attractor {
            return Err(PhysicsError::SameBody(orbiter));
        }
        Ok(Self { orbiter, attractor })
    }

    pub fn orbiter(&self) -> BodyKey {
        self.orbiter
    }

    pub fn attractor(&self) -> BodyKey {
        self.attractor
    }

    /// Run one frame at driver timestamp `now`
    ///
    /// 1. Orbiter force from the attractor's current position
    /// 2. Advance the orbiter
    /// 3. Advance the attractor
    ///
    /// Degenerate frames come back as skip outcomes in the report. Only a key
    /// that no longer resolves is an error.
    pub fn step(&self, world: &mut PhysicsWorld, now: f64) -> Result<FrameReport, PhysicsError> {
        let attractor = world
            .get_body(self.attractor)
            .ok_or(PhysicsError::BodyNotFound(self.attractor))?
            .clone();

        let orbiter = world
            .get_body_mut(self.orbiter)
            .ok_or(PhysicsError::BodyNotFound(self.orbiter))?;
        let force = orbiter.update_force(&attractor);
        let orbiter_outcome = orbiter.advance(now);

        let attractor_outcome = world
            .get_body_mut(self.attractor)
            .ok_or(PhysicsError::BodyNotFound(self.attractor))?
            .advance(now);

        Ok(FrameReport {
            now,
            force,
            orbiter: orbiter_outcome,
            attractor: attractor_outcome,
        })
    }
}
