//! Core types for Orrery
//!
//! This crate sits between the physics stepper and whatever draws it:
//!
//! - [`Scene`] - Loadable/saveable initial conditions for an orbiter and its attractor
//! - [`BodyTemplate`] - Serializable starting state of one body
//! - [`SceneValidator`] - Static checks run before a scene is instantiated
//! - [`Session`] - A running simulation: physics world, stepper, and trail
//! - [`Trail`] - Bounded history of orbiter positions for line rendering

mod scene;
mod scene_validator;
mod session;
mod trail;

pub use scene::{BodyTemplate, Scene, SceneError, SceneLoadError, SceneSaveError};
pub use scene_validator::{SceneValidator, ValidationError};
pub use session::{Session, SessionStats};
pub use trail::{Trail, DEFAULT_TRAIL_CAPACITY};

// Re-export commonly used types from the lower crates for convenience
pub use orrery_math::Vec3;
pub use orrery_physics::{
    Body, BodyKey, FrameReport, PhysicsConfig, PhysicsError, PhysicsWorld, StepOutcome,
    TwoBodyStepper,
};
