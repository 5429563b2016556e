//! Two-body gravity simulation for Orrery
//!
//! This crate provides the physics core driven once per rendered frame:
//! - Point-mass bodies with Newtonian attraction
//! - Semi-implicit velocity integration from millisecond timestamps
//! - A step ceiling after which bodies freeze
//! - A stepper that sequences force, velocity and position updates
//!
//! Presentation (meshes, trails, cameras) is not part of this crate: callers
//! read [`Body::position`] after each frame.

pub mod body;
pub mod error;
pub mod outcome;
pub mod stepper;
pub mod world;

// Re-export commonly used types
pub use body::{Body, BodyKey};
pub use error::{BodyError, PhysicsError};
pub use outcome::StepOutcome;
pub use stepper::{FrameReport, TwoBodyStepper};
pub use world::{PhysicsConfig, PhysicsWorld, DEFAULT_MAX_STEPS, DEFAULT_TIME_SCALE};
