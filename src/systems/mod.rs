//! Application systems
//!
//! Frame driving split out of main.rs so it can be tested without a terminal loop.

mod simulation;

pub use simulation::{FrameClock, SimulationResult, SimulationSystem};
