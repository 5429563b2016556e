//! Orrery - two-body orbit simulation
//!
//! Library half of the `orrery` binary: configuration loading and the frame
//! driver that feeds timestamps into a [`orrery_core::Session`].

pub mod config;
pub mod systems;
