//! 3D Mathematics Library
//!
//! This crate provides the vector type shared by the Orrery physics and
//! presentation crates.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components in double precision

mod vec3;

pub use vec3::Vec3;
