//! Physics error types
//!
//! Step-time problems are reported through [`StepOutcome`](crate::StepOutcome);
//! these errors cover construction and wiring mistakes only.

use std::fmt;

use crate::body::BodyKey;

/// Error building a body
#[derive(Debug, Clone, PartialEq)]
pub enum BodyError {
    /// Mass must be positive and finite (acceleration divides by it)
    InvalidMass(f64),
    /// An initial vector had a NaN or infinite component
    NonFinite(&'static str),
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyError::InvalidMass(mass) => {
                write!(f, "Invalid body mass: {} (must be positive and finite)", mass)
            }
            BodyError::NonFinite(field) => write!(f, "Body {} is not finite", field),
        }
    }
}

impl std::error::Error for BodyError {}

/// Error wiring bodies into a world or stepper
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A key no longer refers to a body in the world
    BodyNotFound(BodyKey),
    /// The stepper was given the same body as orbiter and attractor
    SameBody(BodyKey),
    /// A configuration value is out of range
    InvalidConfig(String),
    /// A body could not be built
    Body(BodyError),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::BodyNotFound(key) => write!(f, "Body not found: {:?}", key),
            PhysicsError::SameBody(key) => {
                write!(f, "Orbiter and attractor are the same body: {:?}", key)
            }
            PhysicsError::InvalidConfig(msg) => write!(f, "Invalid physics config: {}", msg),
            PhysicsError::Body(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PhysicsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PhysicsError::Body(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BodyError> for PhysicsError {
    fn from(e: BodyError) -> Self {
        PhysicsError::Body(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_mass_display() {
        let msg = BodyError::InvalidMass(-1.0).to_string();
        assert!(msg.contains("mass"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_from_body_error() {
        let err: PhysicsError = BodyError::NonFinite("position").into();
        assert!(err.to_string().contains("position"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_has_no_source() {
        let err = PhysicsError::InvalidConfig("time_scale".to_string());
        assert!(err.source().is_none());
        assert!(err.to_string().contains("time_scale"));
    }
}
