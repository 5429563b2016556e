//! Scene validation
//!
//! Validates scenes before they are turned into a session. The
//! [`SceneValidator`] catches the inputs the stepper would otherwise only
//! report frame by frame: bad masses, bodies starting on top of each other,
//! and coordinates far outside anything a renderer can frame.

use crate::scene::{BodyTemplate, Scene};

/// Coordinate magnitude treated as a typo
const EXTREME_COORDINATE: f64 = 1.0e6;

/// Validation error found in a scene
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A body has an empty name
    EmptyName,
    /// Orbiter and attractor share a name
    DuplicateName(String),
    /// Mass is zero, negative, or not finite
    InvalidMass(String, f64),
    /// Position or velocity has a NaN or infinite component
    NonFinite(String),
    /// Display radius is negative or not finite
    InvalidRadius(String, f64),
    /// Both bodies start at the same position
    CoincidentBodies,
    /// A starting position has a component beyond the extreme-coordinate threshold
    ExtremePosition(String, [f64; 3]),
    /// Gravitational constant is zero, negative, or not finite
    InvalidGravitationalConstant(f64),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "Body has an empty name"),
            ValidationError::DuplicateName(name) => {
                write!(f, "Duplicate body name: '{}'", name)
            }
            ValidationError::InvalidMass(name, mass) => {
                write!(f, "Body '{}' has invalid mass {} (must be positive)", name, mass)
            }
            ValidationError::NonFinite(name) => {
                write!(f, "Body '{}' has a non-finite position or velocity", name)
            }
            ValidationError::InvalidRadius(name, radius) => {
                write!(f, "Body '{}' has invalid radius {}", name, radius)
            }
            ValidationError::CoincidentBodies => {
                write!(f, "Orbiter and attractor start at the same position")
            }
            ValidationError::ExtremePosition(name, pos) => {
                write!(
                    f,
                    "Body '{}' has extreme position: [{}, {}, {}] (component abs > {})",
                    name, pos[0], pos[1], pos[2], EXTREME_COORDINATE
                )
            }
            ValidationError::InvalidGravitationalConstant(g) => {
                write!(f, "Invalid gravitational constant: {}", g)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Scene validator that checks for common errors
///
/// # Example
/// ```ignore
/// let errors = SceneValidator::validate(&scene);
/// for error in &errors {
///     log::error!("Validation error: {}", error);
/// }
/// ```
pub struct SceneValidator;

impl SceneValidator {
    /// Validate a scene, returning all errors found
    ///
    /// Returns an empty vector if no validation errors are detected.
    pub fn validate(scene: &Scene) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        Self::validate_body(&scene.orbiter, &mut errors);
        Self::validate_body(&scene.attractor, &mut errors);

        if !scene.orbiter.name.is_empty() && scene.orbiter.name == scene.attractor.name {
            errors.push(ValidationError::DuplicateName(scene.orbiter.name.clone()));
        }

        if scene.orbiter.position == scene.attractor.position {
            errors.push(ValidationError::CoincidentBodies);
        }

        if let Some(g) = scene.gravitational_constant {
            if !(g.is_finite() && g > 0.0) {
                errors.push(ValidationError::InvalidGravitationalConstant(g));
            }
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(scene: &Scene) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(scene);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_body(body: &BodyTemplate, errors: &mut Vec<ValidationError>) {
        if body.name.is_empty() {
            errors.push(ValidationError::EmptyName);
        }

        if !(body.mass.is_finite() && body.mass > 0.0) {
            errors.push(ValidationError::InvalidMass(body.name.clone(), body.mass));
        }

        if !(body.position_vec().is_finite() && body.velocity_vec().is_finite()) {
            errors.push(ValidationError::NonFinite(body.name.clone()));
        } else if body.position_vec().max_abs_component() > EXTREME_COORDINATE {
            errors.push(ValidationError::ExtremePosition(body.name.clone(), body.position));
        }

        if !(body.radius.is_finite() && body.radius >= 0.0) {
            errors.push(ValidationError::InvalidRadius(body.name.clone(), body.radius));
        }
    }
}
