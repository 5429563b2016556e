//! Scene serialization
//!
//! Provides Scene struct for loading/saving initial conditions from RON files.
//! A scene names one orbiting body and the attractor it falls toward.

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use std::io;

use orrery_math::Vec3;
use orrery_physics::PhysicsError;

use crate::scene_validator::ValidationError;

fn default_radius() -> f64 {
    1.0
}

/// Starting state of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    /// Body name (for display/debugging)
    pub name: String,
    /// Initial position [x, y, z]
    pub position: [f64; 3],
    /// Initial velocity [x, y, z] in units per second
    #[serde(default)]
    pub velocity: [f64; 3],
    /// Mass (must be positive)
    pub mass: f64,
    /// Display radius; not used by the physics
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl BodyTemplate {
    /// Create a body template at rest
    pub fn new(name: impl Into<String>, position: [f64; 3], mass: f64) -> Self {
        Self {
            name: name.into(),
            position,
            velocity: [0.0; 3],
            mass,
            radius: default_radius(),
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: [f64; 3]) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the display radius
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn position_vec(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn velocity_vec(&self) -> Vec3 {
        Vec3::from_array(self.velocity)
    }
}

/// A serializable two-body scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// The body that feels the attraction
    pub orbiter: BodyTemplate,
    /// The body it is attracted to
    pub attractor: BodyTemplate,
    /// Overrides the configured gravitational constant
    #[serde(default)]
    pub gravitational_constant: Option<f64>,
}

impl Scene {
    /// Create a new scene from its two bodies
    pub fn new(name: impl Into<String>, orbiter: BodyTemplate, attractor: BodyTemplate) -> Self {
        Self {
            name: name.into(),
            orbiter,
            attractor,
            gravitational_constant: None,
        }
    }

    /// A small planet on an eccentric orbit around a heavy sun
    pub fn earth_sun() -> Self {
        Self::new(
            "Earth and Sun",
            BodyTemplate::new("earth", [-100.0, 0.0, 0.0], 10.0)
                .with_velocity([0.0, 2.0, 0.0])
                .with_radius(2.0),
            BodyTemplate::new("sun", [0.0, 0.0, 0.0], 1000.0).with_radius(10.0),
        )
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Set the gravitational constant for this scene
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = Some(g);
        self
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}

/// Unified error type for turning a scene into a running session
#[derive(Debug)]
pub enum SceneError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// The scene failed validation
    Invalid(Vec<ValidationError>),
    /// The physics world rejected the scene's bodies or config
    Physics(PhysicsError),
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::Parse(e)
    }
}

impl From<SceneLoadError> for SceneError {
    fn from(e: SceneLoadError) -> Self {
        match e {
            SceneLoadError::Io(io_err) => SceneError::Io(io_err),
            SceneLoadError::Parse(parse_err) => SceneError::Parse(parse_err),
        }
    }
}

impl From<Vec<ValidationError>> for SceneError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SceneError::Invalid(errors)
    }
}

impl From<PhysicsError> for SceneError {
    fn from(e: PhysicsError) -> Self {
        SceneError::Physics(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "IO error: {}", e),
            SceneError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneError::Invalid(errors) => {
                write!(f, "Invalid scene:")?;
                for error in errors {
                    write!(f, " {};", error)?;
                }
                Ok(())
            }
            SceneError::Physics(e) => write!(f, "Physics error: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}
