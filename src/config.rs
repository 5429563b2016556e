//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ORRERY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use orrery_core::{PhysicsConfig as StepConfig, DEFAULT_TRAIL_CAPACITY};
use orrery_physics::{DEFAULT_MAX_STEPS, DEFAULT_TIME_SCALE};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Scene configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Frame driver configuration
    #[serde(default)]
    pub driver: DriverConfig,
    /// Trail configuration
    #[serde(default)]
    pub trail: TrailConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ORRERY_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // ORRERY_DRIVER__DURATION_SECS=30 -> driver.duration_secs = 30
        figment = figment.merge(Env::prefixed("ORRERY_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Steps a body may take before it freezes
    pub max_steps: u64,
    /// Timestamp units per second (1000 for milliseconds)
    pub time_scale: f64,
    /// Gravitational constant folded into mass units
    pub gravitational_constant: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            time_scale: DEFAULT_TIME_SCALE,
            gravitational_constant: 1.0,
        }
    }
}

impl PhysicsConfig {
    /// Convert to the stepper's configuration
    pub fn to_physics_config(&self) -> StepConfig {
        StepConfig::new(self.max_steps)
            .with_time_scale(self.time_scale)
            .with_gravitational_constant(self.gravitational_constant)
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to a RON scene; the built-in earth/sun scene is used if it is missing
    pub path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/earth_sun.ron".to_string(),
        }
    }
}

/// Frame driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Time between frames in milliseconds
    pub frame_interval_ms: f64,
    /// Length of the run in seconds of driver time
    pub duration_secs: f64,
    /// Pace frames against the wall clock instead of stepping a fixed clock
    pub realtime: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16.0,
            duration_secs: 10.0,
            realtime: false,
        }
    }
}

impl DriverConfig {
    /// Reject intervals and durations the driver cannot finish with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_interval_ms.is_finite() || self.frame_interval_ms <= 0.0 {
            return Err(ConfigError::invalid(format!(
                "driver.frame_interval_ms must be positive and finite, got {}",
                self.frame_interval_ms
            )));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(ConfigError::invalid(format!(
                "driver.duration_secs must be positive and finite, got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }
}

/// Trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Record the orbiter's path
    pub enabled: bool,
    /// Points kept before the oldest is dropped
    pub capacity: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: DEFAULT_TRAIL_CAPACITY,
        }
    }
}

impl TrailConfig {
    /// Capacity to hand the session (0 when disabled)
    pub fn effective_capacity(&self) -> usize {
        if self.enabled {
            self.capacity
        } else {
            0
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log a position line every N frames (0 = never)
    pub log_every_n_frames: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_every_n_frames: 60,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.physics.max_steps, 100_000);
        assert_eq!(config.physics.time_scale, 1000.0);
        assert_eq!(config.driver.frame_interval_ms, 16.0);
        assert_eq!(config.trail.capacity, 1000);
        assert!(!config.driver.realtime);
    }

    #[test]
    fn test_to_physics_config() {
        let config = PhysicsConfig {
            max_steps: 5,
            time_scale: 1.0,
            gravitational_constant: 0.5,
        };
        let step = config.to_physics_config();
        assert_eq!(step.max_steps, 5);
        assert_eq!(step.time_scale, 1.0);
        assert_eq!(step.gravitational_constant, 0.5);
    }

    #[test]
    fn test_disabled_trail_has_no_capacity() {
        let trail = TrailConfig {
            enabled: false,
            capacity: 50,
        };
        assert_eq!(trail.effective_capacity(), 0);
        assert_eq!(TrailConfig::default().effective_capacity(), 1000);
    }

    #[test]
    fn test_default_driver_is_valid() {
        assert!(DriverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_driver_rejects_nan_duration() {
        let driver = DriverConfig {
            duration_secs: f64::NAN,
            ..Default::default()
        };
        let err = driver.validate().unwrap_err();
        assert!(err.to_string().contains("duration_secs"));
    }

    #[test]
    fn test_driver_rejects_non_positive_interval() {
        for interval in [0.0, -16.0, f64::INFINITY] {
            let driver = DriverConfig {
                frame_interval_ms: interval,
                ..Default::default()
            };
            let err = driver.validate().unwrap_err();
            assert!(err.to_string().contains("frame_interval_ms"));
        }
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("max_steps"));
        assert!(toml.contains("frame_interval_ms"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str("[physics]\nmax_steps = 42\n").unwrap();
        assert_eq!(config.physics.max_steps, 42);
        assert_eq!(config.physics.time_scale, 1000.0);
        assert_eq!(config.driver.duration_secs, 10.0);
    }
}
