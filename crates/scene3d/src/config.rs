//! Engine configuration
//!
//! All tunables live in one serde-backed structure loadable from TOML.
//! Missing fields fall back to defaults, so a config file only needs the
//! values it changes.

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but failed validation
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Physics world settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Whether physics stepping runs at all
    pub enabled: bool,
    /// World gravity as `[x, y, z]`
    pub gravity: [f32; 3],
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            gravity: [0.0, -9.81, 0.0],
        }
    }
}

impl PhysicsSettings {
    /// Gravity as a vector
    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::new(self.gravity[0], self.gravity[1], self.gravity[2])
    }
}

/// Scene graph settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Node arena capacity reserved up front
    pub node_capacity: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self { node_capacity: 256 }
    }
}

/// Frame timing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Physics step length in seconds
    pub fixed_timestep: f32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scene graph settings
    pub scene: SceneSettings,
    /// Physics world settings
    pub physics: PhysicsSettings,
    /// Frame timing settings
    pub timing: TimingSettings,
}

impl EngineConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.fixed_timestep <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fixed_timestep must be positive, got {}",
                self.timing.fixed_timestep
            )));
        }
        Ok(())
    }
}
