use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{defaults, spawn};
use crate::error::{invalid_config, ConfigErrorContext, FieldError, FieldResult};

/// Particle field configuration
///
/// Every key is optional; missing keys fall back to the tuned defaults. The
/// camelCase aliases accept the prop names the site passes from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleFieldConfig {
    /// Hard cap on simultaneous live particles
    #[serde(alias = "maxParticles")]
    pub max_particles: usize,
    /// Nominal spawn rate; see `spawn_interval_ms`
    #[serde(alias = "spawnRate")]
    pub spawn_rate: f32,
    /// Base speed in pixels per tick
    #[serde(alias = "particleSpeed")]
    pub particle_speed: f32,
    /// Distance in pixels within which the pointer pushes particles
    #[serde(alias = "repulsionRadius")]
    pub repulsion_radius: f32,
    /// Force at zero distance, decaying linearly to zero at the radius
    #[serde(alias = "repulsionForce")]
    pub repulsion_force: f32,
    /// Particle colour (RGB)
    pub color: [u8; 3],
    /// Optional velocity cap. Unset keeps repulsion undamped.
    #[serde(alias = "maxSpeed", skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f32>,
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            max_particles: defaults::MAX_PARTICLES,
            spawn_rate: defaults::SPAWN_RATE,
            particle_speed: defaults::PARTICLE_SPEED,
            repulsion_radius: defaults::REPULSION_RADIUS,
            repulsion_force: defaults::REPULSION_FORCE,
            color: defaults::COLOR,
            max_speed: None,
        }
    }
}

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(ConfigFormat::Toml),
            Some("json") => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

impl ParticleFieldConfig {
    /// Milliseconds between spawn attempts
    pub fn spawn_interval_ms(&self) -> f64 {
        spawn::MS_PER_SECOND / (self.spawn_rate as f64 * spawn::SPAWN_RATE_SCALE as f64)
    }

    /// Check that every value can drive the simulation
    pub fn validate(&self) -> FieldResult<()> {
        if !self.spawn_rate.is_finite() || self.spawn_rate <= 0.0 {
            return Err(invalid_config(
                "spawn_rate",
                format!("must be a positive number, got {}", self.spawn_rate),
            ));
        }

        let non_negative = [
            ("particle_speed", self.particle_speed),
            ("repulsion_radius", self.repulsion_radius),
            ("repulsion_force", self.repulsion_force),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid_config(
                    field,
                    format!("must be a non-negative number, got {}", value),
                ));
            }
        }

        // Spawn speeds are sampled up to this bound
        if !(self.particle_speed * spawn::SPEED_SPREAD).is_finite() {
            return Err(invalid_config(
                "particle_speed",
                format!("is too large to sample spawn speeds from, got {}", self.particle_speed),
            ));
        }

        if let Some(max_speed) = self.max_speed {
            if !max_speed.is_finite() || max_speed <= 0.0 {
                return Err(invalid_config(
                    "max_speed",
                    format!("must be a positive number, got {}", max_speed),
                ));
            }
        }

        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> FieldResult<Self> {
        let config: Self = toml::from_str(source).config_context("toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(source: &str) -> FieldResult<Self> {
        let config: Self = serde_json::from_str(source).config_context("json")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, picking the parser from the extension
    pub fn load(path: &Path) -> FieldResult<Self> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            FieldError::UnsupportedConfigFormat {
                path: path.to_path_buf(),
            }
        })?;

        let source = std::fs::read_to_string(path).map_err(|error| FieldError::ConfigIo {
            path: path.to_path_buf(),
            error,
        })?;

        log::debug!("Loading particle field config from {:?} ({:?})", path, format);

        match format {
            ConfigFormat::Toml => Self::from_toml_str(&source),
            ConfigFormat::Json => Self::from_json_str(&source),
        }
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> FieldResult<String> {
        toml::to_string_pretty(self).config_context("toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ParticleFieldConfig::default();
        assert_eq!(config.max_particles, 75);
        assert_eq!(config.spawn_rate, 0.8);
        assert_eq!(config.particle_speed, 0.25);
        assert_eq!(config.repulsion_radius, 100.0);
        assert_eq!(config.repulsion_force, 0.3);
        assert!(config.max_speed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_spawn_interval() {
        let mut config = ParticleFieldConfig::default();
        config.spawn_rate = 1.0;
        assert_eq!(config.spawn_interval_ms(), 125.0);

        config.spawn_rate = 0.5;
        assert_eq!(config.spawn_interval_ms(), 250.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ParticleFieldConfig::from_toml_str("max_particles = 10\n").unwrap();
        assert_eq!(config.max_particles, 10);
        assert_eq!(config.spawn_rate, defaults::SPAWN_RATE);
    }

    #[test]
    fn test_json_accepts_camel_case() {
        let config =
            ParticleFieldConfig::from_json_str(r#"{"maxParticles": 40, "repulsionRadius": 80}"#)
                .unwrap();
        assert_eq!(config.max_particles, 40);
        assert_eq!(config.repulsion_radius, 80.0);
    }

    #[test]
    fn test_rejects_non_positive_spawn_rate() {
        let err = ParticleFieldConfig::from_toml_str("spawn_rate = 0.0").unwrap_err();
        assert!(matches!(
            err,
            FieldError::InvalidConfig {
                field: "spawn_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_radius() {
        let err = ParticleFieldConfig::from_json_str(r#"{"repulsion_radius": -5}"#).unwrap_err();
        assert!(matches!(
            err,
            FieldError::InvalidConfig {
                field: "repulsion_radius",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_speed_that_overflows_spawn_range() {
        let err = ParticleFieldConfig::from_json_str(r#"{"particleSpeed": 3.0e38}"#).unwrap_err();
        assert!(matches!(
            err,
            FieldError::InvalidConfig {
                field: "particle_speed",
                ..
            }
        ));

        // Largest speed whose doubled bound is still finite
        let config = ParticleFieldConfig {
            particle_speed: f32::MAX / 2.0,
            ..ParticleFieldConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = ParticleFieldConfig::from_toml_str("max_particles = \"lots\"").unwrap_err();
        assert!(matches!(err, FieldError::ConfigParse { format: "toml", .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "max_particles = 12\nmax_speed = 3.0").unwrap();

        let config = ParticleFieldConfig::load(file.path()).unwrap();
        assert_eq!(config.max_particles, 12);
        assert_eq!(config.max_speed, Some(3.0));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = ParticleFieldConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, FieldError::UnsupportedConfigFormat { .. }));
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let mut config = ParticleFieldConfig::default();
        config.max_particles = 5;
        let text = config.to_toml_string().unwrap();
        assert_eq!(ParticleFieldConfig::from_toml_str(&text).unwrap(), config);
    }
}
