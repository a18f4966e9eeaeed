//! Particle field error handling
//!
//! The animation itself never fails: a missing drawing surface just skips drawing
//! for that tick. Errors only come out of setup paths (config loading, mounting,
//! acquiring browser resources).

use std::path::PathBuf;

/// Errors produced while configuring or mounting a particle field
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("Invalid config value for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Failed to parse {format} config: {error}")]
    ConfigParse { format: &'static str, error: String },

    #[error("Failed to read config file {path:?}: {error}")]
    ConfigIo { path: PathBuf, error: std::io::Error },

    #[error("Unsupported config format for {path:?} (expected .toml or .json)")]
    UnsupportedConfigFormat { path: PathBuf },

    #[error("Drawing surface unavailable: {reason}")]
    SurfaceUnavailable { reason: String },

    #[error("JavaScript error: {0}")]
    Js(String),
}

/// Result alias used by every fallible particle field operation
pub type FieldResult<T> = Result<T, FieldError>;

/// Helper trait for attaching config context to foreign errors
pub trait ConfigErrorContext<T> {
    fn config_context(self, format: &'static str) -> FieldResult<T>;
}

impl<T, E> ConfigErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn config_context(self, format: &'static str) -> FieldResult<T> {
        self.map_err(|e| FieldError::ConfigParse {
            format,
            error: e.to_string(),
        })
    }
}

/// Create an invalid config error
pub fn invalid_config(field: &'static str, reason: impl std::fmt::Display) -> FieldError {
    FieldError::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}

/// Create a surface unavailable error
pub fn surface_unavailable(reason: impl std::fmt::Display) -> FieldError {
    FieldError::SurfaceUnavailable {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_context_wraps_display() {
        let result: Result<(), String> = Err("bad key".to_string());
        let err = result.config_context("toml").unwrap_err();

        match err {
            FieldError::ConfigParse { format, error } => {
                assert_eq!(format, "toml");
                assert_eq!(error, "bad key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_message() {
        let err = invalid_config("spawn_rate", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'spawn_rate': must be positive"
        );
    }
}
