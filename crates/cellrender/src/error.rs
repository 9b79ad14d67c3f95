//! Error types for registration, rendering and configuration loading.
//!
//! Only [`RegistryError`] and [`ConfigError`] ever reach a caller. A
//! [`RenderError`] is produced by a renderer and consumed by the application
//! pipeline, which reports it and substitutes a fallback display.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while registering a renderer.
///
/// These are startup-time programmer errors and are returned synchronously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The type identifier or implementation is unusable.
    #[error("invalid registration for renderer '{renderer}': {reason}")]
    InvalidRegistration {
        /// The type identifier that was passed in.
        renderer: String,
        /// Why the registration was refused.
        reason: String,
    },

    /// A renderer is already registered under this type and the registry
    /// refuses overwrites.
    #[error("renderer '{renderer}' is already registered")]
    Duplicate {
        /// The type identifier that collided.
        renderer: String,
    },
}

/// Failure raised while a renderer executes.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A configuration value has the wrong shape or an unsupported value.
    #[error("invalid config '{key}': {message}")]
    InvalidConfig { key: String, message: String },

    /// The display pattern could not be applied.
    #[error("format error: {0}")]
    Format(String),

    /// The input could not be interpreted by the renderer.
    #[error("unparseable value: {0}")]
    Unparseable(String),

    /// Structured value encoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other failure raised by a custom renderer.
    #[error("{0}")]
    Other(String),
}

impl RenderError {
    /// Shorthand for [`RenderError::InvalidConfig`].
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        RenderError::InvalidConfig {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while loading or exporting column configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported config file extension: '{}'", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("CSV export failed: {0}")]
    Csv(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::InvalidRegistration {
            renderer: String::new(),
            reason: "type identifier must not be empty".into(),
        };
        assert!(err.to_string().contains("must not be empty"));

        let err = RegistryError::Duplicate {
            renderer: "date".into(),
        };
        assert_eq!(err.to_string(), "renderer 'date' is already registered");
    }

    #[test]
    fn test_render_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RenderError = json_err.into();
        assert!(matches!(err, RenderError::Serialization(_)));
    }

    #[test]
    fn test_invalid_config_shorthand() {
        let err = RenderError::invalid_config("trueColor", "unknown color 'teal'");
        assert_eq!(
            err.to_string(),
            "invalid config 'trueColor': unknown color 'teal'"
        );
    }
}
