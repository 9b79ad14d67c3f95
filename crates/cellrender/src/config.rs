//! Serializable render configuration.
//!
//! A [`RenderConfig`] is the `{type, config}` pair an external configuration
//! store persists for each column. This crate only reads it; the shape is
//! kept to plain JSON values so it round-trips through JSON and YAML without
//! loss.
//!
//! ```
//! use cellrender::RenderConfig;
//!
//! let config = RenderConfig::from_yaml(r#"
//! type: boolean
//! config:
//!   trueText: "Yes"
//!   showAsTag: false
//! "#).unwrap();
//!
//! assert_eq!(config.renderer_type(), Some("boolean"));
//! assert_eq!(config.config["trueText"], "Yes");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, RenderError};

/// Renderer options keyed by field name.
pub type ConfigMap = serde_json::Map<String, Value>;

/// Selects a renderer by type identifier and carries its options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Registry key of the renderer. Absent means the implicit default.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub renderer_type: Option<String>,

    /// Options merged over the renderer's default configuration.
    #[serde(default, skip_serializing_if = "ConfigMap::is_empty")]
    pub config: ConfigMap,
}

impl RenderConfig {
    /// Creates a config selecting `renderer_type` with no options.
    pub fn new(renderer_type: impl Into<String>) -> Self {
        Self {
            renderer_type: Some(renderer_type.into()),
            config: ConfigMap::new(),
        }
    }

    /// Sets one option, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// The selected type, treating an empty string as absent.
    pub fn renderer_type(&self) -> Option<&str> {
        self.renderer_type.as_deref().filter(|t| !t.is_empty())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Overlays `overrides` on `defaults`.
///
/// Keys present in `overrides` win, including explicit nulls; keys only in
/// `defaults` are inherited.
pub fn merge_config(defaults: &ConfigMap, overrides: &ConfigMap) -> ConfigMap {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Reads a boolean option, falling back when absent or not a boolean.
pub(crate) fn bool_or(config: &ConfigMap, key: &str, fallback: bool) -> bool {
    config.get(key).and_then(Value::as_bool).unwrap_or(fallback)
}

/// Reads a string option that must be a string when present.
pub(crate) fn require_str<'a>(
    config: &'a ConfigMap,
    key: &str,
    fallback: &'a str,
) -> Result<&'a str, RenderError> {
    match config.get(key) {
        None | Some(Value::Null) => Ok(fallback),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(RenderError::invalid_config(
            key,
            format!("expected a string, got {}", other),
        )),
    }
}

/// Returns `true` when the option is missing, null, or an empty string.
pub(crate) fn is_blank(config: &ConfigMap, key: &str) -> bool {
    match config.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Supported on-disk configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub(crate) fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Reads and deserializes a JSON or YAML file, chosen by extension.
pub(crate) fn load_file<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match format {
        ConfigFormat::Json => Ok(serde_json::from_str(&content)?),
        ConfigFormat::Yaml => Ok(serde_yaml::from_str(&content)?),
    }
}
