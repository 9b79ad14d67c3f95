//! Static validation of render configurations.
//!
//! Validation checks a persisted [`RenderConfig`] without rendering anything,
//! so a configuration UI can flag problems before the config is saved.
//! Problems are returned, never raised, and all of them are collected.

use serde::Serialize;

use crate::config::RenderConfig;
use crate::registry::RendererRegistry;

/// Outcome of [`validate_render_config`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

impl RendererRegistry {
    /// Validates `config` against the registered renderers.
    ///
    /// - No config is valid: the implicit default renderer needs nothing.
    /// - A config must name a type, and the type must be registered.
    /// - The registered renderer then checks its own options through
    ///   [`Renderer::validate`](crate::Renderer::validate), on the config
    ///   as persisted (before defaults are merged).
    pub fn validate(&self, config: Option<&RenderConfig>) -> ValidationReport {
        let Some(config) = config else {
            return ValidationReport::from_errors(Vec::new());
        };

        let mut errors = Vec::new();
        match config.renderer_type() {
            None => errors.push("render type is required".to_string()),
            Some(renderer_type) => match self.lookup(renderer_type) {
                None => errors.push(format!("unknown render type: {}", renderer_type)),
                Some(renderer) => errors.extend(renderer.validate(&config.config)),
            },
        }
        ValidationReport::from_errors(errors)
    }
}

/// Free-function form of [`RendererRegistry::validate`].
pub fn validate_render_config(
    registry: &RendererRegistry,
    config: Option<&RenderConfig>,
) -> ValidationReport {
    registry.validate(config)
}
