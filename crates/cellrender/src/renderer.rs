//! The renderer contract.
//!
//! A renderer turns one raw cell value plus its merged options into a
//! [`DisplayValue`]. Everything besides `render` is descriptive metadata for
//! configuration UIs and has a sensible default.

use std::fmt;
use std::sync::Arc;

use crate::config::ConfigMap;
use crate::display::DisplayValue;
use crate::error::RenderError;
use crate::field::FieldDescriptor;
use crate::value::{CellValue, Record};

/// A pluggable value renderer.
///
/// Implementations are registered once at startup and shared read-only
/// afterwards, hence `Send + Sync`.
pub trait Renderer: Send + Sync {
    /// Renders `value` using options already merged over
    /// [`default_config`](Renderer::default_config).
    ///
    /// `record` is the full row, for renderers whose output depends on
    /// sibling fields.
    fn render(
        &self,
        value: &CellValue,
        config: &ConfigMap,
        record: Option<&Record>,
    ) -> Result<DisplayValue, RenderError>;

    /// Display name for selectors. `None` shows the registry key instead.
    fn label(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> &str {
        ""
    }

    /// Ordered configuration inputs.
    fn fields(&self) -> Vec<FieldDescriptor> {
        Vec::new()
    }

    fn default_config(&self) -> ConfigMap {
        ConfigMap::new()
    }

    /// Checks a persisted (unmerged) configuration and returns one message
    /// per problem.
    fn validate(&self, _config: &ConfigMap) -> Vec<String> {
        Vec::new()
    }
}

/// The closure signature accepted by [`renderer_fn`].
pub type RenderFn = Arc<
    dyn Fn(&CellValue, &ConfigMap, Option<&Record>) -> Result<DisplayValue, RenderError>
        + Send
        + Sync,
>;

/// A renderer assembled from a closure and builder-supplied metadata.
#[derive(Clone)]
pub struct FnRenderer {
    render: RenderFn,
    label: Option<String>,
    description: String,
    fields: Vec<FieldDescriptor>,
    default_config: ConfigMap,
}

impl FnRenderer {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn default_config(mut self, config: ConfigMap) -> Self {
        self.default_config = config;
        self
    }
}

impl fmt::Debug for FnRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRenderer")
            .field("label", &self.label)
            .field("description", &self.description)
            .field("fields", &self.fields)
            .field("default_config", &self.default_config)
            .finish_non_exhaustive()
    }
}

impl Renderer for FnRenderer {
    fn render(
        &self,
        value: &CellValue,
        config: &ConfigMap,
        record: Option<&Record>,
    ) -> Result<DisplayValue, RenderError> {
        (self.render)(value, config, record)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        self.fields.clone()
    }

    fn default_config(&self) -> ConfigMap {
        self.default_config.clone()
    }
}

/// Creates a renderer from a closure.
///
/// This is the quickest way for applications to plug in a custom renderer.
///
/// ```
/// use cellrender::{renderer_fn, DisplayValue, RendererRegistry};
///
/// let upper = renderer_fn(|value, _config, _record| {
///     Ok(DisplayValue::text(value.to_text().to_uppercase()))
/// })
/// .label("Uppercase");
///
/// let mut registry = RendererRegistry::new();
/// registry.register("upper", upper).unwrap();
/// assert!(registry.has("upper"));
/// ```
pub fn renderer_fn<F>(f: F) -> FnRenderer
where
    F: Fn(&CellValue, &ConfigMap, Option<&Record>) -> Result<DisplayValue, RenderError>
        + Send
        + Sync
        + 'static,
{
    FnRenderer {
        render: Arc::new(f),
        label: None,
        description: String::new(),
        fields: Vec::new(),
        default_config: ConfigMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    #[test]
    fn test_fn_renderer_defaults() {
        let renderer = renderer_fn(|_, _, _| Ok(DisplayValue::text("x")));
        assert_eq!(Renderer::label(&renderer), None);
        assert_eq!(Renderer::description(&renderer), "");
        assert!(Renderer::fields(&renderer).is_empty());
        assert!(Renderer::default_config(&renderer).is_empty());
    }

    #[test]
    fn test_fn_renderer_metadata() {
        let mut defaults = ConfigMap::new();
        defaults.insert("suffix".into(), "!".into());

        let renderer = renderer_fn(|value, config, _| {
            let suffix = config.get("suffix").and_then(|v| v.as_str()).unwrap_or("");
            Ok(DisplayValue::text(format!("{}{}", value.to_text(), suffix)))
        })
        .label("Shout")
        .description("Appends a suffix")
        .field(FieldDescriptor::new("suffix", "Suffix", FieldKind::Text))
        .default_config(defaults.clone());

        assert_eq!(Renderer::label(&renderer), Some("Shout"));
        assert_eq!(Renderer::fields(&renderer).len(), 1);
        let out = renderer
            .render(&CellValue::from("hi"), &defaults, None)
            .unwrap();
        assert_eq!(out, DisplayValue::text("hi!"));
    }
}
