//! The application pipeline.
//!
//! Resolves a render request through the registry and always produces
//! something to show:
//!
//! ```text
//! no config / no type  → default renderer → raw value
//! type                 → registered renderer → default renderer → raw value
//! error or panic       → default renderer on the raw value → raw value
//! ```
//!
//! Misses and failures are reported through the registry's
//! [`RenderEvents`](crate::events::RenderEvents) sink and never returned to
//! the caller.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::config::{merge_config, ConfigMap, RenderConfig};
use crate::display::{DisplayValue, Rendered};
use crate::error::RenderError;
use crate::registry::{RendererRegistry, DEFAULT_RENDERER};
use crate::renderer::Renderer;
use crate::value::{CellValue, Record};

impl RendererRegistry {
    /// Renders `value` according to `config`.
    ///
    /// The renderer's default configuration is merged under the options in
    /// `config`. This never fails: when no renderer can produce a display,
    /// the raw value is returned as [`Rendered::Raw`].
    pub fn apply(
        &self,
        value: &CellValue,
        config: Option<&RenderConfig>,
        record: Option<&Record>,
    ) -> Rendered {
        let (renderer_type, config) = match config {
            Some(config) => match config.renderer_type() {
                Some(renderer_type) => (renderer_type, config),
                None => return self.render_default(value, record),
            },
            None => return self.render_default(value, record),
        };

        let exact = self.has(renderer_type);
        let Some(renderer) = self.get(renderer_type) else {
            self.events().renderer_not_found(renderer_type, false);
            return Rendered::Raw(value.clone());
        };
        if !exact {
            self.events().renderer_not_found(renderer_type, true);
        }

        let merged = merge_config(&renderer.default_config(), &config.config);
        match render_caught(renderer.as_ref(), value, &merged, record) {
            Ok(display) => display.into(),
            Err(err) => {
                let failed = if exact { renderer_type } else { DEFAULT_RENDERER };
                self.events().render_failed(failed, &err);
                if failed == DEFAULT_RENDERER {
                    Rendered::Raw(value.clone())
                } else {
                    self.render_default(value, record)
                }
            }
        }
    }

    /// Renders through the default renderer with its own default options.
    fn render_default(&self, value: &CellValue, record: Option<&Record>) -> Rendered {
        let Some(renderer) = self.lookup(DEFAULT_RENDERER) else {
            return Rendered::Raw(value.clone());
        };
        match render_caught(renderer.as_ref(), value, &renderer.default_config(), record) {
            Ok(display) => display.into(),
            Err(err) => {
                self.events().render_failed(DEFAULT_RENDERER, &err);
                Rendered::Raw(value.clone())
            }
        }
    }
}

/// Runs `renderer`, turning a panic into [`RenderError::Other`].
fn render_caught(
    renderer: &dyn Renderer,
    value: &CellValue,
    config: &ConfigMap,
    record: Option<&Record>,
) -> Result<DisplayValue, RenderError> {
    panic::catch_unwind(AssertUnwindSafe(|| renderer.render(value, config, record)))
        .unwrap_or_else(|payload| Err(RenderError::Other(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause");
    format!("renderer panicked: {}", detail)
}

/// Free-function form of [`RendererRegistry::apply`].
pub fn apply_renderer(
    registry: &RendererRegistry,
    value: &CellValue,
    config: Option<&RenderConfig>,
    record: Option<&Record>,
) -> Rendered {
    registry.apply(value, config, record)
}
