//! Built-in renderers.
//!
//! | Type | Renderer | Output |
//! |------|----------|--------|
//! | `default` | [`DefaultRenderer`] | The value as text; structured values as JSON |
//! | `boolean` | [`BooleanRenderer`] | Configurable yes/no text, optionally as a colored tag |
//! | `date` | [`DateRenderer`] | Dates, ISO strings and epoch milliseconds through a pattern |

mod boolean;
mod date;
mod default;
pub mod pattern;

pub use boolean::BooleanRenderer;
pub use date::{DateRenderer, DATE_FORMATS};
pub use default::DefaultRenderer;

use std::sync::Arc;

use crate::error::RegistryError;
use crate::registry::{RendererRegistry, DEFAULT_RENDERER};
use crate::renderer::Renderer;

/// Registry key of [`BooleanRenderer`].
pub const BOOLEAN_RENDERER: &str = "boolean";

/// Registry key of [`DateRenderer`].
pub const DATE_RENDERER: &str = "date";

/// The built-in renderers under their standard keys, in registration order.
pub fn builtins() -> Vec<(&'static str, Arc<dyn Renderer>)> {
    vec![
        (DEFAULT_RENDERER, Arc::new(DefaultRenderer) as Arc<dyn Renderer>),
        (BOOLEAN_RENDERER, Arc::new(BooleanRenderer) as Arc<dyn Renderer>),
        (DATE_RENDERER, Arc::new(DateRenderer::new()) as Arc<dyn Renderer>),
    ]
}

/// Registers the built-in renderers under their standard keys.
///
/// # Errors
///
/// [`RegistryError::Duplicate`] when the registry uses
/// [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject) and one of
/// the keys is already taken. Built-ins before the colliding key stay
/// registered.
pub fn register_builtins(registry: &mut RendererRegistry) -> Result<(), RegistryError> {
    for (renderer_type, renderer) in builtins() {
        registry.register_arc(renderer_type, renderer)?;
    }
    Ok(())
}
