//! # cellrender - Configurable Cell Rendering
//!
//! `cellrender` turns raw table values into display values according to a
//! declarative, serializable configuration. Which renderer a column uses,
//! and how it is tuned, is data rather than code: the configuration can come
//! from a settings store, a file, or a configuration wizard.
//!
//! ## Core Concepts
//!
//! - [`Renderer`]: Turns a [`CellValue`] plus options into a [`DisplayValue`]
//! - [`RendererRegistry`]: Maps type identifiers to renderers, with fallback
//!   to the `default` renderer
//! - [`RenderConfig`]: The persisted `{type, config}` pair selecting a renderer
//! - [`RendererRegistry::apply`]: Renders a value, never failing
//! - [`RendererRegistry::validate`]: Checks a config before it is saved
//! - [`column_renderer`]: Per-cell callback for table components
//!
//! ## Quick Start
//!
//! ```rust
//! use cellrender::{CellValue, DisplayValue, RenderConfig, RendererRegistry, TagColor};
//!
//! let registry = RendererRegistry::with_builtins();
//!
//! let active = RenderConfig::new("boolean");
//! let shown = registry.apply(&CellValue::from("true"), Some(&active), None);
//! assert_eq!(
//!     shown.as_display(),
//!     Some(&DisplayValue::tag("Sim", TagColor::Green))
//! );
//!
//! let created = RenderConfig::new("date").with("format", "yyyy-MM-dd");
//! let shown = registry.apply(&CellValue::from(0), Some(&created), None);
//! assert_eq!(shown.text(), "1970-01-01");
//! ```
//!
//! ## Built-in Renderers
//!
//! | Type | Shows |
//! |------|-------|
//! | `default` | The value as text; lists and maps as JSON; null as empty |
//! | `boolean` | `trueText`/`falseText`, optionally as a colored tag |
//! | `date` | Dates, ISO strings and epoch milliseconds through a pattern |
//!
//! ## Custom Renderers
//!
//! Implement [`Renderer`], or wrap a closure with [`renderer_fn`]:
//!
//! ```rust
//! use cellrender::{renderer_fn, CellValue, DisplayValue, RenderConfig, RendererRegistry};
//!
//! let mut registry = RendererRegistry::with_builtins();
//! registry
//!     .register(
//!         "percent",
//!         renderer_fn(|value, _config, _record| match value {
//!             CellValue::Number(n) => Ok(DisplayValue::text(format!("{:.1}%", n * 100.0))),
//!             other => Ok(DisplayValue::text(other.to_text())),
//!         })
//!         .label("Percentage"),
//!     )
//!     .unwrap();
//!
//! let shown = registry.apply(&CellValue::from(0.25), Some(&RenderConfig::new("percent")), None);
//! assert_eq!(shown.text(), "25.0%");
//! ```
//!
//! ## Failure Handling
//!
//! Registration errors are returned to the caller. Everything on the render
//! path degrades instead: an unknown type falls back to the `default`
//! renderer, a failing renderer is replaced by the `default` renderer on the
//! raw value, and when no renderer is left the raw value comes back as
//! [`Rendered::Raw`]. Each miss or failure is reported once through the
//! registry's [`RenderEvents`] sink, which logs through `tracing` unless
//! replaced.

mod apply;
mod column;
mod config;
mod display;
mod error;
mod events;
mod field;
pub mod prelude;
mod registry;
mod renderer;
pub mod renderers;
mod validate;
mod value;

// Error types
pub use error::{ConfigError, RegistryError, RenderError};

// Values in and out
pub use display::{DisplayValue, Rendered, TagColor};
pub use value::{format_number, CellValue, Record};

// Configuration
pub use config::{merge_config, ConfigMap, RenderConfig};
pub use field::{FieldDescriptor, FieldKind, FieldOption, VisibilityFn};

// Renderer contract and registry
pub use registry::{DuplicatePolicy, RendererInfo, RendererRegistry, DEFAULT_RENDERER};
pub use renderer::{renderer_fn, FnRenderer, RenderFn, Renderer};
pub use renderers::{BooleanRenderer, DateRenderer, DefaultRenderer};

// Pipelines
pub use apply::apply_renderer;
pub use column::{column_renderer, CellRenderFn, ColumnConfig, ColumnSet};
pub use validate::{validate_render_config, ValidationReport};

// Event reporting
pub use events::{NoopEvents, RecordingEvents, RenderEvent, RenderEvents, TracingEvents};
