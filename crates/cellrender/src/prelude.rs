//! Prelude for convenient imports.
//!
//! Re-exports the types most applications need to render table cells:
//!
//! ```rust
//! use cellrender::prelude::*;
//!
//! let registry = RendererRegistry::with_builtins();
//! let config = RenderConfig::new("date");
//! let shown = registry.apply(&CellValue::Null, Some(&config), None);
//! assert_eq!(shown.text(), "-");
//! ```

// Values
pub use crate::{CellValue, DisplayValue, Record, Rendered, TagColor};

// Configuration
pub use crate::{ColumnConfig, ColumnSet, ConfigMap, RenderConfig};

// Registry and renderers
pub use crate::{renderer_fn, Renderer, RendererRegistry};
