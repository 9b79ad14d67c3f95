//! The pass-through renderer.

use crate::config::ConfigMap;
use crate::display::DisplayValue;
use crate::error::RenderError;
use crate::renderer::Renderer;
use crate::value::{CellValue, Record};

/// Placeholder shown when a structured value cannot be encoded.
pub(crate) const OBJECT_PLACEHOLDER: &str = "[Object]";

/// Shows the value as-is.
///
/// Null becomes an empty string, lists and maps are encoded as JSON, and
/// every other scalar keeps its natural text form. Options are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl Renderer for DefaultRenderer {
    fn render(
        &self,
        value: &CellValue,
        _config: &ConfigMap,
        _record: Option<&Record>,
    ) -> Result<DisplayValue, RenderError> {
        let text = match value {
            CellValue::Null => String::new(),
            CellValue::List(_) | CellValue::Map(_) => {
                serde_json::to_string(value).unwrap_or_else(|_| OBJECT_PLACEHOLDER.to_string())
            }
            scalar => scalar.to_text(),
        };
        Ok(DisplayValue::text(text))
    }

    fn label(&self) -> Option<&str> {
        Some("Default")
    }

    fn description(&self) -> &str {
        "Shows the value as it is"
    }
}
