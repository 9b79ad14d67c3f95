//! Boolean-to-text renderer.

use serde_json::Value;

use crate::config::{bool_or, is_blank, require_str, ConfigMap};
use crate::display::{DisplayValue, TagColor};
use crate::error::RenderError;
use crate::field::{FieldDescriptor, FieldKind};
use crate::renderer::Renderer;
use crate::value::{CellValue, Record};

const TRUE_TEXT: &str = "Sim";
const FALSE_TEXT: &str = "Não";

/// Shows truthiness as configurable text, optionally as a colored tag.
///
/// Coercion: booleans as-is; strings are true when they equal `"true"`
/// (any case) or `"1"`; numbers are true when nonzero; everything else,
/// null included, is false.
///
/// | Option | Default |
/// |--------|---------|
/// | `trueText` | `"Sim"` |
/// | `falseText` | `"Não"` |
/// | `showAsTag` | `true` |
/// | `trueColor` | `"green"` |
/// | `falseColor` | `"red"` |
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanRenderer;

/// Interprets a raw value as a boolean.
pub fn coerce_bool(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(b) => *b,
        CellValue::Text(s) => s.eq_ignore_ascii_case("true") || s == "1",
        CellValue::Number(n) => *n != 0.0,
        _ => false,
    }
}

impl Renderer for BooleanRenderer {
    fn render(
        &self,
        value: &CellValue,
        config: &ConfigMap,
        _record: Option<&Record>,
    ) -> Result<DisplayValue, RenderError> {
        let (text_key, color_key, text_default, color_default) = if coerce_bool(value) {
            ("trueText", "trueColor", TRUE_TEXT, TagColor::Green)
        } else {
            ("falseText", "falseColor", FALSE_TEXT, TagColor::Red)
        };

        let text = require_str(config, text_key, text_default)?;
        if !bool_or(config, "showAsTag", true) {
            return Ok(DisplayValue::text(text));
        }

        let color = match require_str(config, color_key, color_default.as_str())? {
            name if name.is_empty() => color_default,
            name => name.parse::<TagColor>().map_err(|_| {
                RenderError::invalid_config(color_key, format!("unknown color '{}'", name))
            })?,
        };
        Ok(DisplayValue::tag(text, color))
    }

    fn label(&self) -> Option<&str> {
        Some("Boolean")
    }

    fn description(&self) -> &str {
        "Shows true/false values as text or a colored tag"
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        let shows_tag = |config: &ConfigMap| bool_or(config, "showAsTag", true);

        let mut true_color = FieldDescriptor::new("trueColor", "True color", FieldKind::Select)
            .default_value(TagColor::Green.as_str())
            .visible_when(shows_tag);
        let mut false_color = FieldDescriptor::new("falseColor", "False color", FieldKind::Select)
            .default_value(TagColor::Red.as_str())
            .visible_when(shows_tag);
        for color in TagColor::ALL {
            true_color = true_color.option(color.as_str(), color.label());
            false_color = false_color.option(color.as_str(), color.label());
        }

        vec![
            FieldDescriptor::new("trueText", "Text for true", FieldKind::Text)
                .default_value(TRUE_TEXT),
            FieldDescriptor::new("falseText", "Text for false", FieldKind::Text)
                .default_value(FALSE_TEXT),
            FieldDescriptor::new("showAsTag", "Show as tag", FieldKind::Checkbox)
                .default_value(true),
            true_color,
            false_color,
        ]
    }

    fn default_config(&self) -> ConfigMap {
        let mut config = ConfigMap::new();
        config.insert("trueText".into(), Value::from(TRUE_TEXT));
        config.insert("falseText".into(), Value::from(FALSE_TEXT));
        config.insert("showAsTag".into(), Value::Bool(true));
        config.insert("trueColor".into(), Value::from(TagColor::Green.as_str()));
        config.insert("falseColor".into(), Value::from(TagColor::Red.as_str()));
        config
    }

    fn validate(&self, config: &ConfigMap) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank(config, "trueText") {
            errors.push("true text is required".to_string());
        }
        if is_blank(config, "falseText") {
            errors.push("false text is required".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn merged(overrides: Value) -> ConfigMap {
        let mut config = BooleanRenderer.default_config();
        if let Value::Object(obj) = overrides {
            config.extend(obj);
        }
        config
    }

    fn render(value: CellValue, overrides: Value) -> DisplayValue {
        BooleanRenderer
            .render(&value, &merged(overrides), None)
            .unwrap()
    }

    #[test]
    fn test_coercion_rules() {
        assert!(coerce_bool(&CellValue::Bool(true)));
        assert!(coerce_bool(&CellValue::from("TRUE")));
        assert!(coerce_bool(&CellValue::from("1")));
        assert!(!coerce_bool(&CellValue::from("yes")));
        assert!(!coerce_bool(&CellValue::from(" true")));
        assert!(coerce_bool(&CellValue::from(-2)));
        assert!(!coerce_bool(&CellValue::from(0)));
        assert!(!coerce_bool(&CellValue::Null));
        assert!(!coerce_bool(&CellValue::from(json!([true]))));
    }

    #[test]
    fn test_default_output_is_tagged() {
        assert_eq!(
            render(CellValue::Bool(true), json!({})),
            DisplayValue::tag("Sim", TagColor::Green)
        );
        assert_eq!(
            render(CellValue::from(0), json!({})),
            DisplayValue::tag("Não", TagColor::Red)
        );
        assert_eq!(render(CellValue::from("TRUE"), json!({})).as_text(), "Sim");
        assert_eq!(render(CellValue::Null, json!({})).as_text(), "Não");
    }

    #[test]
    fn test_plain_text_mode() {
        assert_eq!(
            render(CellValue::Bool(true), json!({"showAsTag": false, "trueText": "Yes"})),
            DisplayValue::text("Yes")
        );
    }

    #[test]
    fn test_custom_colors() {
        assert_eq!(
            render(CellValue::Bool(false), json!({"falseColor": "Gray"})),
            DisplayValue::tag("Não", TagColor::Gray)
        );
    }

    #[test]
    fn test_unknown_color_is_an_error() {
        let result = BooleanRenderer.render(
            &CellValue::Bool(true),
            &merged(json!({"trueColor": "teal"})),
            None,
        );
        assert!(matches!(result, Err(RenderError::InvalidConfig { .. })));
    }

    #[test]
    fn test_non_string_text_is_an_error() {
        let result = BooleanRenderer.render(
            &CellValue::Bool(true),
            &merged(json!({"trueText": 5})),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_color_fields_only_visible_as_tag() {
        let fields = BooleanRenderer.fields();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["trueText", "falseText", "showAsTag", "trueColor", "falseColor"]
        );

        let plain = merged(json!({"showAsTag": false}));
        let tagged = merged(json!({}));
        for field in &fields {
            let is_color = field.name.ends_with("Color");
            assert_eq!(field.is_visible(&plain), !is_color);
            assert!(field.is_visible(&tagged));
        }
    }

    #[test]
    fn test_validate_requires_both_texts() {
        let errors = BooleanRenderer.validate(&ConfigMap::new());
        assert_eq!(errors, vec!["true text is required", "false text is required"]);

        let errors = BooleanRenderer.validate(&merged(json!({"falseText": ""})));
        assert_eq!(errors, vec!["false text is required"]);
    }
}
