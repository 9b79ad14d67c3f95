//! Field descriptors for configuration forms.
//!
//! Each renderer describes its options as an ordered list of
//! [`FieldDescriptor`]s. The order is the order a configuration UI shows
//! them in; rendering never looks at it.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::ConfigMap;

/// Predicate deciding whether a field is shown for the current options.
pub type VisibilityFn = Arc<dyn Fn(&ConfigMap) -> bool + Send + Sync>;

/// Input control used for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Checkbox,
    Select,
}

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldOption {
    pub value: Value,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Describes one configuration input of a renderer.
///
/// # Example
///
/// ```
/// use cellrender::{ConfigMap, FieldDescriptor, FieldKind};
///
/// let field = FieldDescriptor::new("trueColor", "True color", FieldKind::Select)
///     .default_value("green")
///     .visible_when(|config| config.get("showAsTag").and_then(|v| v.as_bool()) == Some(true));
///
/// let mut config = ConfigMap::new();
/// assert!(!field.is_visible(&config));
/// config.insert("showAsTag".into(), true.into());
/// assert!(field.is_visible(&config));
/// ```
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub default_value: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(rename = "conditional", serialize_with = "serialize_is_some")]
    pub visible_when: Option<VisibilityFn>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            default_value: Value::Null,
            options: Vec::new(),
            visible_when: None,
        }
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn option(mut self, value: impl Into<Value>, label: impl Into<String>) -> Self {
        self.options.push(FieldOption::new(value, label));
        self
    }

    pub fn visible_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&ConfigMap) -> bool + Send + Sync + 'static,
    {
        self.visible_when = Some(Arc::new(predicate));
        self
    }

    /// Evaluates the visibility predicate; fields without one are always shown.
    pub fn is_visible(&self, config: &ConfigMap) -> bool {
        self.visible_when
            .as_ref()
            .map_or(true, |predicate| predicate(config))
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("default_value", &self.default_value)
            .field("options", &self.options)
            .field("conditional", &self.visible_when.is_some())
            .finish()
    }
}

fn serialize_is_some<S: serde::Serializer>(
    predicate: &Option<VisibilityFn>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(predicate.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_without_predicate_is_visible() {
        let field = FieldDescriptor::new("format", "Format", FieldKind::Text);
        assert!(field.is_visible(&ConfigMap::new()));
    }

    #[test]
    fn test_field_serializes_for_forms() {
        let field = FieldDescriptor::new("color", "Color", FieldKind::Select)
            .default_value("green")
            .option("green", "Green")
            .visible_when(|_| false);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            json!({
                "name": "color",
                "label": "Color",
                "kind": "select",
                "defaultValue": "green",
                "options": [{"value": "green", "label": "Green"}],
                "conditional": true
            })
        );
    }

    #[test]
    fn test_debug_hides_predicate() {
        let field = FieldDescriptor::new("a", "A", FieldKind::Checkbox).visible_when(|_| true);
        assert!(format!("{:?}", field).contains("conditional: true"));
    }
}
