//! Raw cell values.
//!
//! [`CellValue`] is what the table hands to a renderer: whatever came out of
//! the external data source, plus native date-times for sources that already
//! parsed them.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Serialize, Serializer};

/// A full row, passed to renderers that need context beyond their own cell.
pub type Record = BTreeMap<String, CellValue>;

/// A raw, untyped cell value.
///
/// `Null` covers both an explicit null and an absent field.
///
/// # Example
///
/// ```
/// use cellrender::CellValue;
/// use serde_json::json;
///
/// let value = CellValue::from(json!({"id": 7, "tags": ["a", "b"]}));
/// assert!(value.is_structured());
/// assert_eq!(CellValue::from(json!(null)), CellValue::Null);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    DateTime(DateTime<FixedOffset>),
    List(Vec<CellValue>),
    Map(BTreeMap<String, CellValue>),
}

impl CellValue {
    /// Returns `true` for null/absent values.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns `true` for list and map values.
    pub fn is_structured(&self) -> bool {
        matches!(self, CellValue::List(_) | CellValue::Map(_))
    }

    /// Name of the value's shape, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "string",
            CellValue::DateTime(_) => "datetime",
            CellValue::List(_) => "list",
            CellValue::Map(_) => "map",
        }
    }

    /// Plain text form of the value.
    ///
    /// Structured values are encoded as compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::DateTime(dt) => dt.to_rfc3339(),
            CellValue::List(_) | CellValue::Map(_) => {
                serde_json::to_string(self).unwrap_or_else(|_| "[Object]".to_string())
            }
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::DateTime(dt) => dt.serialize(serializer),
            CellValue::List(items) => serializer.collect_seq(items),
            CellValue::Map(map) => serializer.collect_map(map),
        }
    }
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15
}

/// Formats a number the way a table shows it.
///
/// Integral values drop the fractional part, non-finite values use their
/// conventional names.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        String::from(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if is_integral(n) {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => CellValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => CellValue::Text(s),
            Value::Array(items) => CellValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(obj) => {
                CellValue::Map(obj.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for CellValue {
    fn from(dt: DateTime<Tz>) -> Self {
        CellValue::DateTime(dt.fixed_offset())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for CellValue {
    fn from(items: Vec<T>) -> Self {
        CellValue::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(CellValue::from(json!(true)), CellValue::Bool(true));
        assert_eq!(CellValue::from(json!(3)), CellValue::Number(3.0));
        assert_eq!(CellValue::from(json!("x")), CellValue::Text("x".into()));
    }

    #[test]
    fn test_from_json_nested() {
        let value = CellValue::from(json!({"a": [1, null]}));
        let mut expected = BTreeMap::new();
        expected.insert(
            "a".to_string(),
            CellValue::List(vec![CellValue::Number(1.0), CellValue::Null]),
        );
        assert_eq!(value, CellValue::Map(expected));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(CellValue::from(None::<&str>), CellValue::Null);
        assert_eq!(CellValue::from(Some(2)), CellValue::Number(2.0));
    }

    #[test]
    fn test_from_datetime_keeps_instant() {
        let utc = Utc.timestamp_millis_opt(0).unwrap();
        match CellValue::from(utc) {
            CellValue::DateTime(dt) => assert_eq!(dt.timestamp_millis(), 0),
            other => panic!("Expected DateTime, got {:?}", other),
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_to_text_structured_is_json() {
        let value = CellValue::from(json!({"b": 1, "a": "x"}));
        assert_eq!(value.to_text(), r#"{"a":"x","b":1}"#);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(CellValue::Null.type_name(), "null");
        assert_eq!(CellValue::from("s").type_name(), "string");
    }
}
