//! Date-to-text renderer.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde_json::Value;

use crate::config::{is_blank, require_str, ConfigMap};
use crate::display::DisplayValue;
use crate::error::RenderError;
use crate::field::{FieldDescriptor, FieldKind};
use crate::renderer::Renderer;
use crate::renderers::pattern::DatePattern;
use crate::value::{CellValue, Record};

const DEFAULT_FORMAT: &str = "dd/MM/yyyy HH:mm";
const DEFAULT_INVALID_TEXT: &str = "-";
const DEFAULT_EMPTY_TEXT: &str = "-";

/// Largest timestamp, in milliseconds either side of the epoch, that is
/// accepted as a date (±100,000,000 days).
const MAX_TIMESTAMP_MS: f64 = 8.64e15;

/// Common patterns offered by the `format` selector, with a sample of each.
pub const DATE_FORMATS: &[(&str, &str)] = &[
    ("dd/MM/yyyy HH:mm", "31/12/2024 23:59"),
    ("dd/MM/yyyy", "31/12/2024"),
    ("dd/MM/yyyy HH:mm:ss", "31/12/2024 23:59:59"),
    ("yyyy-MM-dd", "2024-12-31"),
    ("yyyy-MM-dd HH:mm:ss", "2024-12-31 23:59:59"),
    ("MM/dd/yyyy", "12/31/2024"),
    ("HH:mm", "23:59"),
];

/// Formats dates through a configurable pattern.
///
/// Accepts native date-times, ISO-8601 strings and epoch milliseconds. All
/// dates are shown in the renderer's reference offset (UTC unless built with
/// [`DateRenderer::with_offset`]).
///
/// | Option | Default |
/// |--------|---------|
/// | `format` | `"dd/MM/yyyy HH:mm"` (see [`pattern`](crate::renderers::pattern)) |
/// | `invalidText` | `"-"` |
/// | `emptyText` | `"-"` |
#[derive(Debug, Clone, Copy)]
pub struct DateRenderer {
    offset: FixedOffset,
}

impl Default for DateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DateRenderer {
    /// Creates a renderer showing dates in UTC.
    pub fn new() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Creates a renderer showing dates in `offset`.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Interprets a raw value as a date. `None` when it is not one.
    pub fn parse(&self, value: &CellValue) -> Option<DateTime<FixedOffset>> {
        let parsed = match value {
            CellValue::DateTime(dt) => Some(*dt),
            CellValue::Text(s) => self.parse_iso(s),
            CellValue::Number(ms) => parse_millis(*ms),
            _ => None,
        };
        parsed.map(|dt| dt.with_timezone(&self.offset))
    }

    fn parse_iso(&self, s: &str) -> Option<DateTime<FixedOffset>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt);
        }

        // Zone designators without seconds, or in basic `+hhmm` form
        let zoned = match s.strip_suffix(['Z', 'z']) {
            Some(rest) => format!("{}+00:00", rest),
            None => s.to_string(),
        };
        for layout in OFFSET_LAYOUTS {
            if let Ok(dt) = DateTime::parse_from_str(&zoned, layout) {
                return Some(dt);
            }
        }

        // Date-times without an offset are local to the reference offset
        for layout in LOCAL_LAYOUTS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
                return self.offset.from_local_datetime(&naive).single();
            }
        }

        // Date-only forms, down to year-month and year, are UTC midnight
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| parse_reduced_date(s))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
    }
}

/// Date-time layouts carrying a UTC offset (`+hh:mm`, `+hhmm` or `+hh`).
const OFFSET_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Date-time layouts without an offset.
const LOCAL_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses the reduced-precision forms `yyyy-MM` and `yyyy` as the first day
/// of the period.
fn parse_reduced_date(s: &str) -> Option<NaiveDate> {
    let (year, month) = match s.split_once('-') {
        Some((year, month)) => (year, Some(month)),
        None => (s, None),
    };
    let is_digits = |part: &str, len: usize| {
        part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
    };

    if !is_digits(year, 4) {
        return None;
    }
    let month = match month {
        None => 1,
        Some(month) if is_digits(month, 2) => month.parse().ok()?,
        Some(_) => return None,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

fn parse_millis(ms: f64) -> Option<DateTime<FixedOffset>> {
    if !ms.is_finite() || ms.abs() > MAX_TIMESTAMP_MS {
        return None;
    }
    Utc.timestamp_millis_opt(ms.trunc() as i64)
        .single()
        .map(|dt| dt.fixed_offset())
}

fn is_empty(value: &CellValue) -> bool {
    match value {
        CellValue::Null => true,
        CellValue::Text(s) => s.is_empty(),
        _ => false,
    }
}

impl Renderer for DateRenderer {
    fn render(
        &self,
        value: &CellValue,
        config: &ConfigMap,
        _record: Option<&Record>,
    ) -> Result<DisplayValue, RenderError> {
        if is_empty(value) {
            let empty_text = require_str(config, "emptyText", DEFAULT_EMPTY_TEXT)?;
            return Ok(DisplayValue::text(empty_text));
        }

        let invalid_text = require_str(config, "invalidText", DEFAULT_INVALID_TEXT)?;
        let Some(dt) = self.parse(value) else {
            return Ok(DisplayValue::text(invalid_text));
        };

        let text = require_str(config, "format", DEFAULT_FORMAT)
            .and_then(DatePattern::parse)
            .map(|pattern| pattern.format(&dt))
            .unwrap_or_else(|_| invalid_text.to_string());
        Ok(DisplayValue::text(text))
    }

    fn label(&self) -> Option<&str> {
        Some("Date")
    }

    fn description(&self) -> &str {
        "Formats dates, ISO strings and timestamps with a pattern"
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        let mut format = FieldDescriptor::new("format", "Format", FieldKind::Select)
            .default_value(DEFAULT_FORMAT);
        for (pattern, sample) in DATE_FORMATS {
            format = format.option(*pattern, format!("{} ({})", pattern, sample));
        }

        vec![
            format,
            FieldDescriptor::new("invalidText", "Text for invalid dates", FieldKind::Text)
                .default_value(DEFAULT_INVALID_TEXT),
            FieldDescriptor::new("emptyText", "Text for empty values", FieldKind::Text)
                .default_value(DEFAULT_EMPTY_TEXT),
        ]
    }

    fn default_config(&self) -> ConfigMap {
        let mut config = ConfigMap::new();
        config.insert("format".into(), Value::from(DEFAULT_FORMAT));
        config.insert("invalidText".into(), Value::from(DEFAULT_INVALID_TEXT));
        config.insert("emptyText".into(), Value::from(DEFAULT_EMPTY_TEXT));
        config
    }

    fn validate(&self, config: &ConfigMap) -> Vec<String> {
        if is_blank(config, "format") {
            vec!["date format is required".to_string()]
        } else {
            Vec::new()
        }
    }
}
