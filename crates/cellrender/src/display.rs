//! Display values produced by renderers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::value::CellValue;

/// The fixed palette a decorated-text unit can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    #[default]
    Default,
    Green,
    Red,
    Blue,
    Orange,
    Gold,
    Purple,
    Gray,
}

impl TagColor {
    /// Every palette entry, in the order a color picker lists them.
    pub const ALL: [TagColor; 8] = [
        TagColor::Green,
        TagColor::Red,
        TagColor::Blue,
        TagColor::Orange,
        TagColor::Gold,
        TagColor::Purple,
        TagColor::Gray,
        TagColor::Default,
    ];

    /// Config identifier of the color.
    pub fn as_str(&self) -> &'static str {
        match self {
            TagColor::Default => "default",
            TagColor::Green => "green",
            TagColor::Red => "red",
            TagColor::Blue => "blue",
            TagColor::Orange => "orange",
            TagColor::Gold => "gold",
            TagColor::Purple => "purple",
            TagColor::Gray => "gray",
        }
    }

    /// Human-readable name for selectors.
    pub fn label(&self) -> &'static str {
        match self {
            TagColor::Default => "Default",
            TagColor::Green => "Green",
            TagColor::Red => "Red",
            TagColor::Blue => "Blue",
            TagColor::Orange => "Orange",
            TagColor::Gold => "Gold",
            TagColor::Purple => "Purple",
            TagColor::Gray => "Gray",
        }
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagColor {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        let color = match name.as_str() {
            "default" => TagColor::Default,
            "green" => TagColor::Green,
            "red" => TagColor::Red,
            "blue" => TagColor::Blue,
            "orange" => TagColor::Orange,
            "gold" => TagColor::Gold,
            "purple" => TagColor::Purple,
            // Also accept grey as an alias
            "gray" | "grey" => TagColor::Gray,
            _ => {
                return Err(RenderError::invalid_config(
                    "color",
                    format!("unknown color '{}'", s),
                ))
            }
        };
        Ok(color)
    }
}

/// What a renderer produces: plain text or a decorated-text unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayValue {
    Text { text: String },
    Tag { text: String, color: TagColor },
}

impl DisplayValue {
    /// Plain text display.
    pub fn text(text: impl Into<String>) -> Self {
        DisplayValue::Text { text: text.into() }
    }

    /// Text decorated with a palette color.
    pub fn tag(text: impl Into<String>, color: TagColor) -> Self {
        DisplayValue::Tag {
            text: text.into(),
            color,
        }
    }

    /// The text content, regardless of decoration.
    pub fn as_text(&self) -> &str {
        match self {
            DisplayValue::Text { text } | DisplayValue::Tag { text, .. } => text,
        }
    }

    /// The decoration color, if any.
    pub fn color(&self) -> Option<TagColor> {
        match self {
            DisplayValue::Text { .. } => None,
            DisplayValue::Tag { color, .. } => Some(*color),
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Result of the application pipeline.
///
/// `Raw` carries the input back unchanged when no renderer could be applied
/// at all, so the table can still show something.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    Display(DisplayValue),
    Raw(CellValue),
}

impl Rendered {
    /// Plain text for consumers that cannot show decorations.
    pub fn text(&self) -> String {
        match self {
            Rendered::Display(display) => display.as_text().to_string(),
            Rendered::Raw(value) => value.to_text(),
        }
    }

    /// Returns the display value if a renderer produced one.
    pub fn as_display(&self) -> Option<&DisplayValue> {
        match self {
            Rendered::Display(display) => Some(display),
            Rendered::Raw(_) => None,
        }
    }

    /// Returns `true` when the fallback chain gave back the raw input.
    pub fn is_raw(&self) -> bool {
        matches!(self, Rendered::Raw(_))
    }
}

impl From<DisplayValue> for Rendered {
    fn from(display: DisplayValue) -> Self {
        Rendered::Display(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_color_parse() {
        assert_eq!("GREEN".parse::<TagColor>().unwrap(), TagColor::Green);
        assert_eq!(" grey ".parse::<TagColor>().unwrap(), TagColor::Gray);
        assert!("teal".parse::<TagColor>().is_err());
    }

    #[test]
    fn test_tag_color_roundtrips_through_identifier() {
        for color in TagColor::ALL {
            assert_eq!(color.as_str().parse::<TagColor>().unwrap(), color);
        }
    }

    #[test]
    fn test_display_value_accessors() {
        let tag = DisplayValue::tag("Sim", TagColor::Green);
        assert_eq!(tag.as_text(), "Sim");
        assert_eq!(tag.color(), Some(TagColor::Green));
        assert_eq!(DisplayValue::text("x").color(), None);
    }

    #[test]
    fn test_display_value_serializes_with_kind() {
        let json = serde_json::to_value(DisplayValue::tag("Não", TagColor::Red)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "tag", "text": "Não", "color": "red"})
        );
    }

    #[test]
    fn test_rendered_text() {
        assert_eq!(Rendered::Raw(CellValue::Number(2.0)).text(), "2");
        assert_eq!(Rendered::from(DisplayValue::text("a")).text(), "a");
        assert!(Rendered::Raw(CellValue::Null).is_raw());
    }
}
