//! Date display patterns.
//!
//! Patterns use repeated letters for date fields, the way spreadsheet and
//! table tools write them:
//!
//! | Token | Meaning | Example |
//! |-------|---------|---------|
//! | `yyyy` / `yyy` | Year, zero-padded to the token length | `2024` |
//! | `yy` | Two-digit year | `24` |
//! | `y` | Year | `2024` |
//! | `MM` / `M` | Month, padded / unpadded | `03` / `3` |
//! | `dd` / `d` | Day of month | `09` / `9` |
//! | `HH` / `H` | Hour, 0-23 | `07` / `7` |
//! | `hh` / `h` | Hour, 1-12 | `07` / `7` |
//! | `mm` / `m` | Minute | `05` / `5` |
//! | `ss` / `s` | Second | `04` / `4` |
//! | `S`..`SSS` | Fraction of second | `123` |
//! | `a` | `AM` / `PM` | `PM` |
//!
//! Text between single quotes is copied verbatim and `''` produces a single
//! quote. Characters that are not ASCII letters are copied as-is. Any other
//! letter, or a token longer than listed, is rejected, so a typo never
//! silently renders as literal text.
//!
//! ```
//! use cellrender::renderers::pattern::DatePattern;
//! use chrono::{FixedOffset, TimeZone};
//!
//! let pattern = DatePattern::parse("dd/MM/yyyy 'at' HH:mm").unwrap();
//! let dt = FixedOffset::east_opt(0).unwrap()
//!     .with_ymd_and_hms(2024, 3, 9, 14, 5, 0)
//!     .unwrap();
//! assert_eq!(pattern.format(&dt), "09/03/2024 at 14:05");
//! ```

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use crate::error::RenderError;

/// Longest accepted year token.
const MAX_YEAR_WIDTH: usize = 4;

/// A date field the pattern refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
    Hour24,
    Hour12,
    Minute,
    Second,
    Fraction,
    Meridiem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Field { field: Field, width: usize },
}

/// A parsed date display pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    parts: Vec<Part>,
}

impl DatePattern {
    /// Parses `pattern`.
    ///
    /// # Errors
    ///
    /// [`RenderError::Format`] on an unsupported letter, an unsupported
    /// token length (e.g. `MMM`), or an unterminated quote.
    pub fn parse(pattern: &str) -> Result<Self, RenderError> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\'' {
                // '' outside a quoted section is a literal quote
                if chars.get(i + 1) == Some(&'\'') {
                    literal.push('\'');
                    i += 2;
                    continue;
                }
                i += 1;
                loop {
                    match chars.get(i) {
                        None => {
                            return Err(RenderError::Format(format!(
                                "unterminated quote in pattern '{}'",
                                pattern
                            )))
                        }
                        Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                            literal.push('\'');
                            i += 2;
                        }
                        Some('\'') => {
                            i += 1;
                            break;
                        }
                        Some(&other) => {
                            literal.push(other);
                            i += 1;
                        }
                    }
                }
                continue;
            }

            if !c.is_ascii_alphabetic() {
                literal.push(c);
                i += 1;
                continue;
            }

            let start = i;
            while i < chars.len() && chars[i] == c {
                i += 1;
            }
            let width = i - start;
            let field = field_for(c, width).ok_or_else(|| {
                RenderError::Format(format!(
                    "unsupported token '{}' in pattern '{}'",
                    c.to_string().repeat(width),
                    pattern
                ))
            })?;

            if !literal.is_empty() {
                parts.push(Part::Literal(std::mem::take(&mut literal)));
            }
            parts.push(Part::Field { field, width });
        }

        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Ok(Self { parts })
    }

    /// Formats `dt` in its own offset.
    pub fn format(&self, dt: &DateTime<FixedOffset>) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Field { field, width } => write_field(&mut out, dt, *field, *width),
            }
        }
        out
    }
}

/// Maps a token letter and its repeat count to a field.
fn field_for(letter: char, width: usize) -> Option<Field> {
    let field = match letter {
        'y' if width <= MAX_YEAR_WIDTH => Field::Year,
        'M' if width <= 2 => Field::Month,
        'd' if width <= 2 => Field::Day,
        'H' if width <= 2 => Field::Hour24,
        'h' if width <= 2 => Field::Hour12,
        'm' if width <= 2 => Field::Minute,
        's' if width <= 2 => Field::Second,
        'S' if width <= 3 => Field::Fraction,
        'a' if width <= 3 => Field::Meridiem,
        _ => return None,
    };
    Some(field)
}

fn write_field(out: &mut String, dt: &DateTime<FixedOffset>, field: Field, width: usize) {
    let width = width.min(MAX_YEAR_WIDTH);
    let padded = |n: u32| format!("{:0width$}", n, width = width);
    let text = match field {
        Field::Year if width == 2 => format!("{:02}", dt.year().rem_euclid(100)),
        Field::Year => {
            let year = dt.year();
            let digits = format!("{:0width$}", year.unsigned_abs(), width = width);
            if year < 0 {
                format!("-{}", digits)
            } else {
                digits
            }
        }
        Field::Month => padded(dt.month()),
        Field::Day => padded(dt.day()),
        Field::Hour24 => padded(dt.hour()),
        Field::Hour12 => padded(match dt.hour() % 12 {
            0 => 12,
            h => h,
        }),
        Field::Minute => padded(dt.minute()),
        Field::Second => padded(dt.second()),
        Field::Fraction => {
            let millis = format!("{:03}", dt.timestamp_subsec_millis().min(999));
            millis[..width.min(3)].to_string()
        }
        Field::Meridiem => String::from(if dt.hour() < 12 { "AM" } else { "PM" }),
    };
    out.push_str(&text);
}
