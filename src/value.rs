//! Typed field values.
//!
//! A [`Value`] is the content held by a single field node. Values are closed:
//! every field kind stores one of these variants, and the coercion table in
//! [`crate::coerce`] is the only way raw user input becomes a `Value`.

use std::{cmp::Ordering, fmt};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display precision of `Month` values (`YYYY-MM`).
pub const MONTH_FORMAT: &str = "%Y-%m";
/// Display precision of `Date` values (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Display precision of `LocalTime` values (`YYYY-MM-DDTHH:MM:SS.sss`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

const MONTH_PREFIX: usize = 7;
const DATE_PREFIX: usize = 10;
const DATETIME_PREFIX: usize = 23;

// ============================================================================
// FILE HANDLES
// ============================================================================

/// An opaque handle to a file chosen by the user.
///
/// The engine never reads file contents; it only compares sizes and checks
/// MIME types against a field's `accept` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }

    /// Returns true if this file's MIME type satisfies an accept pattern.
    ///
    /// Patterns are either exact types (`application/pdf`) or a wildcard
    /// subtype (`image/*`). Matching is case-insensitive.
    pub fn matches_accept(&self, pattern: &str) -> bool {
        let mime = self.mime.to_ascii_lowercase();
        let pattern = pattern.trim().to_ascii_lowercase();
        match pattern.strip_suffix("/*") {
            Some(family) => mime
                .split_once('/')
                .is_some_and(|(major, _)| major == family),
            None => mime == pattern,
        }
    }
}

// ============================================================================
// VALUE
// ============================================================================

/// The typed content of a field.
///
/// # Examples
///
/// ```rust
/// use formtree::value::Value;
/// let v = Value::Integer(3);
/// assert_eq!(v.type_name(), "Integer");
/// assert_eq!(v.display_string(), Some("3".to_string()));
/// assert!(Value::default().is_blank());
/// assert_eq!(Value::Boolean(true).display_string(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    /// First instant of a calendar month.
    Month(NaiveDateTime),
    /// Midnight of a calendar day.
    Date(NaiveDateTime),
    LocalTime(NaiveDateTime),
    Boolean(bool),
    /// User-typed text that did not resolve against a strict option set.
    /// Never blank.
    Provisional(String),
    File(FileHandle),
    /// The universal "no value" sentinel, distinct from an empty string.
    #[default]
    Blank,
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "Text",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Month(_) => "Month",
            Value::Date(_) => "Date",
            Value::LocalTime(_) => "LocalTime",
            Value::Boolean(_) => "Boolean",
            Value::Provisional(_) => "Provisional",
            Value::File(_) => "File",
            Value::Blank => "Blank",
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Blank)
    }

    pub fn is_provisional(&self) -> bool {
        matches!(self, Value::Provisional(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats; nothing else does.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Month(t) | Value::Date(t) | Value::LocalTime(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            Value::File(f) => Some(f),
            _ => None,
        }
    }

    /// Renders the value as the string an input control would display.
    ///
    /// Booleans never render (checked state is attribute-driven), neither do
    /// files or blanks.
    pub fn display_string(&self) -> Option<String> {
        match self {
            Value::Text(s) | Value::Provisional(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Month(t) => Some(t.format(MONTH_FORMAT).to_string()),
            Value::Date(t) => Some(t.format(DATE_FORMAT).to_string()),
            Value::LocalTime(t) => Some(t.format(DATETIME_FORMAT).to_string()),
            Value::Boolean(_) | Value::File(_) | Value::Blank => None,
        }
    }

    /// Numeric projection used for ordering: numbers as-is, times as epoch
    /// milliseconds, files by byte size.
    fn ordinal(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Month(t) | Value::Date(t) | Value::LocalTime(t) => {
                Some(t.and_utc().timestamp_millis() as f64)
            }
            Value::File(f) => Some(f.size as f64),
            _ => None,
        }
    }

    /// Compares two values, or returns `None` when they are incomparable.
    ///
    /// Only numerically coercible variants (`Integer`, `Float`, time-like
    /// values, `File`) have an ordering.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        if let (Value::Integer(a), Value::Integer(b)) = (self, other) {
            return Some(a.cmp(b));
        }
        self.ordinal()?.partial_cmp(&other.ordinal()?)
    }

    /// Encodes the value as a JSON leaf.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Text(s) | Value::Provisional(s) => Json::String(s.clone()),
            Value::Integer(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Month(_) | Value::Date(_) | Value::LocalTime(_) => {
                self.display_string().map(Json::String).unwrap_or(Json::Null)
            }
            Value::Boolean(b) => Json::Bool(*b),
            Value::File(f) => Json::String(f.name.clone()),
            Value::Blank => Json::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::File(file) => write!(f, "{} ({} bytes)", file.name, file.size),
            other => write!(f, "{}", other.display_string().unwrap_or_default()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

// ============================================================================
// ISO-8601 PREFIX PARSING
// ============================================================================

fn prefix(raw: &str, len: usize) -> String {
    raw.trim().chars().take(len).collect()
}

/// Parses a `YYYY-MM` prefix into the first instant of that month.
pub fn parse_month(raw: &str) -> Option<NaiveDateTime> {
    let month = prefix(raw, MONTH_PREFIX);
    NaiveDate::parse_from_str(&format!("{month}-01"), DATE_FORMAT)
        .ok()?
        .and_hms_opt(0, 0, 0)
}

/// Parses a `YYYY-MM-DD` prefix into midnight of that day.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(&prefix(raw, DATE_PREFIX), DATE_FORMAT)
        .ok()?
        .and_hms_opt(0, 0, 0)
}

/// Parses a local date-time prefix with minute, second or millisecond
/// precision.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let stamp = prefix(raw, DATETIME_PREFIX);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&stamp, format).ok())
}
