//! Raw string to [`Value`] coercion.
//!
//! Used for every string that enters the tree: keystrokes through
//! `ValueChanged` and string-shaped leaves pushed in by the JSON bridge.

use crate::{
    tree::{Attributes, FieldKind, Identifier},
    value::{self, Value},
};

/// Coerces raw input according to the field's kind.
///
/// | kind | coercion |
/// |---|---|
/// | text, email, url, password | non-blank string, else blank |
/// | textarea | non-empty string (whitespace counts), else blank |
/// | strict autocomplete | option label match, else provisional (blank stays blank) |
/// | integer / float | parsed number, else blank |
/// | month / date / datetime | ISO-8601 prefix of matching precision, else blank |
/// | select / radio | index into the options, else blank |
/// | checkbox | `"true"` / `"false"`, else blank |
/// | file / group / repeatable | always blank |
pub fn coerce<Id: Identifier>(attributes: &Attributes<Id>, raw: &str) -> Value {
    match &attributes.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Url | FieldKind::Password => {
            non_blank(raw).map(Value::text).unwrap_or(Value::Blank)
        }
        FieldKind::TextArea if raw.is_empty() => Value::Blank,
        FieldKind::TextArea => Value::text(raw),
        FieldKind::StrictAutocomplete => match non_blank(raw) {
            None => Value::Blank,
            Some(s) if attributes.options.iter().any(|(label, _)| label == s) => Value::text(s),
            Some(s) => Value::Provisional(s.to_string()),
        },
        FieldKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .unwrap_or(Value::Blank),
        FieldKind::Float => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float)
            .unwrap_or(Value::Blank),
        FieldKind::Month => value::parse_month(raw)
            .map(Value::Month)
            .unwrap_or(Value::Blank),
        FieldKind::Date => value::parse_date(raw)
            .map(Value::Date)
            .unwrap_or(Value::Blank),
        FieldKind::LocalDatetime => value::parse_datetime(raw)
            .map(Value::LocalTime)
            .unwrap_or(Value::Blank),
        FieldKind::Select | FieldKind::Radio => raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|index| attributes.options.get(index))
            .map(|(_, value)| value.clone())
            .unwrap_or(Value::Blank),
        FieldKind::Checkbox => match raw {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            _ => Value::Blank,
        },
        FieldKind::File | FieldKind::Group | FieldKind::Repeatable(_) => Value::Blank,
    }
}

/// Coercion for strings coming out of a JSON snapshot.
///
/// Exports write an option's value rather than its index, so choice kinds
/// first look for an option whose value renders as `raw` and only then fall
/// back to the index rule.
pub fn coerce_json<Id: Identifier>(attributes: &Attributes<Id>, raw: &str) -> Value {
    if attributes.kind.is_choice() {
        let matched = attributes
            .options
            .iter()
            .find(|(_, value)| value.display_string().as_deref() == Some(raw));
        if let Some((_, value)) = matched {
            return value.clone();
        }
    }
    coerce(attributes, raw)
}

fn non_blank(raw: &str) -> Option<&str> {
    (!raw.trim().is_empty()).then_some(raw)
}
