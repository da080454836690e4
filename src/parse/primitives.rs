//! Leaf parsers: constants, typed value extractors and whole-tree checks.

use chrono::NaiveDateTime;

use crate::{
    errors::{combine_all, FieldError},
    json,
    parse::Parser,
    tree::{Identifier, Node},
    validation::format,
    value::Value,
};

/// Always succeeds with `a`, leaving the node untouched.
pub fn succeed<Id: Identifier, A: Clone + 'static>(a: A) -> Parser<Id, A> {
    Parser::new(move |node| (node.clone(), Ok(a.clone())))
}

/// Always fails with a custom message tagged with the node's identifier.
pub fn fail<Id: Identifier, A: 'static>(message: impl Into<String>) -> Parser<Id, A> {
    let message = message.into();
    Parser::new(move |node: &Node<Id>| {
        let error = FieldError::CustomError(node.identifier().cloned(), message.clone());
        (node.clone(), Err(error))
    })
}

/// Builds a parser that reads the node's value through `extract`. Container
/// nodes have no value and fail with `IsGroupNotInput`.
fn extractor<Id: Identifier, A: 'static>(
    extract: impl Fn(&Value, Option<Id>) -> Result<A, FieldError<Id>> + 'static,
) -> Parser<Id, A> {
    Parser::new(move |node: &Node<Id>| {
        let id = node.identifier().cloned();
        let result = if node.is_container() {
            Err(FieldError::IsGroupNotInput(id))
        } else {
            extract(node.value(), id)
        };
        (node.clone(), result)
    })
}

// ============================================================================
// VALUE EXTRACTORS
// ============================================================================

/// The raw typed value. Fails with `InvalidValue` on a provisional value.
pub fn value<Id: Identifier>() -> Parser<Id, Value> {
    extractor(|value, id| match value {
        Value::Provisional(_) => Err(FieldError::InvalidValue(id)),
        other => Ok(other.clone()),
    })
}

/// A resolved string. Numbers and dates render to their display form;
/// blank and boolean values fail with `ParseError`, provisional values with
/// `InvalidValue`.
pub fn string<Id: Identifier>() -> Parser<Id, String> {
    extractor(|value, id| match value {
        Value::Provisional(_) => Err(FieldError::InvalidValue(id)),
        other => other.display_string().ok_or(FieldError::ParseError(id)),
    })
}

/// Like [`string`], but a provisional value is accepted as typed.
pub fn string_lenient<Id: Identifier>() -> Parser<Id, String> {
    extractor(|value, id| value.display_string().ok_or(FieldError::ParseError(id)))
}

pub fn int<Id: Identifier>() -> Parser<Id, i64> {
    extractor(|value, id| value.as_int().ok_or(FieldError::NotNumber(id)))
}

/// A float. Integer values widen.
pub fn float<Id: Identifier>() -> Parser<Id, f64> {
    extractor(|value, id| value.as_float().ok_or(FieldError::NotNumber(id)))
}

pub fn bool<Id: Identifier>() -> Parser<Id, bool> {
    extractor(|value, id| value.as_bool().ok_or(FieldError::NotBool(id)))
}

/// The instant held by a month, date or datetime field.
pub fn datetime<Id: Identifier>() -> Parser<Id, NaiveDateTime> {
    extractor(|value, id| value.as_time().ok_or(FieldError::ParseError(id)))
}

/// Milliseconds since the Unix epoch, reading the stored time as UTC.
pub fn posix<Id: Identifier>() -> Parser<Id, i64> {
    datetime().map(|time| time.and_utc().timestamp_millis())
}

pub fn email<Id: Identifier>() -> Parser<Id, String> {
    extractor(|value, id| match value {
        Value::Text(s) if format::is_email(s) => Ok(s.clone()),
        Value::Text(_) => Err(FieldError::EmailInvalid(id)),
        Value::Provisional(_) => Err(FieldError::InvalidValue(id)),
        _ => Err(FieldError::ParseError(id)),
    })
}

pub fn url<Id: Identifier>() -> Parser<Id, String> {
    extractor(|value, id| match value {
        Value::Text(s) if format::is_url(s) => Ok(s.clone()),
        Value::Text(_) => Err(FieldError::UrlInvalid(id)),
        Value::Provisional(_) => Err(FieldError::InvalidValue(id)),
        _ => Err(FieldError::ParseError(id)),
    })
}

/// `None` for a blank leaf, otherwise the inner parser's result.
pub fn maybe<Id: Identifier, A: 'static>(parser: Parser<Id, A>) -> Parser<Id, Option<A>> {
    Parser::new(move |node: &Node<Id>| {
        if !node.is_container() && node.value().is_blank() {
            return (node.clone(), Ok(None));
        }
        let (node, result) = parser.run(node);
        (node, result.map(Some))
    })
}

/// The string value reformatted against the field's mask. The reformatted
/// value is written back into the tree, so later parsers and the caller see
/// it too.
pub fn formatted_string<Id: Identifier>() -> Parser<Id, String> {
    Parser::new(|node: &Node<Id>| {
        let id = node.identifier().cloned();
        let Value::Text(raw) = node.value() else {
            return string().run(node);
        };
        let mask = &node.attributes().pattern;
        let formatted = mask.format(raw, 0);
        if !(formatted.complete && formatted.consistent) {
            return (node.clone(), Err(FieldError::PatternError(id)));
        }
        let rewritten = node.map_attributes(|attrs| attrs.value = Value::text(&formatted.value));
        (rewritten, Ok(formatted.value))
    })
}

/// Encodes the current subtree as JSON.
pub fn json<Id: Identifier>() -> Parser<Id, serde_json::Value> {
    Parser::new(|node: &Node<Id>| (node.clone(), json::to_json(node)))
}

// ============================================================================
// WHOLE-TREE VALIDATION
// ============================================================================

/// Validates the whole subtree and fails with every error found, in
/// pre-order, merged under the subtree root's identifier. Succeeds when the
/// subtree is clean. The validated tree is passed on.
pub fn tree_validation<Id: Identifier>() -> Parser<Id, ()> {
    Parser::new(|node: &Node<Id>| {
        let validated = node.validate();
        let errors: Vec<FieldError<Id>> = validated.all_errors().into_iter().cloned().collect();
        let merged = combine_all(validated.identifier().cloned(), errors);
        let result = match merged {
            Some(error) => Err(error),
            None => Ok(()),
        };
        (validated, result)
    })
}
