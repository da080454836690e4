//! The validator.
//!
//! Computes the error list of each node from its own attributes, and decides
//! which of those errors a node's interaction status allows to be shown.
//! Hidden subtrees are never validated: their errors are cleared.

use std::cmp::Ordering;

use crate::{
    errors::FieldError,
    tree::{Attributes, FieldKind, Identifier, Node, Status},
    value::Value,
};

pub mod format;

// ============================================================================
// VALIDATION
// ============================================================================

/// Recomputes the errors of every node in the subtree.
pub fn validate<Id: Identifier>(node: &Node<Id>) -> Node<Id> {
    if node.attributes().hidden {
        return clear_errors(node);
    }
    let children = node.children().iter().map(validate).collect();
    node.with_children(children)
        .map_attributes(|attrs| attrs.errors = check(attrs))
}

/// Errors for a single attribute record, in check order:
/// missing options, invalid provisional value, blank required value, range,
/// email or url format, mask, accepted MIME type. A required field that is
/// blank reports nothing past `IsBlank`.
pub fn check<Id: Identifier>(attrs: &Attributes<Id>) -> Vec<FieldError<Id>> {
    let id = attrs.identifier.clone();
    let mut errors = construction_errors(attrs);

    if attrs.value.is_provisional() && attrs.status == Status::Touched {
        errors.push(FieldError::InvalidValue(id.clone()));
    }

    if attrs.required && !attrs.kind.is_container() && attrs.value.is_blank() {
        errors.push(FieldError::IsBlank(id));
        return errors;
    }

    if let Some(error) = check_range(attrs) {
        errors.push(error);
    }

    match (&attrs.kind, &attrs.value) {
        (FieldKind::Email, Value::Text(s)) if !format::is_email(s) => {
            errors.push(FieldError::EmailInvalid(id.clone()))
        }
        (FieldKind::Url, Value::Text(s)) if !format::is_url(s) => {
            errors.push(FieldError::UrlInvalid(id.clone()))
        }
        _ => {}
    }

    if let Value::Text(s) = &attrs.value {
        if !attrs.pattern.is_empty() && !attrs.pattern.is_satisfied_by(s) {
            errors.push(FieldError::PatternError(id.clone()));
        }
    }

    if let (FieldKind::File, Value::File(file)) = (&attrs.kind, &attrs.value) {
        let accepted = attrs.accept.iter().any(|pattern| file.matches_accept(pattern));
        if !attrs.accept.is_empty() && !accepted {
            errors.push(FieldError::MimeTypeInvalid {
                id,
                mime: file.mime.clone(),
                accepted: attrs.accept.clone(),
            });
        }
    }

    errors
}

/// Errors stamped on a freshly constructed field, before any validation run.
pub fn construction_errors<Id: Identifier>(attrs: &Attributes<Id>) -> Vec<FieldError<Id>> {
    if attrs.kind.is_choice() && attrs.options.is_empty() {
        vec![FieldError::NoOptionsProvided(attrs.identifier.clone())]
    } else {
        Vec::new()
    }
}

fn check_range<Id: Identifier>(attrs: &Attributes<Id>) -> Option<FieldError<Id>> {
    let value = &attrs.value;
    if value.is_blank() {
        return None;
    }
    let has_min = !attrs.min.is_blank();
    let has_max = !attrs.max.is_blank();
    // Incomparable bounds never fire.
    let below = has_min && value.compare(&attrs.min) == Some(Ordering::Less);
    let above = has_max && value.compare(&attrs.max) == Some(Ordering::Greater);
    let id = attrs.identifier.clone();

    match (has_min, has_max) {
        (true, true) if below || above => Some(FieldError::ValueNotInRange {
            id,
            value: value.clone(),
            min: attrs.min.clone(),
            max: attrs.max.clone(),
        }),
        (true, false) if below => Some(FieldError::ValueTooSmall {
            id,
            value: value.clone(),
            min: attrs.min.clone(),
        }),
        (false, true) if above => Some(FieldError::ValueTooLarge {
            id,
            value: value.clone(),
            max: attrs.max.clone(),
        }),
        _ => None,
    }
}

fn clear_errors<Id: Identifier>(node: &Node<Id>) -> Node<Id> {
    let children = node.children().iter().map(clear_errors).collect();
    node.with_children(children)
        .map_attributes(|attrs| attrs.errors.clear())
}

// ============================================================================
// VISIBILITY
// ============================================================================

/// Whether `error` may be shown on a field with these attributes.
///
/// Container nodes show everything. Leaves gate on status:
///
/// | status | shown |
/// |---|---|
/// | pristine | only `NoOptionsProvided` |
/// | focused | all but `IsBlank` |
/// | editing | all but `IsBlank`, `PatternError` and `InvalidValue` |
/// | touched | all |
pub fn is_visible<Id: Identifier>(attrs: &Attributes<Id>, error: &FieldError<Id>) -> bool {
    if attrs.kind.is_container() {
        return true;
    }
    match attrs.status {
        Status::Touched => true,
        Status::Pristine => matches!(error, FieldError::NoOptionsProvided(_)),
        Status::Focused => !matches!(error, FieldError::IsBlank(_)),
        Status::Editing => !matches!(
            error,
            FieldError::IsBlank(_) | FieldError::PatternError(_) | FieldError::InvalidValue(_)
        ),
    }
}

/// The node's own errors that its status allows to be shown.
pub fn visible_errors<Id: Identifier>(node: &Node<Id>) -> Vec<&FieldError<Id>> {
    node.errors()
        .iter()
        .filter(|error| is_visible(node.attributes(), error))
        .collect()
}

/// Visible errors of every node in the subtree, in pre-order.
pub fn visible_tree_errors<Id: Identifier>(node: &Node<Id>) -> Vec<&FieldError<Id>> {
    node.iter()
        .flat_map(|(_, child)| visible_errors(child))
        .collect()
}
