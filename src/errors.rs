//! Formtree Error Handling
//!
//! Two error types live here:
//!
//! - [`FieldError`] is the error taxonomy carried by field nodes and returned
//!   by parsers. It is plain data: validation stamps it onto nodes, parsers
//!   return it inside `Result`, and [`combine`] merges independent failures
//!   into a single flattened [`FieldError::ErrorList`].
//! - [`FormtreeError`] covers the outer surfaces (reading definitions, decoding
//!   data files) used by the CLI.

use std::fmt;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{tree::Identifier, value::Value};

// ============================================================================
// FIELD ERRORS
// ============================================================================

/// Every error a field or a parser can produce.
///
/// All variants carry the identifier of the originating field when it has one,
/// except `InputNotFound` (which names the identifier that was searched for)
/// and `ErrorList` (which carries the identifier of the node where the merge
/// happened).
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError<Id> {
    #[error("This field is required")]
    IsBlank(Option<Id>),

    #[error("Must be at most {max}")]
    ValueTooLarge {
        id: Option<Id>,
        value: Value,
        max: Value,
    },

    #[error("Must be at least {min}")]
    ValueTooSmall {
        id: Option<Id>,
        value: Value,
        min: Value,
    },

    #[error("Must be between {min} and {max}")]
    ValueNotInRange {
        id: Option<Id>,
        value: Value,
        min: Value,
        max: Value,
    },

    #[error("Must be a number")]
    NotNumber(Option<Id>),

    #[error("Must be true or false")]
    NotBool(Option<Id>),

    #[error("Field has no name to encode it under")]
    HasNoName(Option<Id>),

    #[error("Doesn't match the required pattern")]
    PatternError(Option<Id>),

    #[error("Please enter a valid email address")]
    EmailInvalid(Option<Id>),

    #[error("Please enter a valid URL")]
    UrlInvalid(Option<Id>),

    #[error("File type {mime} is not one of: {}", .accepted.join(", "))]
    MimeTypeInvalid {
        id: Option<Id>,
        mime: String,
        accepted: Vec<String>,
    },

    #[error("Is a group of fields, not an input")]
    IsGroupNotInput(Option<Id>),

    #[error("No options have been provided")]
    NoOptionsProvided(Option<Id>),

    #[error("Please pick one of the available options")]
    InvalidValue(Option<Id>),

    #[error("No input found with identifier {0:?}")]
    InputNotFound(Id),

    #[error("{} errors occurred", .1.len())]
    ErrorList(Option<Id>, Vec<FieldError<Id>>),

    #[error("Could not parse the field's value")]
    ParseError(Option<Id>),

    #[error("{1}")]
    CustomError(Option<Id>, String),
}

/// Coarse classification of field errors, for callers that do not need to
/// match individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Produced by the validator from a node's own attributes.
    Validation,
    /// Produced by a parser while extracting a typed value.
    Parse,
    /// Produced by the shape of the tree (naming, grouping, merging).
    Structure,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Parse => "parse",
            Self::Structure => "structure",
        }
    }
}

impl<Id: Clone + PartialEq> FieldError<Id> {
    /// The identifier attached to this error, if any.
    pub fn identifier(&self) -> Option<&Id> {
        match self {
            Self::IsBlank(id)
            | Self::NotNumber(id)
            | Self::NotBool(id)
            | Self::HasNoName(id)
            | Self::PatternError(id)
            | Self::EmailInvalid(id)
            | Self::UrlInvalid(id)
            | Self::IsGroupNotInput(id)
            | Self::NoOptionsProvided(id)
            | Self::InvalidValue(id)
            | Self::ErrorList(id, _)
            | Self::ParseError(id)
            | Self::CustomError(id, _) => id.as_ref(),
            Self::ValueTooLarge { id, .. }
            | Self::ValueTooSmall { id, .. }
            | Self::ValueNotInRange { id, .. }
            | Self::MimeTypeInvalid { id, .. } => id.as_ref(),
            Self::InputNotFound(id) => Some(id),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IsBlank(_)
            | Self::ValueTooLarge { .. }
            | Self::ValueTooSmall { .. }
            | Self::ValueNotInRange { .. }
            | Self::PatternError(_)
            | Self::EmailInvalid(_)
            | Self::UrlInvalid(_)
            | Self::MimeTypeInvalid { .. }
            | Self::NoOptionsProvided(_)
            | Self::InvalidValue(_) => ErrorCategory::Validation,

            Self::NotNumber(_)
            | Self::NotBool(_)
            | Self::InputNotFound(_)
            | Self::ParseError(_)
            | Self::CustomError(..) => ErrorCategory::Parse,

            Self::HasNoName(_) | Self::IsGroupNotInput(_) | Self::ErrorList(..) => {
                ErrorCategory::Structure
            }
        }
    }

    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::IsBlank(_) => "is_blank",
            Self::ValueTooLarge { .. } => "value_too_large",
            Self::ValueTooSmall { .. } => "value_too_small",
            Self::ValueNotInRange { .. } => "value_not_in_range",
            Self::NotNumber(_) => "not_number",
            Self::NotBool(_) => "not_bool",
            Self::HasNoName(_) => "has_no_name",
            Self::PatternError(_) => "pattern",
            Self::EmailInvalid(_) => "email_invalid",
            Self::UrlInvalid(_) => "url_invalid",
            Self::MimeTypeInvalid { .. } => "mime_type_invalid",
            Self::IsGroupNotInput(_) => "is_group_not_input",
            Self::NoOptionsProvided(_) => "no_options_provided",
            Self::InvalidValue(_) => "invalid_value",
            Self::InputNotFound(_) => "input_not_found",
            Self::ErrorList(..) => "error_list",
            Self::ParseError(_) => "parse_error",
            Self::CustomError(..) => "custom",
        }
    }

    /// Flattens this error into its leaf errors, depth first, without
    /// duplicates. An `ErrorList` never appears in the output.
    pub fn to_list(&self) -> Vec<FieldError<Id>> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<FieldError<Id>>) {
        match self {
            Self::ErrorList(_, children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
            leaf => {
                if !out.contains(leaf) {
                    out.push(leaf.clone());
                }
            }
        }
    }
}

/// Merges two errors into one.
///
/// Equal errors merge to themselves. Otherwise both sides are flattened into
/// their leaf errors (nested lists are spliced, not nested), duplicates are
/// dropped keeping the first occurrence, and the result is wrapped as an
/// `ErrorList` tagged with `id`.
///
/// ```rust
/// use formtree::errors::{combine, FieldError};
/// let a: FieldError<&str> = FieldError::IsBlank(Some("a"));
/// let b = FieldError::NotNumber(Some("b"));
/// assert_eq!(combine(None, a.clone(), a.clone()), a);
/// assert_eq!(
///     combine(None, a.clone(), b.clone()),
///     FieldError::ErrorList(None, vec![a, b])
/// );
/// ```
pub fn combine<Id: Clone + PartialEq>(
    id: Option<Id>,
    first: FieldError<Id>,
    second: FieldError<Id>,
) -> FieldError<Id> {
    if first == second {
        return first;
    }
    let mut merged = first.to_list();
    second.collect_leaves(&mut merged);
    FieldError::ErrorList(id, merged)
}

/// Folds a sequence of errors left to right with [`combine`]. A single error
/// comes back unwrapped; no errors at all yields `None`.
pub fn combine_all<Id: Clone + PartialEq>(
    id: Option<Id>,
    errors: impl IntoIterator<Item = FieldError<Id>>,
) -> Option<FieldError<Id>> {
    errors.into_iter().fold(None, |acc, error| match acc {
        None => Some(error),
        Some(acc) => Some(combine(id.clone(), acc, error)),
    })
}

impl<Id: Identifier> Diagnostic for FieldError<Id> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!(
            "formtree::{}::{}",
            self.category().as_str(),
            self.code_suffix()
        )))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self {
            Self::HasNoName(_) => "give the field a `name` attribute or wrap it in an unnamed group",
            Self::InputNotFound(_) => "check the identifier passed to `field`; lookup is pre-order and first match wins",
            Self::NoOptionsProvided(_) => "select and radio fields need at least one option",
            Self::IsGroupNotInput(_) => "use `field` or `list` to descend into a group before extracting a value",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        match self {
            Self::ErrorList(_, children) => Some(Box::new(
                children.iter().map(|child| child as &dyn Diagnostic),
            )),
            _ => None,
        }
    }
}

// ============================================================================
// OUTER-SURFACE ERRORS
// ============================================================================

/// Failures outside the field tree itself: reading files and decoding form
/// definitions or data snapshots.
#[derive(Debug, Error, Diagnostic)]
pub enum FormtreeError {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(formtree::io::read))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid form definition in '{path}': {message}")]
    #[diagnostic(
        code(formtree::definition::invalid),
        help("definitions are YAML or JSON serializations of a field tree")
    )]
    Definition { path: String, message: String },

    #[error("invalid JSON data in '{path}'")]
    #[diagnostic(code(formtree::data::invalid))]
    Data {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Field(#[from] FieldError<String>),
}
