//! Error merging, flattening and diagnostics.

use formtree::errors::{combine, combine_all, ErrorCategory, FieldError};
use formtree::value::Value;
use miette::Diagnostic;

type Error = FieldError<&'static str>;

fn leaves() -> (Error, Error, Error) {
    (
        FieldError::IsBlank(Some("a")),
        FieldError::NotNumber(Some("b")),
        FieldError::PatternError(Some("c")),
    )
}

#[cfg(test)]
mod combine_tests {
    use super::*;

    #[test]
    fn test_combine_is_idempotent() {
        let (a, _, _) = leaves();
        assert_eq!(combine(Some("x"), a.clone(), a.clone()), a);

        let list = FieldError::ErrorList(None, vec![a.clone(), FieldError::NotBool(None)]);
        assert_eq!(combine(None, list.clone(), list.clone()), list);
    }

    #[test]
    fn test_combine_is_associative_on_leaves() {
        let (a, b, c) = leaves();
        let left = combine(None, combine(None, a.clone(), b.clone()), c.clone());
        let right = combine(None, a.clone(), combine(None, b.clone(), c.clone()));
        assert_eq!(left.to_list(), right.to_list());
        assert_eq!(left.to_list(), vec![a, b, c]);
    }

    #[test]
    fn test_combine_drops_duplicates() {
        let (a, b, _) = leaves();
        let merged = combine(Some("root"), combine(None, a.clone(), b.clone()), a.clone());
        assert_eq!(merged, FieldError::ErrorList(Some("root"), vec![a, b]));
    }

    #[test]
    fn test_combine_all() {
        let (a, b, c) = leaves();
        assert_eq!(combine_all::<&str>(None, []), None);
        assert_eq!(combine_all(None, [a.clone()]), Some(a.clone()));
        assert_eq!(
            combine_all(Some("g"), [a.clone(), b.clone(), c.clone()]),
            Some(FieldError::ErrorList(Some("g"), vec![a, b, c]))
        );
    }

    #[test]
    fn test_to_list_flattens_nested_lists() {
        let (a, b, c) = leaves();
        let nested = FieldError::ErrorList(
            Some("outer"),
            vec![a.clone(), FieldError::ErrorList(Some("inner"), vec![b.clone(), c.clone()])],
        );
        assert_eq!(nested.to_list(), vec![a, b, c]);
    }

    #[test]
    fn test_leaf_to_list_is_itself() {
        let (a, _, _) = leaves();
        assert_eq!(a.to_list(), vec![a]);
    }
}

#[cfg(test)]
mod diagnostic_tests {
    use super::*;

    #[test]
    fn test_codes_follow_category() {
        let (a, b, _) = leaves();
        assert_eq!(a.category(), ErrorCategory::Validation);
        assert_eq!(b.category(), ErrorCategory::Parse);
        assert_eq!(
            a.code().map(|code| code.to_string()),
            Some("formtree::validation::is_blank".to_string())
        );
        let missing: Error = FieldError::InputNotFound("x");
        assert_eq!(
            missing.code().map(|code| code.to_string()),
            Some("formtree::parse::input_not_found".to_string())
        );
        assert!(missing.help().is_some());
    }

    #[test]
    fn test_identifier_accessor() {
        let (a, _, _) = leaves();
        assert_eq!(a.identifier(), Some(&"a"));
        let missing: Error = FieldError::InputNotFound("x");
        assert_eq!(missing.identifier(), Some(&"x"));
    }

    #[test]
    fn test_messages() {
        let small: Error = FieldError::ValueTooSmall {
            id: None,
            value: Value::Integer(1),
            min: Value::Integer(5),
        };
        assert_eq!(small.to_string(), "Must be at least 5");
        let (a, b, c) = leaves();
        let list: Error = FieldError::ErrorList(None, vec![a, b, c]);
        assert_eq!(list.to_string(), "3 errors occurred");
        assert_eq!(list.related().map(|related| related.count()), Some(3));
    }
}
