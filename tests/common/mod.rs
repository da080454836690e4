//! # Formtree Test Fixtures
//!
//! Small forms shared by the integration tests. Identifiers are string
//! slices throughout.
#![allow(dead_code)]

use formtree::tree::{
    attr,
    builder::{email, group, int, repeatable, text},
    Node, Path,
};
use formtree::update::{update, Msg};

pub type Form = Node<&'static str>;

/// A profile form: required name, optional email, bounded age and up to three
/// hobbies.
pub fn profile_form() -> Form {
    group(
        [attr::identifier("profile")],
        [
            text([attr::name("name"), attr::identifier("name"), attr::required(true)]),
            email([attr::name("email"), attr::identifier("email")]),
            int([
                attr::name("age"),
                attr::identifier("age"),
                attr::min(0),
                attr::max(130),
            ]),
            repeatable(
                [
                    attr::name("hobbies"),
                    attr::identifier("hobbies"),
                    attr::repeatable_max(3),
                ],
                text([attr::name("hobby"), attr::identifier("hobby")]),
            ),
        ],
    )
}

/// `{"a": "x", "g": {"b": "y"}}` when exported.
pub fn nested_form() -> Form {
    group(
        [],
        [
            text([attr::name("a"), attr::value("x")]),
            group([attr::name("g")], [text([attr::name("b"), attr::value("y")])]),
        ],
    )
}

/// A named repeatable of text leaves named `v`, with no instances.
///
/// The minimum is 0 rather than the default 1 so that adding two instances
/// leaves exactly two, and imports can grow it from empty.
pub fn items_form() -> Form {
    repeatable(
        [attr::name("items"), attr::repeatable_min(0)],
        text([attr::name("v")]),
    )
}

pub fn path(indices: &[usize]) -> Path {
    Path::from(indices)
}

pub fn type_into(form: &Form, indices: &[usize], raw: &str) -> Form {
    let cursor = raw.chars().count();
    update(
        Msg::ValueChanged {
            id: None,
            path: path(indices),
            raw: raw.to_string(),
            selection: (cursor, cursor),
        },
        form,
    )
}

pub fn focus(form: &Form, indices: &[usize]) -> Form {
    update(Msg::Focused { id: None, path: path(indices) }, form)
}

pub fn blur(form: &Form, indices: &[usize]) -> Form {
    update(Msg::Blurred { id: None, path: path(indices) }, form)
}

pub fn add_instance(form: &Form, indices: &[usize]) -> Form {
    update(Msg::InstanceAdded { id: None, path: path(indices) }, form)
}

pub fn remove_instance(form: &Form, indices: &[usize]) -> Form {
    update(Msg::InstanceRemoved { id: None, path: path(indices) }, form)
}
