//! Field constructors.
//!
//! Each constructor folds its attribute setters left to right over a default
//! record of the right kind. Constructed nodes are `Pristine` and carry no
//! errors, except that a select or radio built without options is stamped
//! with `NoOptionsProvided` straight away.
//!
//! ```rust
//! use formtree::tree::{attr, builder::{group, text}};
//! let form = group([], [
//!     text([attr::name("a"), attr::identifier("a"), attr::value("x")]),
//!     group([attr::name("g")], [text([attr::name("b"), attr::value("y")])]),
//! ]);
//! assert_eq!(form.children().len(), 2);
//! assert!(form.find(&"a").is_some());
//! ```

use crate::{
    tree::{Attribute, Attributes, FieldKind, Identifier, Node},
    validation,
};

fn leaf<Id: Identifier>(
    kind: FieldKind<Id>,
    attributes: impl IntoIterator<Item = Attribute<Id>>,
) -> Node<Id> {
    let mut attributes = Attributes::of_kind(kind).apply_all(attributes);
    attributes.errors = validation::construction_errors(&attributes);
    Node::from_parts(attributes, [])
}

pub fn text<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::Text, attributes)
}

pub fn textarea<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::TextArea, attributes)
}

pub fn email<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::Email, attributes)
}

pub fn url<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::Url, attributes)
}

pub fn password<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::Password, attributes)
}

/// A text input whose value must be one of its options' labels; anything else
/// the user types is kept as a provisional value.
pub fn strict_autocomplete<Id: Identifier>(
    attributes: impl IntoIterator<Item = Attribute<Id>>,
) -> Node<Id> {
    leaf(FieldKind::StrictAutocomplete, attributes)
}

pub fn int<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::Integer, attributes)
}

pub fn float<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::Float, attributes)
}

pub fn month<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::Month, attributes)
}

pub fn date<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::Date, attributes)
}

pub fn datetime<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::LocalDatetime, attributes)
}

pub fn select<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::Select, attributes)
}

pub fn radio<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::Radio, attributes)
}

pub fn checkbox<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::Checkbox, attributes)
}

pub fn file<Id: Identifier>(attributes: impl IntoIterator<Item = Attribute<Id>>) -> Node<Id> {
    leaf(FieldKind::File, attributes)
}

pub fn group<Id: Identifier>(
    attributes: impl IntoIterator<Item = Attribute<Id>>,
    children: impl IntoIterator<Item = Node<Id>>,
) -> Node<Id> {
    Node::from_parts(Attributes::of_kind(FieldKind::Group).apply_all(attributes), children)
}

/// A repeatable with `repeatable_min` plain copies of its template.
pub fn repeatable<Id: Identifier>(
    attributes: impl IntoIterator<Item = Attribute<Id>>,
    template: Node<Id>,
) -> Node<Id> {
    repeatable_with(attributes, template, Vec::<fn(Node<Id>) -> Node<Id>>::new())
}

/// A repeatable whose initial instances are the template fixed up by each of
/// `defaults` in order, followed by plain template copies until
/// `repeatable_min` is reached. More defaults than `repeatable_max` are kept
/// as given; only add and remove operations clamp.
pub fn repeatable_with<Id, F>(
    attributes: impl IntoIterator<Item = Attribute<Id>>,
    template: Node<Id>,
    defaults: impl IntoIterator<Item = F>,
) -> Node<Id>
where
    Id: Identifier,
    F: FnOnce(Node<Id>) -> Node<Id>,
{
    let attributes =
        Attributes::of_kind(FieldKind::Repeatable(Box::new(template.clone()))).apply_all(attributes);
    let mut children: Vec<Node<Id>> = defaults
        .into_iter()
        .map(|fix_up| fix_up(template.clone()))
        .collect();
    while children.len() < attributes.repeatable_min {
        children.push(template.clone());
    }
    Node::from_parts(attributes, children)
}
