//! Short constructors for [`Attribute`] setters.
//!
//! ```rust
//! use formtree::tree::{attr, builder::int};
//! let age = int([attr::name("age"), attr::identifier("age"), attr::min(0), attr::required(true)]);
//! assert_eq!(age.name(), Some("age"));
//! ```

use crate::{tree::Attribute, value::Value};

pub fn name<Id>(name: impl Into<String>) -> Attribute<Id> {
    Attribute::Name(name.into())
}

pub fn identifier<Id>(id: Id) -> Attribute<Id> {
    Attribute::Identifier(id)
}

pub fn value<Id>(value: impl Into<Value>) -> Attribute<Id> {
    Attribute::Value(value.into())
}

pub fn required<Id>(required: bool) -> Attribute<Id> {
    Attribute::Required(required)
}

pub fn disabled<Id>(disabled: bool) -> Attribute<Id> {
    Attribute::Disabled(disabled)
}

pub fn hidden<Id>(hidden: bool) -> Attribute<Id> {
    Attribute::Hidden(hidden)
}

pub fn min<Id>(min: impl Into<Value>) -> Attribute<Id> {
    Attribute::Min(min.into())
}

pub fn max<Id>(max: impl Into<Value>) -> Attribute<Id> {
    Attribute::Max(max.into())
}

pub fn step<Id>(step: impl Into<Value>) -> Attribute<Id> {
    Attribute::Step(step.into())
}

pub fn options<Id, L, V>(options: impl IntoIterator<Item = (L, V)>) -> Attribute<Id>
where
    L: Into<String>,
    V: Into<Value>,
{
    Attribute::Options(
        options
            .into_iter()
            .map(|(label, value)| (label.into(), value.into()))
            .collect(),
    )
}

/// Options whose label doubles as their text value.
pub fn string_options<Id, S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Attribute<Id> {
    Attribute::Options(
        labels
            .into_iter()
            .map(|label| {
                let label = label.into();
                (label.clone(), Value::Text(label))
            })
            .collect(),
    )
}

pub fn pattern<Id>(mask: impl Into<String>) -> Attribute<Id> {
    Attribute::Pattern(mask.into())
}

pub fn repeatable_min<Id>(min: usize) -> Attribute<Id> {
    Attribute::RepeatableMin(min)
}

pub fn repeatable_max<Id>(max: usize) -> Attribute<Id> {
    Attribute::RepeatableMax(max)
}

pub fn accept<Id, S: Into<String>>(patterns: impl IntoIterator<Item = S>) -> Attribute<Id> {
    Attribute::Accept(patterns.into_iter().map(Into::into).collect())
}

pub fn label<Id>(label: impl Into<String>) -> Attribute<Id> {
    Attribute::Label(label.into())
}

pub fn placeholder<Id>(placeholder: impl Into<String>) -> Attribute<Id> {
    Attribute::Placeholder(placeholder.into())
}

pub fn hint<Id>(hint: impl Into<String>) -> Attribute<Id> {
    Attribute::Hint(hint.into())
}

pub fn class<Id>(class: impl Into<String>) -> Attribute<Id> {
    Attribute::Class(class.into())
}

pub fn add_button_copy<Id>(copy: impl Into<String>) -> Attribute<Id> {
    Attribute::AddButtonCopy(copy.into())
}

pub fn remove_button_copy<Id>(copy: impl Into<String>) -> Attribute<Id> {
    Attribute::RemoveButtonCopy(copy.into())
}
