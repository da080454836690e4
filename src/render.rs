//! Render-facing view of a field tree.
//!
//! A [`FieldView`] holds everything a rendering layer needs to draw a node
//! and nothing it would have to interpret: the display string of the value,
//! error messages already filtered by status, and button enablement already
//! derived from the repeatable bounds.

use serde::Serialize;

use crate::{
    tree::{Identifier, Node, Status},
    validation,
    value::Value,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView<Id> {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class_list: Vec<String>,
    /// The value as an input control would show it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Checked state, for checkboxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    pub status: Status,
    pub required: bool,
    pub disabled: bool,
    pub hidden: bool,
    /// Messages of the errors this node's status allows to be shown.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_button: Option<ButtonView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_button: Option<ButtonView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldView<Id>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonView {
    pub copy: String,
    pub enabled: bool,
}

/// Builds the view of `node` and everything under it.
pub fn view<Id: Identifier>(node: &Node<Id>) -> FieldView<Id> {
    let attrs = node.attributes();
    let is_repeatable = node.template().is_some();

    let options = attrs
        .options
        .iter()
        .map(|(label, value)| OptionView {
            label: label.clone(),
            value: value.display_string(),
            selected: !value.is_blank() && value == node.value(),
        })
        .collect();

    FieldView {
        kind: attrs.kind.type_name(),
        identifier: attrs.identifier.clone(),
        name: attrs.name.clone(),
        label: attrs.label.clone(),
        placeholder: attrs.placeholder.clone(),
        hint: attrs.hint.clone(),
        class_list: attrs.class_list.clone(),
        value: node.value().display_string(),
        checked: match node.value() {
            Value::Boolean(checked) => Some(*checked),
            _ => None,
        },
        status: attrs.status,
        required: attrs.required,
        disabled: attrs.disabled,
        hidden: attrs.hidden,
        errors: validation::visible_errors(node)
            .into_iter()
            .map(ToString::to_string)
            .collect(),
        options,
        add_button: is_repeatable.then(|| ButtonView {
            copy: attrs.add_button_copy.clone(),
            enabled: node.can_add_instance(),
        }),
        remove_button: is_repeatable.then(|| ButtonView {
            copy: attrs.remove_button_copy.clone(),
            enabled: node.can_remove_instance(),
        }),
        children: node.children().iter().map(view).collect(),
    }
}

impl<Id: Identifier> Node<Id> {
    pub fn view(&self) -> FieldView<Id> {
        view(self)
    }
}
