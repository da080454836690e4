//! Per-node attribute record, field kinds and the attribute-setter language.

use serde::{Deserialize, Serialize};

use crate::{
    errors::FieldError,
    mask::Mask,
    tree::{Identifier, Node},
    value::Value,
};

// ============================================================================
// FIELD KIND
// ============================================================================

/// The kind of control a node represents and the shape of value it holds.
///
/// `Repeatable` owns the template subtree new instances are cloned from. The
/// template lives here, apart from the node's runtime children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind<Id: Identifier> {
    Text,
    TextArea,
    Email,
    Url,
    Password,
    StrictAutocomplete,
    Integer,
    Float,
    Month,
    Date,
    LocalDatetime,
    Select,
    Radio,
    Checkbox,
    File,
    Group,
    Repeatable(Box<Node<Id>>),
}

impl<Id: Identifier> FieldKind<Id> {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "textarea",
            Self::Email => "email",
            Self::Url => "url",
            Self::Password => "password",
            Self::StrictAutocomplete => "strict-autocomplete",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Month => "month",
            Self::Date => "date",
            Self::LocalDatetime => "datetime-local",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::File => "file",
            Self::Group => "group",
            Self::Repeatable(_) => "repeatable",
        }
    }

    /// Group and repeatable nodes hold children instead of a value.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Group | Self::Repeatable(_))
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

// ============================================================================
// STATUS
// ============================================================================

/// Interaction lifecycle of a node. Gates which errors are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pristine,
    Focused,
    Editing,
    Touched,
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// Everything a node knows about itself apart from its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "Id: Identifier + Deserialize<'de>"))]
pub struct Attributes<Id: Identifier> {
    pub kind: FieldKind<Id>,
    pub name: Option<String>,
    pub identifier: Option<Id>,
    pub value: Value,
    pub min: Value,
    pub max: Value,
    pub step: Value,
    pub options: Vec<(String, Value)>,
    pub required: bool,
    pub disabled: bool,
    pub hidden: bool,
    pub status: Status,
    pub errors: Vec<FieldError<Id>>,
    pub repeatable_min: usize,
    pub repeatable_max: Option<usize>,
    pub pattern: Mask,
    pub selection_start: usize,
    pub selection_end: usize,
    /// MIME patterns accepted by a `File` node.
    pub accept: Vec<String>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub hint: Option<String>,
    pub class_list: Vec<String>,
    pub add_button_copy: String,
    pub remove_button_copy: String,
}

impl<Id: Identifier> Default for Attributes<Id> {
    fn default() -> Self {
        Self {
            kind: FieldKind::Text,
            name: None,
            identifier: None,
            value: Value::Blank,
            min: Value::Blank,
            max: Value::Blank,
            step: Value::Blank,
            options: Vec::new(),
            required: false,
            disabled: false,
            hidden: false,
            status: Status::Pristine,
            errors: Vec::new(),
            repeatable_min: 1,
            repeatable_max: None,
            pattern: Mask::default(),
            selection_start: 0,
            selection_end: 0,
            accept: Vec::new(),
            label: None,
            placeholder: None,
            hint: None,
            class_list: Vec::new(),
            add_button_copy: "Add".to_string(),
            remove_button_copy: "Remove".to_string(),
        }
    }
}

impl<Id: Identifier> Attributes<Id> {
    pub fn of_kind(kind: FieldKind<Id>) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Applies one setter. Later setters win over earlier ones.
    pub fn apply(mut self, attribute: Attribute<Id>) -> Self {
        match attribute {
            Attribute::Name(name) => self.name = Some(name),
            Attribute::Identifier(id) => self.identifier = Some(id),
            Attribute::Value(value) => self.value = value,
            Attribute::Required(required) => self.required = required,
            Attribute::Disabled(disabled) => self.disabled = disabled,
            Attribute::Hidden(hidden) => self.hidden = hidden,
            Attribute::Min(min) => self.min = min,
            Attribute::Max(max) => self.max = max,
            Attribute::Step(step) => self.step = step,
            Attribute::Options(options) => self.options = options,
            Attribute::Pattern(mask) => self.pattern = Mask::compile(&mask),
            Attribute::RepeatableMin(min) => self.repeatable_min = min,
            Attribute::RepeatableMax(max) => self.repeatable_max = Some(max),
            Attribute::Accept(accept) => self.accept = accept,
            Attribute::Label(label) => self.label = Some(label),
            Attribute::Placeholder(placeholder) => self.placeholder = Some(placeholder),
            Attribute::Hint(hint) => self.hint = Some(hint),
            Attribute::Class(class) => self.class_list.push(class),
            Attribute::AddButtonCopy(copy) => self.add_button_copy = copy,
            Attribute::RemoveButtonCopy(copy) => self.remove_button_copy = copy,
        }
        self
    }

    /// Folds setters left to right over this record.
    pub fn apply_all(self, attributes: impl IntoIterator<Item = Attribute<Id>>) -> Self {
        attributes.into_iter().fold(self, Self::apply)
    }
}

// ============================================================================
// ATTRIBUTE SETTERS
// ============================================================================

/// A single, inspectable attribute setter.
///
/// Field constructors fold a list of these over a default record; see
/// [`crate::tree::attr`] for the short constructor functions.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute<Id> {
    Name(String),
    Identifier(Id),
    Value(Value),
    Required(bool),
    Disabled(bool),
    Hidden(bool),
    Min(Value),
    Max(Value),
    Step(Value),
    Options(Vec<(String, Value)>),
    /// Mask source string; compiled when applied.
    Pattern(String),
    RepeatableMin(usize),
    RepeatableMax(usize),
    Accept(Vec<String>),
    Label(String),
    Placeholder(String),
    Hint(String),
    /// Appends one CSS class.
    Class(String),
    AddButtonCopy(String),
    RemoveButtonCopy(String),
}
