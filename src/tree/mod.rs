//! The field tree.
//!
//! A form is a rose tree of [`Node`]s. Each node carries an [`Attributes`]
//! record and, for group and repeatable kinds, a list of children. The tree is
//! a value: every operation returns a new tree, and children live in a
//! persistent vector so untouched subtrees are shared between snapshots.

use std::fmt;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::{errors::FieldError, validation, value::Value};

pub mod attr;
pub mod attributes;
pub mod builder;
pub mod path;

pub use attributes::{Attribute, Attributes, FieldKind, Status};
pub use path::Path;

/// A caller-supplied key used to address fields.
///
/// Any cloneable, comparable, debuggable type works: string slices, enums,
/// integers. Identifiers need not be unique; lookups take the first match in
/// pre-order.
pub trait Identifier: Clone + PartialEq + fmt::Debug + 'static {}

impl<T> Identifier for T where T: Clone + PartialEq + fmt::Debug + 'static {}

// ============================================================================
// NODE
// ============================================================================

/// One element of the field tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "Id: Identifier + Deserialize<'de>"))]
pub struct Node<Id: Identifier> {
    #[serde(flatten)]
    attributes: Attributes<Id>,
    #[serde(default, skip_serializing_if = "Vector::is_empty")]
    children: Vector<Node<Id>>,
}

impl<Id: Identifier> Node<Id> {
    pub(crate) fn from_parts(
        attributes: Attributes<Id>,
        children: impl IntoIterator<Item = Node<Id>>,
    ) -> Self {
        Self {
            attributes,
            children: children.into_iter().collect(),
        }
    }

    pub fn attributes(&self) -> &Attributes<Id> {
        &self.attributes
    }

    pub fn children(&self) -> &Vector<Node<Id>> {
        &self.children
    }

    pub fn kind(&self) -> &FieldKind<Id> {
        &self.attributes.kind
    }

    pub fn identifier(&self) -> Option<&Id> {
        self.attributes.identifier.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.name.as_deref()
    }

    pub fn value(&self) -> &Value {
        &self.attributes.value
    }

    pub fn status(&self) -> Status {
        self.attributes.status
    }

    pub fn errors(&self) -> &[FieldError<Id>] {
        &self.attributes.errors
    }

    pub fn is_container(&self) -> bool {
        self.attributes.kind.is_container()
    }

    /// The template a repeatable spawns its instances from.
    pub fn template(&self) -> Option<&Node<Id>> {
        match &self.attributes.kind {
            FieldKind::Repeatable(template) => Some(template),
            _ => None,
        }
    }

    /// Returns a copy of this node with its attribute record edited in place.
    pub(crate) fn map_attributes(&self, edit: impl FnOnce(&mut Attributes<Id>)) -> Self {
        let mut node = self.clone();
        edit(&mut node.attributes);
        node
    }

    pub(crate) fn with_children(&self, children: Vector<Node<Id>>) -> Self {
        Self {
            attributes: self.attributes.clone(),
            children,
        }
    }

    // ------------------------------------------------------------------------
    // Path addressing
    // ------------------------------------------------------------------------

    pub fn get(&self, path: &Path) -> Option<&Node<Id>> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    /// Replaces the node at `path` with `edit(node)`, rebuilding the spine
    /// above it. Returns `None` if the path does not address a node.
    pub fn update_at(&self, path: &Path, edit: impl FnOnce(&Node<Id>) -> Node<Id>) -> Option<Self> {
        update_recursive(self, path.indices(), edit)
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// Pre-order traversal: the node itself, then its children left to right.
    /// Repeatable templates are not visited.
    pub fn iter(&self) -> Preorder<'_, Id> {
        Preorder {
            stack: vec![(Path::root(), self)],
        }
    }

    /// Path of the first node in pre-order whose identifier equals `id`.
    pub fn find_path(&self, id: &Id) -> Option<Path> {
        self.iter()
            .find(|(_, node)| node.identifier() == Some(id))
            .map(|(path, _)| path)
    }

    pub fn find(&self, id: &Id) -> Option<&Node<Id>> {
        self.iter()
            .map(|(_, node)| node)
            .find(|node| node.identifier() == Some(id))
    }

    // ------------------------------------------------------------------------
    // Program-driven updates
    // ------------------------------------------------------------------------

    /// Applies setters to this node and re-validates it. The identifier is
    /// kept as it was, whatever the setters say.
    pub fn update_attributes(&self, attributes: impl IntoIterator<Item = Attribute<Id>>) -> Self {
        let identifier = self.attributes.identifier.clone();
        let mut updated = self.attributes.clone().apply_all(attributes);
        updated.identifier = identifier;
        validation::validate(&Self {
            attributes: updated,
            children: self.children.clone(),
        })
    }

    /// Applies setters to the first node identified by `id`. The tree is
    /// returned unchanged when no such node exists.
    pub fn update_with_id(&self, id: &Id, attributes: impl IntoIterator<Item = Attribute<Id>>) -> Self {
        let Some(path) = self.find_path(id) else {
            tracing::warn!(identifier = ?id, "no field with this identifier to update");
            return self.clone();
        };
        self.update_at(&path, |node| node.update_attributes(attributes))
            .unwrap_or_else(|| self.clone())
    }

    pub fn set_value_with_id(&self, id: &Id, value: impl Into<Value>) -> Self {
        self.update_with_id(id, [Attribute::Value(value.into())])
    }

    // ------------------------------------------------------------------------
    // Repeatables
    // ------------------------------------------------------------------------

    /// A fresh clone of this repeatable's template.
    pub fn spawn_instance(&self) -> Option<Node<Id>> {
        self.template().cloned()
    }

    pub fn can_add_instance(&self) -> bool {
        self.template().is_some()
            && !self.attributes.disabled
            && self
                .attributes
                .repeatable_max
                .map_or(true, |max| self.children.len() < max)
    }

    pub fn can_remove_instance(&self) -> bool {
        self.template().is_some()
            && !self.attributes.disabled
            && self.children.len() > self.attributes.repeatable_min
    }

    /// Grows or shrinks a repeatable to `count` instances, clamped into its
    /// `[repeatable_min, repeatable_max]` bounds. New instances are template
    /// clones; surplus instances are dropped from the end.
    pub(crate) fn with_instance_count(&self, count: usize) -> Self {
        let Some(template) = self.template() else {
            return self.clone();
        };
        let mut target = count.max(self.attributes.repeatable_min);
        if let Some(max) = self.attributes.repeatable_max {
            target = target.min(max);
        }
        let mut children = self.children.clone();
        if children.len() > target {
            children.truncate(target);
        }
        while children.len() < target {
            children.push_back(template.clone());
        }
        self.with_children(children)
    }

    // ------------------------------------------------------------------------
    // Whole-tree views
    // ------------------------------------------------------------------------

    /// Re-runs the validator over this subtree.
    pub fn validate(&self) -> Self {
        validation::validate(self)
    }

    /// Every error stamped anywhere in this subtree, in pre-order.
    pub fn all_errors(&self) -> Vec<&FieldError<Id>> {
        self.iter().flat_map(|(_, node)| node.errors()).collect()
    }

    /// This node's own errors, filtered by its status.
    pub fn visible_errors(&self) -> Vec<&FieldError<Id>> {
        validation::visible_errors(self)
    }

    /// Marks every node as touched, revealing all errors.
    pub fn touch_all(&self) -> Self {
        let mut node = self.map_attributes(|attrs| attrs.status = Status::Touched);
        node.children = self.children.iter().map(Node::touch_all).collect();
        node
    }

    /// Brings a deserialized tree into constructed shape: every repeatable
    /// (and every template) holds at least `repeatable_min` instances, then
    /// the whole tree is validated.
    pub fn normalized(&self) -> Self {
        fill_repeatables(self).validate()
    }
}

// ============================================================================
// TRAVERSAL
// ============================================================================

/// Pre-order iterator over `(path, node)` pairs.
pub struct Preorder<'a, Id: Identifier> {
    stack: Vec<(Path, &'a Node<Id>)>,
}

impl<'a, Id: Identifier> Iterator for Preorder<'a, Id> {
    type Item = (Path, &'a Node<Id>);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        for index in (0..node.children.len()).rev() {
            if let Some(child) = node.children.get(index) {
                self.stack.push((path.child(index), child));
            }
        }
        Some((path, node))
    }
}

// ============================================================================
// IMMUTABLE HELPERS
// ============================================================================

fn update_recursive<Id: Identifier>(
    current: &Node<Id>,
    indices: &[usize],
    edit: impl FnOnce(&Node<Id>) -> Node<Id>,
) -> Option<Node<Id>> {
    let Some((&index, rest)) = indices.split_first() else {
        return Some(edit(current));
    };
    let child = current.children.get(index)?;
    let new_child = update_recursive(child, rest, edit)?;
    let mut children = current.children.clone();
    children.set(index, new_child);
    Some(current.with_children(children))
}

fn fill_repeatables<Id: Identifier>(node: &Node<Id>) -> Node<Id> {
    let mut filled = node.map_attributes(|attrs| {
        if let FieldKind::Repeatable(template) = &mut attrs.kind {
            let refreshed = fill_repeatables(template);
            **template = refreshed;
        }
    });
    filled.children = node.children.iter().map(fill_repeatables).collect();
    if filled.template().is_some() && filled.children.len() < filled.attributes.repeatable_min {
        filled = filled.with_instance_count(filled.attributes.repeatable_min);
    }
    filled
}
