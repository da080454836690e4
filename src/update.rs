//! The update engine.
//!
//! Applies one [`Msg`] to the node its path addresses and returns the new
//! tree. Every edit re-validates the node it touched; ancestors pick up the
//! change on the next whole-tree validation.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    coerce,
    tree::{Identifier, Node, Path, Status},
    validation,
    value::{FileHandle, Value},
};

/// An event raised by a rendering layer.
///
/// `id` is the identifier of the field the event came from, when it has one.
/// It is informational; the engine addresses nodes by `path` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "msg")]
pub enum Msg<Id> {
    ValueChanged {
        id: Option<Id>,
        path: Path,
        raw: String,
        /// Selection start and end, in characters, after the edit.
        selection: (usize, usize),
    },
    Checked {
        id: Option<Id>,
        path: Path,
        checked: bool,
    },
    Focused {
        id: Option<Id>,
        path: Path,
    },
    Blurred {
        id: Option<Id>,
        path: Path,
    },
    /// `path` addresses the repeatable to grow.
    InstanceAdded {
        id: Option<Id>,
        path: Path,
    },
    /// `path` addresses the instance to drop.
    InstanceRemoved {
        id: Option<Id>,
        path: Path,
    },
    FileSelected {
        id: Option<Id>,
        path: Path,
        file: FileHandle,
    },
}

impl<Id> Msg<Id> {
    pub fn path(&self) -> &Path {
        match self {
            Self::ValueChanged { path, .. }
            | Self::Checked { path, .. }
            | Self::Focused { path, .. }
            | Self::Blurred { path, .. }
            | Self::InstanceAdded { path, .. }
            | Self::InstanceRemoved { path, .. }
            | Self::FileSelected { path, .. } => path,
        }
    }

    pub fn id(&self) -> Option<&Id> {
        match self {
            Self::ValueChanged { id, .. }
            | Self::Checked { id, .. }
            | Self::Focused { id, .. }
            | Self::Blurred { id, .. }
            | Self::InstanceAdded { id, .. }
            | Self::InstanceRemoved { id, .. }
            | Self::FileSelected { id, .. } => id.as_ref(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ValueChanged { .. } => "value_changed",
            Self::Checked { .. } => "checked",
            Self::Focused { .. } => "focused",
            Self::Blurred { .. } => "blurred",
            Self::InstanceAdded { .. } => "instance_added",
            Self::InstanceRemoved { .. } => "instance_removed",
            Self::FileSelected { .. } => "file_selected",
        }
    }
}

// ============================================================================
// STATUS TRANSITIONS
// ============================================================================

/// `Pristine -> Focused`. Any later status is kept.
fn on_focus(status: Status) -> Status {
    match status {
        Status::Pristine => Status::Focused,
        other => other,
    }
}

/// `Pristine | Focused -> Editing`. A touched field stays touched.
fn on_edit(status: Status) -> Status {
    match status {
        Status::Pristine | Status::Focused => Status::Editing,
        other => other,
    }
}

// ============================================================================
// UPDATE
// ============================================================================

/// Applies `msg` to `tree`. A message whose path does not address a suitable
/// node leaves the tree unchanged.
pub fn update<Id: Identifier>(msg: Msg<Id>, tree: &Node<Id>) -> Node<Id> {
    debug!(msg = msg.name(), path = %msg.path(), "applying update");

    let updated = match &msg {
        Msg::ValueChanged {
            path,
            raw,
            selection,
            ..
        } => tree.update_at(path, |node| change_value(node, raw, *selection)),
        Msg::Checked { path, checked, .. } => tree.update_at(path, |node| {
            set_value(node, Value::Boolean(*checked))
        }),
        Msg::Focused { path, .. } => tree.update_at(path, |node| {
            validation::validate(&node.map_attributes(|attrs| attrs.status = on_focus(attrs.status)))
        }),
        Msg::Blurred { path, .. } => tree.update_at(path, |node| {
            validation::validate(&node.map_attributes(|attrs| attrs.status = Status::Touched))
        }),
        Msg::FileSelected { path, file, .. } => tree.update_at(path, |node| {
            set_value(node, Value::File(file.clone()))
        }),
        Msg::InstanceAdded { path, .. } => add_instance(tree, path),
        Msg::InstanceRemoved { path, .. } => remove_instance(tree, path),
    };

    updated.unwrap_or_else(|| {
        warn!(msg = msg.name(), path = %msg.path(), "update ignored");
        tree.clone()
    })
}

fn change_value<Id: Identifier>(node: &Node<Id>, raw: &str, selection: (usize, usize)) -> Node<Id> {
    let attrs = node.attributes();
    let (text, selection) = if attrs.pattern.is_empty() {
        (raw.to_string(), selection)
    } else {
        let formatted = attrs.pattern.format(raw, selection.0);
        (formatted.value, (formatted.cursor, formatted.cursor))
    };
    let value = coerce::coerce(attrs, &text);

    let edited = node.map_attributes(|attrs| {
        attrs.value = value;
        attrs.status = on_edit(attrs.status);
        attrs.errors.clear();
        attrs.selection_start = selection.0;
        attrs.selection_end = selection.1;
    });
    validation::validate(&edited)
}

fn set_value<Id: Identifier>(node: &Node<Id>, value: Value) -> Node<Id> {
    validation::validate(&node.map_attributes(|attrs| attrs.value = value))
}

fn add_instance<Id: Identifier>(tree: &Node<Id>, path: &Path) -> Option<Node<Id>> {
    let repeatable = tree.get(path)?;
    if !repeatable.can_add_instance() {
        return None;
    }
    let instance = repeatable.spawn_instance()?;
    tree.update_at(path, |node| {
        let mut children = node.children().clone();
        children.push_back(instance);
        validation::validate(&node.with_children(children))
    })
}

fn remove_instance<Id: Identifier>(tree: &Node<Id>, path: &Path) -> Option<Node<Id>> {
    let (parent_path, index) = path.parent()?;
    let parent = tree.get(&parent_path)?;
    if index >= parent.children().len() || !parent.can_remove_instance() {
        return None;
    }
    tree.update_at(&parent_path, |node| {
        let mut children = node.children().clone();
        children.remove(index);
        validation::validate(&node.with_children(children))
    })
}
