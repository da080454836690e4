//! The JSON bridge.
//!
//! Export walks the tree keyed by field `name`: unnamed groups are
//! transparent, named groups nest, and named repeatables become arrays of
//! objects. Import goes the other way through dotted name paths such as
//! `hobbies.0.hobby`, pushing each JSON leaf into its field through the same
//! string coercion a keystroke uses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use tracing::{debug, warn};

use crate::{
    coerce,
    errors::FieldError,
    tree::{FieldKind, Identifier, Node, Path},
};

// ============================================================================
// EXPORT
// ============================================================================

/// Encodes the tree as a JSON object.
///
/// Fails with `HasNoName` when a repeatable has no name, or when a leaf
/// under a named container has none. Unnamed leaves elsewhere are skipped.
pub fn to_json<Id: Identifier>(node: &Node<Id>) -> Result<Json, FieldError<Id>> {
    let mut object = Map::new();
    encode_into(node, &mut object, false)?;
    Ok(Json::Object(object))
}

fn encode_into<Id: Identifier>(
    node: &Node<Id>,
    object: &mut Map<String, Json>,
    in_named: bool,
) -> Result<(), FieldError<Id>> {
    let id = node.identifier().cloned();
    match (node.kind(), node.name()) {
        (FieldKind::Group, Some(name)) => {
            let mut nested = Map::new();
            for child in node.children() {
                encode_into(child, &mut nested, true)?;
            }
            object.insert(name.to_string(), Json::Object(nested));
        }
        (FieldKind::Group, None) => {
            for child in node.children() {
                encode_into(child, object, in_named)?;
            }
        }
        (FieldKind::Repeatable(_), Some(name)) => {
            let items = node
                .children()
                .iter()
                .map(|child| {
                    let mut item = Map::new();
                    encode_into(child, &mut item, true)?;
                    Ok(Json::Object(item))
                })
                .collect::<Result<Vec<_>, FieldError<Id>>>()?;
            object.insert(name.to_string(), Json::Array(items));
        }
        (FieldKind::Repeatable(_), None) => return Err(FieldError::HasNoName(id)),
        (_, Some(name)) => {
            object.insert(name.to_string(), node.value().to_json());
        }
        (_, None) if in_named => return Err(FieldError::HasNoName(id)),
        (_, None) => {}
    }
    Ok(())
}

// ============================================================================
// NAME PATHS
// ============================================================================

/// Every named leaf's dotted name path, with the tree path it resolves to,
/// in pre-order. Repeatable instances contribute their index as a segment.
pub fn names_to_paths<Id: Identifier>(node: &Node<Id>) -> Vec<(String, Path)> {
    let mut out = Vec::new();
    collect_names(node, Path::root(), None, &mut out);
    out
}

fn join(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}.{}", prefix, segment),
        None => segment.to_string(),
    }
}

fn collect_names<Id: Identifier>(
    node: &Node<Id>,
    path: Path,
    prefix: Option<&str>,
    out: &mut Vec<(String, Path)>,
) {
    match node.kind() {
        FieldKind::Group => {
            let scoped = node.name().map(|name| join(prefix, name));
            let prefix = scoped.as_deref().or(prefix);
            for (index, child) in node.children().iter().enumerate() {
                collect_names(child, path.child(index), prefix, out);
            }
        }
        FieldKind::Repeatable(_) => {
            let scoped = node.name().map(|name| join(prefix, name));
            let prefix = scoped.as_deref().or(prefix);
            for (index, child) in node.children().iter().enumerate() {
                let item = join(prefix, &index.to_string());
                collect_names(child, path.child(index), Some(&item), out);
            }
        }
        _ => {
            if let Some(name) = node.name() {
                out.push((join(prefix, name), path));
            }
        }
    }
}

// ============================================================================
// IMPORT
// ============================================================================

/// How forgiving an import is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Fail the whole import on a key no field is named for. When off, such
    /// keys are logged and skipped.
    pub strict: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// Pushes a JSON snapshot into the tree's fields, strictly.
pub fn update_values_from_json<Id: Identifier>(
    node: &Node<Id>,
    json: &Json,
) -> Result<Node<Id>, FieldError<Id>> {
    update_values_from_json_with(node, json, ImportOptions::default())
}

/// Pushes a JSON snapshot into the tree's fields.
///
/// Named repeatables are first resized to the length of their JSON arrays,
/// within their bounds. Each JSON leaf is then coerced into the field its
/// dotted key names, and the whole tree is re-validated.
pub fn update_values_from_json_with<Id: Identifier>(
    node: &Node<Id>,
    json: &Json,
    options: ImportOptions,
) -> Result<Node<Id>, FieldError<Id>> {
    let mut tree = resize_repeatables(node, Some(json));

    let mut index: HashMap<String, Path> = HashMap::new();
    for (name, path) in names_to_paths(&tree) {
        index.entry(name).or_insert(path);
    }

    let mut leaves = Vec::new();
    flatten(json, None, &mut leaves);
    debug!(leaves = leaves.len(), named = index.len(), strict = options.strict, "importing JSON");

    for (key, raw) in leaves {
        let Some(path) = index.get(&key) else {
            if options.strict {
                return Err(FieldError::CustomError(
                    None,
                    format!("No name path: {} was found", key),
                ));
            }
            warn!(key = %key, "no field named for JSON key, skipping");
            continue;
        };
        debug!(key = %key, path = %path, "importing value");
        let updated = tree.update_at(path, |field| {
            field.map_attributes(|attrs| attrs.value = coerce::coerce_json(attrs, &raw))
        });
        if let Some(updated) = updated {
            tree = updated;
        }
    }

    Ok(tree.validate())
}

/// Grows or shrinks each named repeatable to the length of the JSON array
/// found at its name.
fn resize_repeatables<Id: Identifier>(node: &Node<Id>, json: Option<&Json>) -> Node<Id> {
    match node.kind() {
        FieldKind::Group => {
            let scoped = match node.name() {
                Some(name) => json.and_then(|json| json.get(name)),
                None => json,
            };
            let children = node
                .children()
                .iter()
                .map(|child| resize_repeatables(child, scoped))
                .collect();
            node.with_children(children)
        }
        FieldKind::Repeatable(_) => {
            let items = node
                .name()
                .and_then(|name| json.and_then(|json| json.get(name)))
                .and_then(Json::as_array);
            let resized = match items {
                Some(items) => {
                    debug!(
                        name = node.name().unwrap_or_default(),
                        from = node.children().len(),
                        requested = items.len(),
                        "resizing repeatable"
                    );
                    node.with_instance_count(items.len())
                }
                None => node.clone(),
            };
            let children = resized
                .children()
                .iter()
                .enumerate()
                .map(|(index, child)| {
                    resize_repeatables(child, items.and_then(|items| items.get(index)))
                })
                .collect();
            resized.with_children(children)
        }
        _ => node.clone(),
    }
}

/// Flattens JSON into `(dotted key, string)` leaves. Null becomes the empty
/// string; booleans and numbers render as text.
fn flatten(json: &Json, prefix: Option<&str>, out: &mut Vec<(String, String)>) {
    let key = || prefix.unwrap_or_default().to_string();
    match json {
        Json::Object(object) => {
            for (name, value) in object {
                flatten(value, Some(&join(prefix, name)), out);
            }
        }
        Json::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten(value, Some(&join(prefix, &index.to_string())), out);
            }
        }
        Json::Null => out.push((key(), String::new())),
        Json::Bool(b) => out.push((key(), b.to_string())),
        Json::Number(n) => out.push((key(), n.to_string())),
        Json::String(s) => out.push((key(), s.clone())),
    }
}
