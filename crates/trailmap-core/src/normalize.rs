//! Hierarchy normalizer: loosely-typed nested record -> canonical [`Node`] tree.
//!
//! Recognized item fields: `name`, `status`, `link` (falls back to `links`), `category`,
//! `side`, `visibility`, `items`. Unknown fields are ignored. Scalars (numbers, booleans) are
//! accepted wherever text is expected, which keeps YAML inputs like `name: 2025` usable.
//!
//! Malformed items are dropped together with their subtree; each drop is reported as a
//! [`Diagnostic`] and logged via `tracing`. Only an unusable root is a hard failure.

use crate::model::{Node, Side, Status};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name given to the synthetic root that adopts a multi-element array root.
pub const SYNTHETIC_ROOT_NAME: &str = "Root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Item has no usable `name`; it was dropped with its subtree.
    MissingName,
    /// Item is not an object; it was dropped.
    InvalidItem,
    /// `items` is present but not an array; the item was kept as a leaf.
    InvalidItems,
    /// `side` is neither `left` nor `right`; the value was ignored.
    UnknownSide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Location of the offending item, e.g. `$.items[2].items[0]`.
    pub path: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub root: Node,
    pub diagnostics: Vec<Diagnostic>,
}

/// Normalizes `raw`, discarding diagnostics (they are still logged).
pub fn normalize_roadmap(raw: &Value) -> Result<Node> {
    normalize_roadmap_with_diagnostics(raw).map(|n| n.root)
}

pub fn normalize_roadmap_with_diagnostics(raw: &Value) -> Result<Normalized> {
    let mut diagnostics = Vec::new();
    let root = match raw {
        Value::Array(items) => match items.as_slice() {
            [] => {
                return Err(Error::EmptyTree {
                    message: "root array has no items".to_string(),
                });
            }
            [only] => normalize_item(only, "$[0]".to_string(), &mut diagnostics),
            many => {
                let mut root = Node::new(SYNTHETIC_ROOT_NAME);
                root.children = many
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| normalize_item(v, format!("$[{i}]"), &mut diagnostics))
                    .collect();
                Some(root)
            }
        },
        Value::Object(_) => normalize_item(raw, "$".to_string(), &mut diagnostics),
        other => {
            return Err(Error::EmptyTree {
                message: format!("expected an object or array root, got `{other}`"),
            });
        }
    };

    let Some(root) = root else {
        return Err(Error::EmptyTree {
            message: "root item has no name".to_string(),
        });
    };
    tracing::debug!(
        nodes = root.count(),
        dropped = diagnostics.len(),
        "normalized roadmap"
    );
    Ok(Normalized { root, diagnostics })
}

fn normalize_item(value: &Value, path: String, diagnostics: &mut Vec<Diagnostic>) -> Option<Node> {
    let Some(obj) = value.as_object() else {
        report(
            diagnostics,
            path,
            DiagnosticKind::InvalidItem,
            format!("expected an object item, got `{value}`; dropped"),
        );
        return None;
    };

    let Some(name) = text_field(obj, "name") else {
        let dropped = descendant_count(value);
        report(
            diagnostics,
            path,
            DiagnosticKind::MissingName,
            format!("item without a name dropped along with {dropped} descendant(s)"),
        );
        return None;
    };

    let mut node = Node::new(name);
    node.status = text_field(obj, "status")
        .map(|s| Status::parse(&s))
        .unwrap_or_default();
    node.link = text_field(obj, "link").or_else(|| links_field(obj));
    node.category = text_field(obj, "category");
    node.visibility = text_field(obj, "visibility");
    node.side = match text_field(obj, "side") {
        None => None,
        Some(raw) => {
            let side = Side::parse(&raw);
            if side.is_none() {
                report(
                    diagnostics,
                    path.clone(),
                    DiagnosticKind::UnknownSide,
                    format!("unknown side `{raw}` ignored"),
                );
            }
            side
        }
    };

    match obj.get("items") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            node.children = items
                .iter()
                .enumerate()
                .filter_map(|(i, v)| normalize_item(v, format!("{path}.items[{i}]"), diagnostics))
                .collect();
        }
        Some(other) => report(
            diagnostics,
            path,
            DiagnosticKind::InvalidItems,
            format!("`items` must be an array, got `{other}`; kept as a leaf"),
        ),
    }

    Some(node)
}

fn report(diagnostics: &mut Vec<Diagnostic>, path: String, kind: DiagnosticKind, message: String) {
    tracing::warn!(path = %path, ?kind, "{message}");
    diagnostics.push(Diagnostic {
        path,
        kind,
        message,
    });
}

fn scalar_text(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(scalar_text)
}

// `links` may be a single URL or a list of them; the first usable entry wins.
fn links_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("links")? {
        Value::Array(list) => list.iter().find_map(scalar_text),
        other => scalar_text(other),
    }
}

fn descendant_count(value: &Value) -> usize {
    let mut count = 0usize;
    let mut stack = vec![value];
    while let Some(v) = stack.pop() {
        if let Some(Value::Array(items)) = v.get("items") {
            count += items.len();
            stack.extend(items.iter());
        }
    }
    count
}

#[cfg(test)]
mod tests;
