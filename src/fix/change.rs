//! Structural before/after comparison of documents.

use serde::Serialize;
use serde_json::Value;

use crate::document::DocumentPath;

/// Kind of structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Add,
    Update,
    Remove,
}

/// One node that a fix added, changed or removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixChange {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub path: DocumentPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

/// Compare two documents and list the changed nodes.
///
/// Objects are compared key by key; arrays and scalars are compared as
/// whole values. Changes are reported at the shallowest differing node, in
/// document order (removals of a map's keys come before its additions).
pub fn diff_values(before: &Value, after: &Value) -> Vec<FixChange> {
    let mut changes = Vec::new();
    walk(&DocumentPath::root(), before, after, &mut changes);
    changes
}

fn walk(path: &DocumentPath, before: &Value, after: &Value, changes: &mut Vec<FixChange>) {
    match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, old_value) in old {
                let child = path.join(key.as_str());
                match new.get(key) {
                    Some(new_value) => walk(&child, old_value, new_value, changes),
                    None => changes.push(FixChange {
                        kind: ChangeKind::Remove,
                        path: child,
                        old_value: Some(old_value.clone()),
                        new_value: None,
                    }),
                }
            }
            for (key, new_value) in new {
                if !old.contains_key(key) {
                    changes.push(FixChange {
                        kind: ChangeKind::Add,
                        path: path.join(key.as_str()),
                        old_value: None,
                        new_value: Some(new_value.clone()),
                    });
                }
            }
        }
        (old, new) if old != new => changes.push(FixChange {
            kind: ChangeKind::Update,
            path: path.clone(),
            old_value: Some(old.clone()),
            new_value: Some(new.clone()),
        }),
        _ => {}
    }
}
