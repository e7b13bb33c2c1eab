//! Traversal helpers over specification documents.

use serde_json::{Map, Value};

use super::{Document, DocumentPath};

/// HTTP methods recognized as operations inside a path item.
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// One operation inside `paths`.
#[derive(Debug, Clone, Copy)]
pub struct Operation<'a> {
    /// Path key, e.g. `/widgets/{id}`.
    pub path: &'a str,
    /// Method key as written in the document, e.g. `get`.
    pub method: &'a str,
    /// The operation object.
    pub value: &'a Value,
}

impl<'a> Operation<'a> {
    /// `#/paths/<path>/<method>`
    pub fn location(&self) -> DocumentPath {
        DocumentPath::operation(self.path, self.method)
    }

    /// `"GET /widgets"`
    pub fn label(&self) -> String {
        format!("{} {}", self.method.to_uppercase(), self.path)
    }

    /// String field of the operation, if present.
    pub fn str_field(&self, key: &str) -> Option<&'a str> {
        self.value.get(key).and_then(Value::as_str)
    }

    /// Tags attached to the operation.
    pub fn tags(&self) -> Vec<&'a str> {
        self.value
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// One named schema.
#[derive(Debug, Clone, Copy)]
pub struct NamedSchema<'a> {
    pub name: &'a str,
    pub value: &'a Value,
    /// Whether this came from Swagger 2 `definitions`.
    pub legacy: bool,
}

impl NamedSchema<'_> {
    /// `#/components/schemas/<name>` (or `#/definitions/<name>`).
    pub fn location(&self) -> DocumentPath {
        if self.legacy {
            DocumentPath::from_segments(["definitions", self.name])
        } else {
            DocumentPath::schema(self.name)
        }
    }
}

/// Top-level path keys in document order.
pub fn path_keys(doc: &Document) -> Vec<&str> {
    doc.get("paths")
        .and_then(Value::as_object)
        .map(|paths| paths.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Whether a path item key names an operation.
pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.iter().any(|m| m.eq_ignore_ascii_case(key))
}

/// Every operation under `paths`, in document order.
///
/// Only [`HTTP_METHODS`] keys with object values count; `parameters`,
/// `servers`, `summary` and `x-` extensions are skipped.
pub fn operations(doc: &Document) -> Vec<Operation<'_>> {
    let Some(paths) = doc.get("paths").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut ops = Vec::new();
    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };
        for (method, value) in item {
            if !is_http_method(method) || !value.is_object() {
                continue;
            }
            ops.push(Operation {
                path,
                method,
                value,
            });
        }
    }
    ops
}

/// Every named schema under `components.schemas` and `definitions`.
pub fn schemas(doc: &Document) -> Vec<NamedSchema<'_>> {
    let modern = doc
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
        .map(|(name, value)| NamedSchema {
            name,
            value,
            legacy: false,
        });
    let legacy = doc
        .get("definitions")
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
        .map(|(name, value)| NamedSchema {
            name,
            value,
            legacy: true,
        });
    modern.chain(legacy).collect()
}

/// Walk `keys` from `doc`, creating empty objects where absent.
///
/// Existing objects are reused untouched. A non-object node in the way is
/// replaced by an empty object only if it is `null`; otherwise `None` is
/// returned so callers never clobber unrelated data.
pub fn ensure_object<'a>(
    doc: &'a mut Document,
    keys: &[&str],
) -> Option<&'a mut Map<String, Value>> {
    let mut node = doc;
    for key in keys {
        if node.is_null() {
            *node = Value::Object(Map::new());
        }
        node = node
            .as_object_mut()?
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    if node.is_null() {
        *node = Value::Object(Map::new());
    }
    node.as_object_mut()
}

/// Mutable access to one operation object.
pub fn operation_mut<'a>(
    doc: &'a mut Document,
    path: &str,
    method: &str,
) -> Option<&'a mut Map<String, Value>> {
    doc.get_mut("paths")?
        .get_mut(path)?
        .get_mut(method)?
        .as_object_mut()
}

/// Rebuild `map` with `from` renamed to `to`, keeping its position.
///
/// Returns `false` when `from` is absent or `to` is already taken.
pub fn rename_key(map: &mut Map<String, Value>, from: &str, to: &str) -> bool {
    if !map.contains_key(from) || map.contains_key(to) {
        return false;
    }
    let old = std::mem::take(map);
    for (key, value) in old {
        if key == from {
            map.insert(to.to_string(), value);
        } else {
            map.insert(key, value);
        }
    }
    true
}
