//! Structural edits shared by rule fixers and the auto-fixer.
//!
//! Every edit is additive-safe: it creates missing intermediate objects,
//! reuses existing ones and refuses to overwrite scalars that are in the way.

use anyhow::{anyhow, bail, Context};
use serde_json::{json, Map, Value};

use crate::document::{ensure_object, operation_mut, rename_key, Document, DocumentPath};

/// Add an HTTP bearer (JWT) security scheme unless one with this name exists.
pub fn ensure_bearer_scheme(doc: &mut Document, scheme: &str) -> anyhow::Result<()> {
    let schemes = ensure_object(doc, &["components", "securitySchemes"])
        .ok_or_else(|| anyhow!("components.securitySchemes is not an object"))?;
    schemes.entry(scheme.to_string()).or_insert_with(|| {
        json!({
            "type": "http",
            "scheme": "bearer",
            "bearerFormat": "JWT"
        })
    });
    Ok(())
}

/// Require `scheme` on one operation.
///
/// The scheme is created if missing. An operation that already carries a
/// non-empty `security` array is left alone.
pub fn secure_operation(
    doc: &mut Document,
    path: &str,
    method: &str,
    scheme: &str,
) -> anyhow::Result<()> {
    ensure_bearer_scheme(doc, scheme)?;
    let op = operation_mut(doc, path, method)
        .with_context(|| format!("operation {} {} not found", method.to_uppercase(), path))?;

    let secured = op
        .get("security")
        .and_then(Value::as_array)
        .is_some_and(|reqs| !reqs.is_empty());
    if !secured {
        op.insert("security".to_string(), json!([{ scheme: [] }]));
    }
    Ok(())
}

/// Default summary for an operation: `"GET /widgets"`.
pub fn default_summary(method: &str, path: &str) -> String {
    format!("{} {}", method.to_uppercase(), path)
}

/// Add a `200` response unless the operation already has one.
pub fn add_success_response(op: &mut Map<String, Value>) -> anyhow::Result<()> {
    let responses = op
        .entry("responses".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if responses.is_null() {
        *responses = Value::Object(Map::new());
    }
    let Some(responses) = responses.as_object_mut() else {
        bail!("responses is not an object");
    };
    responses
        .entry("200".to_string())
        .or_insert_with(|| json!({ "description": "Successful response" }));
    Ok(())
}

/// Rename one path key, keeping its position.
///
/// Returns `false` if the key is missing or the new name is taken.
pub fn rename_path(doc: &mut Document, from: &str, to: &str) -> bool {
    doc.get_mut("paths")
        .and_then(Value::as_object_mut)
        .is_some_and(|paths| rename_key(paths, from, to))
}

/// Rename one named schema and rewrite every `$ref` that points at it.
///
/// Both `components.schemas` and `definitions` are searched. Returns `false`
/// if the schema is missing or the new name is taken.
pub fn rename_schema(doc: &mut Document, from: &str, to: &str) -> bool {
    for container in [&["components", "schemas"][..], &["definitions"][..]] {
        let renamed = container
            .iter()
            .try_fold(&mut *doc, |node, key| node.get_mut(*key))
            .and_then(Value::as_object_mut)
            .is_some_and(|schemas| rename_key(schemas, from, to));
        if renamed {
            let old_ref = DocumentPath::from_segments(container.iter().copied().chain([from]))
                .to_json_pointer();
            let new_ref = DocumentPath::from_segments(container.iter().copied().chain([to]))
                .to_json_pointer();
            rewrite_refs(doc, &old_ref, &new_ref);
            return true;
        }
    }
    false
}

fn rewrite_refs(node: &mut Value, old_ref: &str, new_ref: &str) {
    match node {
        Value::Object(map) => {
            for (key, value) in map.iter_mut() {
                if key == "$ref" {
                    if let Some(target) = value.as_str() {
                        if let Some(rewritten) = rewrite_ref(target, old_ref, new_ref) {
                            *value = Value::String(rewritten);
                        }
                    }
                } else {
                    rewrite_refs(value, old_ref, new_ref);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                rewrite_refs(item, old_ref, new_ref);
            }
        }
        _ => {}
    }
}

fn rewrite_ref(target: &str, old_ref: &str, new_ref: &str) -> Option<String> {
    let rest = target.strip_prefix(old_ref)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(format!("{}{}", new_ref, rest))
    } else {
        None
    }
}

/// Split an identifier into ASCII words at separators and case changes.
///
/// `"getHTTPResponse_v2"` becomes `["get", "HTTP", "Response", "v2"]`.
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    word.chars()
        .enumerate()
        .map(|(i, c)| {
            if i == 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

/// Kebab-case every literal segment of a URL path.
///
/// Template segments such as `{widgetId}` are kept as they are and empty
/// segments are dropped.
pub fn to_kebab_case(path: &str) -> String {
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .filter_map(|segment| {
            if segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}') {
                return Some(segment.to_string());
            }
            let words = split_words(segment);
            if words.is_empty() {
                None
            } else {
                Some(words.join("-").to_lowercase())
            }
        })
        .collect();

    let mut out = format!("/{}", segments.join("/"));
    if path.ends_with('/') && !segments.is_empty() {
        out.push('/');
    }
    out
}

/// PascalCase a schema name.
pub fn to_pascal_case(name: &str) -> String {
    let pascal: String = split_words(name).iter().map(|w| capitalize(w)).collect();
    if pascal.starts_with(|c: char| c.is_ascii_digit()) || pascal.is_empty() {
        format!("Schema{}", pascal)
    } else {
        pascal
    }
}

/// camelCase operation id derived from method and path.
///
/// `GET /widgets/{id}` becomes `getWidgetsById`.
pub fn operation_id_for(method: &str, path: &str) -> String {
    let mut words = vec![method.to_lowercase()];
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if let Some(param) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            words.push("By".to_string());
            words.extend(split_words(param));
        } else {
            words.extend(split_words(segment));
        }
    }

    let mut id = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            id.push_str(&word.to_lowercase());
        } else {
            id.push_str(&capitalize(word));
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_operation_adds_scheme_and_requirement() {
        let mut doc = json!({"paths": {"/widgets": {"get": {}}}});
        secure_operation(&mut doc, "/widgets", "get", "BearerAuth").unwrap();

        assert_eq!(
            doc["components"]["securitySchemes"]["BearerAuth"],
            json!({"type": "http", "scheme": "bearer", "bearerFormat": "JWT"})
        );
        assert_eq!(doc["paths"]["/widgets"]["get"]["security"], json!([{"BearerAuth": []}]));
    }

    #[test]
    fn secure_operation_keeps_existing_scheme_and_components() {
        let mut doc = json!({
            "paths": {"/widgets": {"get": {"security": []}}},
            "components": {
                "schemas": {"Widget": {}},
                "securitySchemes": {"BearerAuth": {"type": "http", "scheme": "bearer"}}
            }
        });
        secure_operation(&mut doc, "/widgets", "get", "BearerAuth").unwrap();

        assert_eq!(doc["components"]["schemas"]["Widget"], json!({}));
        assert!(doc["components"]["securitySchemes"]["BearerAuth"]
            .get("bearerFormat")
            .is_none());
        assert_eq!(doc["paths"]["/widgets"]["get"]["security"], json!([{"BearerAuth": []}]));
    }

    #[test]
    fn secure_operation_missing_operation_errors() {
        let mut doc = json!({"paths": {}});
        let err = secure_operation(&mut doc, "/nope", "get", "BearerAuth").unwrap_err();
        assert!(err.to_string().contains("GET /nope"));
    }

    #[test]
    fn add_success_response_is_additive() {
        let mut op = json!({"responses": {"404": {"description": "nope"}}})
            .as_object()
            .unwrap()
            .clone();
        add_success_response(&mut op).unwrap();
        add_success_response(&mut op).unwrap();
        assert_eq!(op["responses"]["200"]["description"], "Successful response");
        assert_eq!(op["responses"]["404"]["description"], "nope");
    }

    #[test]
    fn rename_schema_rewrites_refs() {
        let mut doc = json!({
            "paths": {"/w": {"get": {"responses": {"200": {"content": {"application/json": {
                "schema": {"$ref": "#/components/schemas/widget_item"}
            }}}}}}},
            "components": {"schemas": {
                "widget_item": {"type": "object"},
                "List": {"items": {"$ref": "#/components/schemas/widget_item/properties/id"}},
                "Other": {"$ref": "#/components/schemas/widget_item_extra"}
            }}
        });
        assert!(rename_schema(&mut doc, "widget_item", "WidgetItem"));

        let schemas = doc["components"]["schemas"].as_object().unwrap();
        assert_eq!(schemas.keys().next().unwrap(), "WidgetItem");
        assert_eq!(
            doc["paths"]["/w"]["get"]["responses"]["200"]["content"]["application/json"]["schema"]
                ["$ref"],
            "#/components/schemas/WidgetItem"
        );
        assert_eq!(
            schemas["List"]["items"]["$ref"],
            "#/components/schemas/WidgetItem/properties/id"
        );
        assert_eq!(schemas["Other"]["$ref"], "#/components/schemas/widget_item_extra");
    }

    #[test]
    fn rename_schema_handles_definitions() {
        let mut doc = json!({
            "definitions": {"pet": {}},
            "paths": {"/p": {"get": {"schema": {"$ref": "#/definitions/pet"}}}}
        });
        assert!(rename_schema(&mut doc, "pet", "Pet"));
        assert_eq!(doc["paths"]["/p"]["get"]["schema"]["$ref"], "#/definitions/Pet");
        assert!(!rename_schema(&mut doc, "missing", "Missing"));
    }

    #[test]
    fn rename_path_refuses_collisions() {
        let mut doc = json!({"paths": {"/A": {}, "/a": {}}});
        assert!(!rename_path(&mut doc, "/A", "/a"));
        assert!(rename_path(&mut json!({"paths": {"/A": {}}}), "/A", "/a"));
    }

    #[test]
    fn kebab_case_paths() {
        assert_eq!(to_kebab_case("/userProfiles/{userId}"), "/user-profiles/{userId}");
        assert_eq!(to_kebab_case("/User_Settings"), "/user-settings");
        assert_eq!(to_kebab_case("/api/v2/HTTPStatus/"), "/api/v2/http-status/");
        assert_eq!(to_kebab_case("/"), "/");
        assert_eq!(to_kebab_case("widgets//list"), "/widgets/list");
    }

    #[test]
    fn pascal_case_schemas() {
        assert_eq!(to_pascal_case("user_profile"), "UserProfile");
        assert_eq!(to_pascal_case("widget-item"), "WidgetItem");
        assert_eq!(to_pascal_case("userID"), "UserId");
        assert_eq!(to_pascal_case("2fa"), "Schema2fa");
    }

    #[test]
    fn operation_ids() {
        assert_eq!(operation_id_for("get", "/widgets"), "getWidgets");
        assert_eq!(operation_id_for("DELETE", "/widgets/{widgetId}"), "deleteWidgetsByWidgetId");
        assert_eq!(operation_id_for("post", "/user-profiles"), "postUserProfiles");
        assert_eq!(operation_id_for("get", "/"), "get");
    }

    #[test]
    fn summary_uses_method_and_path() {
        assert_eq!(default_summary("get", "/widgets"), "GET /widgets");
    }
}
