//! Parsing and serialization of specification documents.
//!
//! Documents arrive as raw JSON or YAML text and are normalized into a
//! [`serde_json::Value`] tree. YAML mapping keys that are not strings (for
//! example the `200:` response codes) are stringified so the tree stays
//! JSON-compatible.

use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};

use super::Document;
use crate::error::{Result, SpecGuardError};

/// Text format a document was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            DocumentFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// A parsed document together with its source format.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub document: Document,
    pub format: DocumentFormat,
}

/// Detect the format of raw text.
///
/// Text whose first non-whitespace character opens a JSON object or array
/// is treated as JSON; everything else as YAML.
pub fn detect_format(text: &str) -> DocumentFormat {
    match text.trim_start().chars().next() {
        Some('{') | Some('[') => DocumentFormat::Json,
        _ => DocumentFormat::Yaml,
    }
}

/// Parse raw text into a document.
pub fn parse_document(text: &str) -> Result<ParsedDocument> {
    if text.trim().is_empty() {
        return Err(SpecGuardError::Parse {
            message: "document is empty".to_string(),
            line: None,
            column: None,
        });
    }

    let format = detect_format(text);
    let document = match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(text).map_err(|e| SpecGuardError::Parse {
                message: e.to_string(),
                line: Some(e.line()),
                column: Some(e.column()),
            })?
        }
        DocumentFormat::Yaml => {
            let raw: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|e| SpecGuardError::Parse {
                    message: e.to_string(),
                    line: e.location().map(|l| l.line()),
                    column: e.location().map(|l| l.column()),
                })?;
            yaml_to_json(raw)?
        }
    };

    if !document.is_object() {
        return Err(SpecGuardError::Parse {
            message: "document root must be a mapping".to_string(),
            line: Some(1),
            column: Some(1),
        });
    }

    tracing::debug!(%format, "parsed document");
    Ok(ParsedDocument { document, format })
}

/// Serialize a document back to text in the given format.
///
/// JSON output is pretty-printed with a trailing newline.
pub fn serialize_document(doc: &Document, format: DocumentFormat) -> Result<String> {
    match format {
        DocumentFormat::Json => {
            let mut text =
                serde_json::to_string_pretty(doc).map_err(|e| SpecGuardError::Serialize {
                    message: e.to_string(),
                })?;
            text.push('\n');
            Ok(text)
        }
        DocumentFormat::Yaml => serde_yaml::to_string(doc).map_err(|e| SpecGuardError::Serialize {
            message: e.to_string(),
        }),
    }
}

/// SHA-256 fingerprint of raw document text, hex encoded.
pub fn fingerprint(text: &str) -> String {
    let hash = Sha256::digest(text.as_bytes());
    hex::encode(&hash[..])
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n)?,
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        Ok(Value::Number(i.into()))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::Number(u.into()))
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| SpecGuardError::Parse {
                message: format!("number {} cannot be represented in JSON", n),
                line: None,
                column: None,
            })
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        other => Err(SpecGuardError::Parse {
            message: format!("unsupported mapping key: {:?}", other),
            line: None,
            column: None,
        }),
    }
}
