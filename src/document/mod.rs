//! Specification documents.
//!
//! A document is an arbitrary JSON-compatible tree. This module provides:
//! - Parsing from JSON/YAML text and serialization back in [`parse`]
//! - Structural node addressing with [`DocumentPath`] in [`path`]
//! - Operation and schema enumeration in [`walk`]
//! - Best-effort source locations in [`locate`]
//!
//! # Example
//!
//! ```
//! use specguard::document::{operations, parse_document, DocumentPath};
//!
//! let parsed = parse_document("paths:\n  /widgets:\n    get: {}\n").unwrap();
//! let ops = operations(&parsed.document);
//! assert_eq!(ops.len(), 1);
//! assert_eq!(ops[0].location(), DocumentPath::operation("/widgets", "get"));
//! ```

pub mod locate;
pub mod parse;
pub mod path;
pub mod walk;

/// A specification document tree.
pub type Document = serde_json::Value;

pub use locate::locate;
pub use parse::{
    detect_format, fingerprint, parse_document, serialize_document, DocumentFormat,
    ParsedDocument,
};
pub use path::DocumentPath;
pub use walk::{
    ensure_object, is_http_method, operation_mut, operations, path_keys, rename_key, schemas,
    NamedSchema, Operation, HTTP_METHODS,
};
