//! Document path addressing.
//!
//! A [`DocumentPath`] addresses a node inside a specification document as an
//! ordered list of segments. Two renderings exist:
//!
//! - `Display` gives the reference form used in reported results, with
//!   segments joined verbatim (`#/paths//widgets/get`)
//! - [`DocumentPath::to_json_pointer`] gives the RFC 6901 form with `~0`/`~1`
//!   escaping (`#/paths/~1widgets/get`), which [`DocumentPath::parse`] reads back

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// A JSON-pointer-like address of a node in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// The document root (`#`).
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from raw (unescaped) segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// `#/paths/<path>`
    pub fn path_item(path: &str) -> Self {
        Self::from_segments(["paths", path])
    }

    /// `#/paths/<path>/<method>`
    pub fn operation(path: &str, method: &str) -> Self {
        Self::from_segments(["paths", path, method])
    }

    /// `#/components/schemas/<name>`
    pub fn schema(name: &str) -> Self {
        Self::from_segments(["components", "schemas", name])
    }

    /// `#/components/schemas/<name>/properties/<prop>`
    pub fn schema_property(name: &str, property: &str) -> Self {
        Self::from_segments(["components", "schemas", name, "properties", property])
    }

    /// Append a segment, returning a new path.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Raw segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parse an escaped pointer such as `#/paths/~1widgets/get`.
    ///
    /// The leading `#` is optional. Returns `None` when the input is neither
    /// empty, `#`, nor starts with `/` after the optional `#`.
    pub fn parse(input: &str) -> Option<Self> {
        let rest = input.strip_prefix('#').unwrap_or(input);
        if rest.is_empty() {
            return Some(Self::root());
        }
        let rest = rest.strip_prefix('/')?;
        let segments = rest
            .split('/')
            .map(|s| s.replace("~1", "/").replace("~0", "~"))
            .collect();
        Some(Self { segments })
    }

    /// RFC 6901 rendering with a leading `#`.
    pub fn to_json_pointer(&self) -> String {
        let mut out = String::from("#");
        for segment in &self.segments {
            out.push('/');
            out.push_str(&segment.replace('~', "~0").replace('/', "~1"));
        }
        out
    }

    /// Resolve this path against a document.
    pub fn resolve<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        self.segments.iter().try_fold(doc, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for DocumentPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
