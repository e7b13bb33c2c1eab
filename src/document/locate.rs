//! Best-effort source locations for document paths.
//!
//! The tree produced by parsing carries no spans, so locations are recovered
//! by scanning the source text forward for each path segment as a key. This
//! is accurate for the common case of unique keys along a path and degrades
//! to the nearest located ancestor otherwise.

use super::DocumentPath;

/// Locate `path` in `text`, returning a 1-based `(line, column)`.
///
/// Segments that cannot be found are skipped, so the result points at the
/// deepest segment that was found. Returns `None` when no segment matched.
pub fn locate(text: &str, path: &DocumentPath) -> Option<(usize, usize)> {
    let mut cursor = 0;
    let mut found = None;

    for segment in path.segments() {
        if let Some(offset) = find_key(&text[cursor..], segment) {
            let absolute = cursor + offset;
            found = Some(absolute);
            cursor = absolute + segment.len();
        }
    }

    found.map(|offset| line_column(text, offset))
}

/// Find `key` written as a mapping key: `"key":`, `'key':` or `key:`.
fn find_key(haystack: &str, key: &str) -> Option<usize> {
    let candidates = [
        (format!("\"{}\"", key), 1),
        (format!("'{}'", key), 1),
        (key.to_string(), 0),
    ];

    candidates
        .iter()
        .filter_map(|(needle, quote)| {
            haystack.match_indices(needle.as_str()).find_map(|(idx, _)| {
                let rest = haystack[idx + needle.len()..].trim_start_matches([' ', '\t']);
                let at_key_start = idx == 0
                    || haystack[..idx]
                        .chars()
                        .next_back()
                        .is_some_and(|c| c.is_whitespace() || c == '{' || c == ',');
                (rest.starts_with(':') && at_key_start).then_some(idx + quote)
            })
        })
        .min()
}

fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map_or(before.chars().count(), |nl| before[nl + 1..].chars().count())
        + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = "openapi: 3.0.0\npaths:\n  /widgets:\n    get:\n      summary: list\n    post:\n      summary: create\n";

    #[test]
    fn locates_yaml_operation() {
        let path = DocumentPath::operation("/widgets", "post");
        assert_eq!(locate(YAML, &path), Some((6, 5)));
    }

    #[test]
    fn locates_json_schema() {
        let text = "{\n  \"components\": {\n    \"schemas\": {\n      \"Widget\": {}\n    }\n  }\n}";
        let path = DocumentPath::schema("Widget");
        assert_eq!(locate(text, &path), Some((4, 8)));
    }

    #[test]
    fn skips_unmatched_segments() {
        let path = DocumentPath::from_segments(["paths", "GET /widgets", "get"]);
        assert_eq!(locate(YAML, &path), Some((4, 5)));
    }

    #[test]
    fn returns_none_when_nothing_matches() {
        let path = DocumentPath::schema("Nope");
        assert_eq!(locate("openapi: 3.0.0\n", &path), None);
    }

    #[test]
    fn ignores_values_that_look_like_keys() {
        let text = "a: summary\nsummary: x\n";
        let path = DocumentPath::from_segments(["summary"]);
        assert_eq!(locate(text, &path), Some((2, 1)));
    }
}
