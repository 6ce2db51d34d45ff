//! JSON-Pointer formatting for schema registration and `$ref` lookup.
use crate::value::PathChunk;

/// Renders a path as an escaped JSON-Pointer fragment rooted at `#`.
///
/// Escaping is applied per segment, single pass: `~` becomes `~0`, `/` becomes `~1`, and
/// `%` becomes `%25`. The last one is not part of RFC 6901; it is kept for
/// bit-compatibility with the engine this crate was ported from (see DESIGN.md).
#[must_use]
pub(crate) fn pointer_string(path: &[PathChunk]) -> String {
    let mut out = String::from("#");
    for chunk in path {
        out.push('/');
        match chunk {
            PathChunk::Property(name) => escape_into(name, &mut out),
            PathChunk::Index(index) => out.push_str(&index.to_string()),
        }
    }
    out
}

fn escape_into(segment: &str, out: &mut String) {
    for c in segment.chars() {
        match c {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            '%' => out.push_str("%25"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_is_hash() {
        assert_eq!(pointer_string(&[]), "#");
    }

    #[test]
    fn nested_path_joins_with_slashes() {
        let path = vec![
            PathChunk::from("properties"),
            PathChunk::from("x"),
            PathChunk::from("items"),
        ];
        assert_eq!(pointer_string(&path), "#/properties/x/items");
    }

    #[test]
    fn escapes_tilde_slash_and_percent() {
        let path = vec![PathChunk::from("a~b/c%d")];
        assert_eq!(pointer_string(&path), "#/a~0b~1c%25d");
    }

    #[test]
    fn array_indices_render_as_plain_numbers() {
        let path = vec![PathChunk::from("items"), PathChunk::Index(2)];
        assert_eq!(pointer_string(&path), "#/items/2");
    }
}
