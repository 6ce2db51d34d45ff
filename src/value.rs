//! The parsed JSON value model.
//!
//! Every node produced by the parser carries the [`SourcePosition`] at which it started,
//! so keyword validators can point error messages back at the exact place in the source
//! text that failed, whether that source is a schema document or a validated instance.
use std::{cmp::Ordering, fmt, hash::Hash, hash::Hasher, sync::Arc};

/// A location within a piece of source text, used to annotate every parsed [`JsonValue`].
///
/// `line` and `column` are 0-based. [`SourcePosition::unknown`] is used for values that were
/// never parsed from text (for example, the constant side of an `enum` or `const` keyword).
#[derive(Debug, Clone)]
pub struct SourcePosition {
    pub line: i64,
    pub column: i64,
    pub source: Arc<str>,
}

impl SourcePosition {
    #[must_use]
    pub fn new(line: i64, column: i64, source: Arc<str>) -> Self {
        SourcePosition {
            line,
            column,
            source,
        }
    }

    /// A sentinel position for synthetic values that never appeared in source text.
    #[must_use]
    pub fn unknown() -> Self {
        SourcePosition {
            line: -1,
            column: -1,
            source: Arc::from(""),
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        self.line >= 0 && self.column >= 0
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "line {}, column {}", self.line + 1, self.column + 1)
        } else {
            write!(f, "an unknown position")
        }
    }
}

// Source position never participates in equality or ordering: it is provenance, not data.
impl PartialEq for SourcePosition {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}
impl Eq for SourcePosition {}

/// A key within a JSON object, or an index within a JSON array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathChunk {
    Property(String),
    Index(usize),
}

impl From<&str> for PathChunk {
    fn from(value: &str) -> Self {
        PathChunk::Property(value.to_string())
    }
}

impl From<String> for PathChunk {
    fn from(value: String) -> Self {
        PathChunk::Property(value)
    }
}

impl From<usize> for PathChunk {
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

/// An ordered object map. Insertion order is preserved for deterministic iteration; a
/// duplicate key overwrites the existing entry in place rather than appending a new one,
/// so the *first* occurrence's slot wins the position but the *last* occurrence's value wins.
#[derive(Debug, Clone, Default)]
pub struct JsonObject {
    entries: Vec<(JsonValue, JsonValue)>,
}

impl JsonObject {
    #[must_use]
    pub fn new() -> Self {
        JsonObject {
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, key: JsonValue, value: JsonValue) {
        let name = key.as_str().unwrap_or_default().to_string();
        if let Some(slot) = self
            .entries
            .iter_mut()
            .find(|(k, _)| k.as_str() == Some(name.as_str()))
        {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(name))
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn get_key(&self, name: &str) -> Option<&JsonValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(name))
            .map(|(k, _)| k)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&JsonValue, &JsonValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(k, _)| k.as_str())
    }
}

impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(k, v)| other.get(k.as_str().unwrap_or_default()) == Some(v))
    }
}

/// The parsed JSON value tree. Also doubles as the instance model validated at runtime.
#[derive(Debug, Clone)]
pub enum JsonValue {
    Null(SourcePosition),
    Boolean(bool, SourcePosition),
    Integer(i64, SourcePosition),
    Float(f64, SourcePosition),
    String(String, SourcePosition),
    Array(Vec<JsonValue>, SourcePosition),
    Object(JsonObject, SourcePosition),
}

impl JsonValue {
    #[must_use]
    pub fn position(&self) -> &SourcePosition {
        match self {
            JsonValue::Null(p)
            | JsonValue::Boolean(_, p)
            | JsonValue::Integer(_, p)
            | JsonValue::Float(_, p)
            | JsonValue::String(_, p)
            | JsonValue::Array(_, p)
            | JsonValue::Object(_, p) => p,
        }
    }

    /// The Draft 7 `type` keyword vocabulary name for this value's kind.
    #[must_use]
    pub fn primitive_type_name(&self) -> &'static str {
        match self {
            JsonValue::Null(_) => "null",
            JsonValue::Boolean(_, _) => "boolean",
            JsonValue::Integer(_, _) => "integer",
            JsonValue::Float(_, _) => "number",
            JsonValue::String(_, _) => "string",
            JsonValue::Array(_, _) => "array",
            JsonValue::Object(_, _) => "object",
        }
    }

    /// Whether this value's kind matches a `type` keyword vocabulary entry.
    #[must_use]
    pub fn matches_type_name(&self, type_name: &str) -> bool {
        match type_name {
            "null" => matches!(self, JsonValue::Null(_)),
            "boolean" => matches!(self, JsonValue::Boolean(_, _)),
            "object" => matches!(self, JsonValue::Object(_, _)),
            "array" => matches!(self, JsonValue::Array(_, _)),
            "string" => matches!(self, JsonValue::String(_, _)),
            "number" => matches!(self, JsonValue::Integer(_, _) | JsonValue::Float(_, _)),
            "integer" => matches!(self, JsonValue::Integer(_, _)),
            _ => false,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b, _) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s, _) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Integer(i, _) => Some(*i as f64),
            JsonValue::Float(f, _) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items, _) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(map, _) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null(_))
    }

    /// The number of Unicode scalars in a string value; `None` for non-strings.
    #[must_use]
    pub fn scalar_len(&self) -> Option<usize> {
        self.as_str().map(|s| s.chars().count())
    }
}

/// Structural equality, ignoring source position. Integers and floats are distinct
/// variants and are never equal to one another, even when numerically equivalent: this is
/// a deliberate divergence from the letter of Draft 7 (see DESIGN.md).
impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Null(_), JsonValue::Null(_)) => true,
            (JsonValue::Boolean(a, _), JsonValue::Boolean(b, _)) => a == b,
            (JsonValue::Integer(a, _), JsonValue::Integer(b, _)) => a == b,
            (JsonValue::Float(a, _), JsonValue::Float(b, _)) => a.partial_cmp(b) == Some(Ordering::Equal),
            (JsonValue::String(a, _), JsonValue::String(b, _)) => a == b,
            (JsonValue::Array(a, _), JsonValue::Array(b, _)) => a == b,
            (JsonValue::Object(a, _), JsonValue::Object(b, _)) => a == b,
            _ => false,
        }
    }
}
impl Eq for JsonValue {}

/// Strings are the only legal object keys, so hashing is defined only for them; hashing
/// any other variant is a bug in the caller and panics rather than silently producing a
/// sentinel a map could collide on.
impl Hash for JsonValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            JsonValue::String(s, _) => s.hash(state),
            other => panic!(
                "{} is not hashable: only JsonValue::String may be used as a key",
                other.primitive_type_name()
            ),
        }
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null(_) => write!(f, "null"),
            JsonValue::Boolean(b, _) => write!(f, "{}", b),
            JsonValue::Integer(i, _) => write!(f, "{}", i),
            JsonValue::Float(x, _) => write!(f, "{}", x),
            JsonValue::String(s, _) => write!(f, "{:?}", s),
            JsonValue::Array(items, _) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            JsonValue::Object(map, _) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> SourcePosition {
        SourcePosition::unknown()
    }

    #[test]
    fn integer_and_float_are_not_structurally_equal() {
        let a = JsonValue::Integer(1, pos());
        let b = JsonValue::Float(1.0, pos());
        assert_ne!(a, b);
    }

    #[test]
    fn objects_compare_by_key_set_ignoring_position() {
        let mut left = JsonObject::new();
        left.insert(
            JsonValue::String("a".into(), pos()),
            JsonValue::Integer(1, pos()),
        );
        let mut right = JsonObject::new();
        right.insert(
            JsonValue::String("a".into(), SourcePosition::new(4, 2, Arc::from("x"))),
            JsonValue::Integer(1, pos()),
        );
        assert_eq!(
            JsonValue::Object(left, pos()),
            JsonValue::Object(right, pos())
        );
    }

    #[test]
    fn duplicate_keys_last_value_wins() {
        let mut obj = JsonObject::new();
        obj.insert(
            JsonValue::String("a".into(), pos()),
            JsonValue::Integer(1, pos()),
        );
        obj.insert(
            JsonValue::String("a".into(), pos()),
            JsonValue::Integer(2, pos()),
        );
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("a"), Some(&JsonValue::Integer(2, pos())));
    }

    #[test]
    #[should_panic(expected = "is not hashable")]
    fn hashing_non_string_panics() {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        JsonValue::Integer(1, pos()).hash(&mut hasher);
    }

    #[test]
    fn display_renders_compact_json() {
        let mut obj = JsonObject::new();
        obj.insert(
            JsonValue::String("a".into(), pos()),
            JsonValue::Integer(3, pos()),
        );
        let value = JsonValue::Object(obj, pos());
        assert_eq!(value.to_string(), r#"{"a":3}"#);
    }
}
