use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue};

struct SingleTypeValidator {
    expected: String,
}

impl Validate for SingleTypeValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        if instance.matches_type_name(&self.expected) {
            ValidationError::empty()
        } else {
            ValidationError::type_error(instance, &self.expected)
        }
    }
}

struct MultipleTypeValidator {
    expected: Vec<String>,
}

impl Validate for MultipleTypeValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        if self.expected.iter().any(|t| instance.matches_type_name(t)) {
            ValidationError::empty()
        } else {
            ValidationError::multiple_type_error(instance, &self.expected)
        }
    }
}

pub(crate) fn compile(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("type")?;
    match value {
        JsonValue::String(s, _) => Some(Box::new(SingleTypeValidator { expected: s.clone() })),
        JsonValue::Array(items, _) => {
            let mut expected = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(s) => expected.push(s.to_string()),
                    None => errors.extend(ValidationError::single(
                        "'type' array members must be strings",
                        item.position().clone(),
                    )),
                }
            }
            Some(Box::new(MultipleTypeValidator { expected }))
        }
        other => {
            errors.extend(ValidationError::single(
                "'type' must be a string or an array of strings",
                other.position().clone(),
            ));
            let _ = ctx;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SourcePosition;

    fn pos() -> SourcePosition {
        SourcePosition::unknown()
    }

    #[test]
    fn integer_matches_number_and_integer() {
        let instance = JsonValue::Integer(1, pos());
        assert!(instance.matches_type_name("number"));
        assert!(instance.matches_type_name("integer"));
    }

    #[test]
    fn float_matches_number_only() {
        let instance = JsonValue::Float(1.5, pos());
        assert!(instance.matches_type_name("number"));
        assert!(!instance.matches_type_name("integer"));
    }
}
