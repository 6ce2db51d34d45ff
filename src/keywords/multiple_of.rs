use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue};

const EPSILON: f64 = 1e-8;

struct MultipleOfValidator {
    factor: f64,
}

impl Validate for MultipleOfValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        let Some(number) = instance.as_f64() else {
            return ValidationError::empty();
        };
        let remainder = (number / self.factor) - (number / self.factor).round();
        if remainder.abs() > EPSILON {
            ValidationError::multiple_of(instance, self.factor)
        } else {
            ValidationError::empty()
        }
    }
}

pub(crate) fn compile(
    map: &JsonObject,
    _ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("multipleOf")?;
    match value.as_f64() {
        Some(factor) if factor > 0.0 => Some(Box::new(MultipleOfValidator { factor })),
        _ => {
            errors.extend(ValidationError::single(
                "'multipleOf' must be a positive number",
                value.position().clone(),
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::empty_schema;
    use crate::value::SourcePosition;

    #[test]
    fn rejects_non_multiple() {
        let v = MultipleOfValidator { factor: 2.0 };
        let schema = empty_schema();
        let instance = JsonValue::Integer(3, SourcePosition::unknown());
        assert!(!v.validate(&instance, &schema).is_empty());
    }

    #[test]
    fn accepts_exact_multiple() {
        let v = MultipleOfValidator { factor: 2.5 };
        let schema = empty_schema();
        let instance = JsonValue::Float(5.0, SourcePosition::unknown());
        assert!(v.validate(&instance, &schema).is_empty());
    }
}
