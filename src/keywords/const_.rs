use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue};

struct ConstValidator {
    expected: JsonValue,
}

impl Validate for ConstValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        if instance == &self.expected {
            ValidationError::empty()
        } else {
            ValidationError::constant(instance, &self.expected)
        }
    }
}

pub(crate) fn compile(
    map: &JsonObject,
    _ctx: &CompileContext,
    _errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("const")?;
    Some(Box::new(ConstValidator {
        expected: value.clone(),
    }))
}
