use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue};

struct EnumValidator {
    options: JsonValue,
}

impl Validate for EnumValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        let items = self.options.as_array().unwrap_or(&[]);
        if items.iter().any(|item| item == instance) {
            ValidationError::empty()
        } else {
            ValidationError::enumeration(instance, &self.options)
        }
    }
}

pub(crate) fn compile(
    map: &JsonObject,
    _ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("enum")?;
    match value.as_array() {
        Some(items) if !items.is_empty() => Some(Box::new(EnumValidator {
            options: value.clone(),
        })),
        _ => {
            errors.extend(ValidationError::single(
                "'enum' must be a non-empty array",
                value.position().clone(),
            ));
            None
        }
    }
}
