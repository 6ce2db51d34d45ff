//! The capability-style abstraction every keyword validator implements.
use crate::error::ValidationError;
use crate::schema::Schema;
use crate::value::JsonValue;

/// A single compiled keyword validator.
///
/// `validate` is the canonical operation; `is_valid` has a default implementation in
/// terms of it but combinators that only need a boolean outcome (`anyOf`, `not`, the `if`
/// branch of `if`/`then`/`else`) override it to short-circuit without building error
/// messages they are going to throw away.
pub(crate) trait Validate: Send + Sync {
    fn validate(&self, instance: &JsonValue, schema: &Schema) -> ValidationError;

    fn is_valid(&self, instance: &JsonValue, schema: &Schema) -> bool {
        self.validate(instance, schema).is_empty()
    }
}

pub(crate) type BoxedValidator = Box<dyn Validate>;

pub(crate) fn validate_all(
    validators: &[BoxedValidator],
    instance: &JsonValue,
    schema: &Schema,
) -> ValidationError {
    ValidationError::aggregate(validators.iter().map(|v| v.validate(instance, schema)))
}
