use crate::compiler::compile_schema;
use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue, PathChunk};

struct MaxItemsValidator {
    limit: u64,
}

impl Validate for MaxItemsValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        match instance.as_array() {
            Some(items) if items.len() as u64 > self.limit => {
                ValidationError::max_items(instance, self.limit)
            }
            _ => ValidationError::empty(),
        }
    }
}

struct MinItemsValidator {
    limit: u64,
}

impl Validate for MinItemsValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        match instance.as_array() {
            Some(items) if (items.len() as u64) < self.limit => {
                ValidationError::min_items(instance, self.limit)
            }
            _ => ValidationError::empty(),
        }
    }
}

struct UniqueItemsValidator;

impl Validate for UniqueItemsValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        let Some(items) = instance.as_array() else {
            return ValidationError::empty();
        };
        for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                if items[i] == items[j] {
                    return ValidationError::unique_items(instance);
                }
            }
        }
        ValidationError::empty()
    }
}

struct ContainsValidator {
    schema: std::sync::Arc<Schema>,
}

impl Validate for ContainsValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        let Some(items) = instance.as_array() else {
            return ValidationError::empty();
        };
        if items.iter().any(|item| self.schema.is_valid(item)) {
            ValidationError::empty()
        } else {
            ValidationError::contains(instance)
        }
    }
}

fn non_negative_integer(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Integer(i, _) if *i >= 0 => Some(*i as u64),
        _ => None,
    }
}

pub(crate) fn compile_max_items(
    map: &JsonObject,
    _ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("maxItems")?;
    match non_negative_integer(value) {
        Some(limit) => Some(Box::new(MaxItemsValidator { limit })),
        None => {
            errors.extend(ValidationError::single(
                "'maxItems' must be a non-negative integer",
                value.position().clone(),
            ));
            None
        }
    }
}

pub(crate) fn compile_min_items(
    map: &JsonObject,
    _ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("minItems")?;
    match non_negative_integer(value) {
        Some(limit) => Some(Box::new(MinItemsValidator { limit })),
        None => {
            errors.extend(ValidationError::single(
                "'minItems' must be a non-negative integer",
                value.position().clone(),
            ));
            None
        }
    }
}

pub(crate) fn compile_unique_items(
    map: &JsonObject,
    _ctx: &CompileContext,
    _errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    match map.get("uniqueItems") {
        Some(JsonValue::Boolean(true, _)) => Some(Box::new(UniqueItemsValidator)),
        _ => None,
    }
}

pub(crate) fn compile_contains(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("contains")?;
    let path = ctx.child(PathChunk::from("contains"));
    let schema = compile_schema(value, ctx.resolver, &path, ctx.is_meta, ctx.options, errors);
    Some(Box::new(ContainsValidator { schema }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::empty_schema;
    use crate::value::SourcePosition;

    fn array(items: Vec<JsonValue>) -> JsonValue {
        JsonValue::Array(items, SourcePosition::unknown())
    }

    fn int(n: i64) -> JsonValue {
        JsonValue::Integer(n, SourcePosition::unknown())
    }

    #[test]
    fn unique_items_detects_duplicates() {
        let v = UniqueItemsValidator;
        assert!(!v.validate(&array(vec![int(1), int(1)]), &empty_schema()).is_empty());
        assert!(v.validate(&array(vec![int(1), int(2)]), &empty_schema()).is_empty());
    }

    #[test]
    fn unique_items_treats_integer_and_float_as_distinct() {
        let v = UniqueItemsValidator;
        let items = array(vec![int(1), JsonValue::Float(1.0, SourcePosition::unknown())]);
        assert!(v.validate(&items, &empty_schema()).is_empty());
    }

    #[test]
    fn max_items_rejects_longer_arrays() {
        let v = MaxItemsValidator { limit: 1 };
        assert!(!v.validate(&array(vec![int(1), int(2)]), &empty_schema()).is_empty());
    }

    #[test]
    fn min_items_rejects_shorter_arrays() {
        let v = MinItemsValidator { limit: 2 };
        assert!(!v.validate(&array(vec![int(1)]), &empty_schema()).is_empty());
    }
}
