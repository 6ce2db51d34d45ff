use std::sync::Arc;

use crate::compiler::compile_schema;
use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue, PathChunk};

/// Validates instance properties whose key matches a compiled `properties` entry.
/// The compiled entries themselves live on [`Schema::properties`], populated directly by
/// the schema compiler; this validator just triggers the walk at validate time.
struct PropertiesValidator;

impl Validate for PropertiesValidator {
    fn validate(&self, instance: &JsonValue, schema: &Schema) -> ValidationError {
        let Some(obj) = instance.as_object() else {
            return ValidationError::empty();
        };
        ValidationError::aggregate(schema.properties.iter().filter_map(|(name, child)| {
            obj.get(name).map(|value| child.validate(value))
        }))
    }
}

/// Mirrors [`PropertiesValidator`] for `Schema::pattern_properties`.
struct PatternPropertiesValidator;

impl Validate for PatternPropertiesValidator {
    fn validate(&self, instance: &JsonValue, schema: &Schema) -> ValidationError {
        let Some(obj) = instance.as_object() else {
            return ValidationError::empty();
        };
        let mut errors = ValidationError::empty();
        for (key, value) in obj.iter() {
            let Some(name) = key.as_str() else { continue };
            for (regex, child) in &schema.pattern_properties {
                if regex.is_match(name) {
                    errors.extend(child.validate(value));
                }
            }
        }
        errors
    }
}

struct AdditionalPropertiesValidator {
    schema: Arc<Schema>,
}

impl Validate for AdditionalPropertiesValidator {
    fn validate(&self, instance: &JsonValue, schema: &Schema) -> ValidationError {
        let Some(obj) = instance.as_object() else {
            return ValidationError::empty();
        };
        let mut extras = Vec::new();
        let mut errors = ValidationError::empty();
        for (key, value) in obj.iter() {
            let Some(name) = key.as_str() else { continue };
            if schema.properties.contains_key(name) {
                continue;
            }
            if schema
                .pattern_properties
                .iter()
                .any(|(regex, _)| regex.is_match(name))
            {
                continue;
            }
            if self.schema.item_should_be_present == Some(false) {
                extras.push(name.to_string());
            } else {
                errors.extend(self.schema.validate(value));
            }
        }
        if !extras.is_empty() {
            errors.extend(ValidationError::additional_properties(instance, &extras));
        }
        errors
    }
}

struct PropertyNamesValidator {
    schema: Arc<Schema>,
}

impl Validate for PropertyNamesValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        let Some(obj) = instance.as_object() else {
            return ValidationError::empty();
        };
        ValidationError::aggregate(
            obj.iter()
                .map(|(key, _)| self.schema.validate(key)),
        )
    }
}

pub(crate) fn compile_properties(
    map: &JsonObject,
    _ctx: &CompileContext,
    _errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    if map.contains_key("properties") {
        Some(Box::new(PropertiesValidator))
    } else {
        None
    }
}

pub(crate) fn compile_pattern_properties(
    map: &JsonObject,
    _ctx: &CompileContext,
    _errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    if map.contains_key("patternProperties") {
        Some(Box::new(PatternPropertiesValidator))
    } else {
        None
    }
}

pub(crate) fn compile_additional_properties(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("additionalProperties")?;
    let path = ctx.child(PathChunk::from("additionalProperties"));
    let schema = compile_schema(value, ctx.resolver, &path, ctx.is_meta, ctx.options, errors);
    Some(Box::new(AdditionalPropertiesValidator { schema }))
}

pub(crate) fn compile_property_names(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("propertyNames")?;
    let path = ctx.child(PathChunk::from("propertyNames"));
    let schema = compile_schema(value, ctx.resolver, &path, ctx.is_meta, ctx.options, errors);
    Some(Box::new(PropertyNamesValidator { schema }))
}
