use std::sync::Arc;

use crate::compiler::compile_schema;
use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue, PathChunk};

fn compile_schema_list(
    value: &JsonValue,
    keyword: &str,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Vec<Arc<Schema>> {
    let path = ctx.child(PathChunk::from(keyword.to_string()));
    match value.as_array() {
        Some(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let mut item_path = path.clone();
                item_path.push(PathChunk::Index(index));
                compile_schema(item, ctx.resolver, &item_path, ctx.is_meta, ctx.options, errors)
            })
            .collect(),
        None => {
            errors.extend(ValidationError::single(
                format!("'{}' must be an array of schemas", keyword),
                value.position().clone(),
            ));
            Vec::new()
        }
    }
}

struct AllOfValidator {
    branches: Vec<Arc<Schema>>,
}

impl Validate for AllOfValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        ValidationError::aggregate(self.branches.iter().map(|branch| branch.validate(instance)))
    }

    fn is_valid(&self, instance: &JsonValue, _schema: &Schema) -> bool {
        self.branches.iter().all(|branch| branch.is_valid(instance))
    }
}

struct AnyOfValidator {
    branches: Vec<Arc<Schema>>,
}

impl Validate for AnyOfValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        if self.branches.iter().any(|branch| branch.is_valid(instance)) {
            ValidationError::empty()
        } else {
            ValidationError::any_of(instance)
        }
    }

    fn is_valid(&self, instance: &JsonValue, _schema: &Schema) -> bool {
        self.branches.iter().any(|branch| branch.is_valid(instance))
    }
}

struct OneOfValidator {
    branches: Vec<Arc<Schema>>,
}

impl Validate for OneOfValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        let matches = self
            .branches
            .iter()
            .filter(|branch| branch.is_valid(instance))
            .count();
        match matches {
            1 => ValidationError::empty(),
            0 => ValidationError::one_of_not_valid(instance),
            _ => ValidationError::one_of_multiple_valid(instance),
        }
    }
}

struct NotValidator {
    schema: Arc<Schema>,
}

impl Validate for NotValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        if self.schema.is_valid(instance) {
            ValidationError::not_schema(instance)
        } else {
            ValidationError::empty()
        }
    }

    fn is_valid(&self, instance: &JsonValue, _schema: &Schema) -> bool {
        !self.schema.is_valid(instance)
    }
}

pub(crate) fn compile_all_of(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("allOf")?;
    let branches = compile_schema_list(value, "allOf", ctx, errors);
    Some(Box::new(AllOfValidator { branches }))
}

pub(crate) fn compile_any_of(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("anyOf")?;
    let branches = compile_schema_list(value, "anyOf", ctx, errors);
    Some(Box::new(AnyOfValidator { branches }))
}

pub(crate) fn compile_one_of(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("oneOf")?;
    let branches = compile_schema_list(value, "oneOf", ctx, errors);
    Some(Box::new(OneOfValidator { branches }))
}

pub(crate) fn compile_not(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("not")?;
    let path = ctx.child(PathChunk::from("not"));
    let schema = compile_schema(value, ctx.resolver, &path, ctx.is_meta, ctx.options, errors);
    Some(Box::new(NotValidator { schema }))
}
