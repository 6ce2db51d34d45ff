use std::sync::Arc;

use crate::compiler::compile_schema;
use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue, PathChunk};

enum ItemsMode {
    Single(Arc<Schema>),
    Tuple(Vec<Arc<Schema>>, Arc<Schema>),
}

struct ItemsValidator {
    mode: ItemsMode,
}

impl Validate for ItemsValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        let Some(items) = instance.as_array() else {
            return ValidationError::empty();
        };
        match &self.mode {
            ItemsMode::Single(schema) => {
                ValidationError::aggregate(items.iter().map(|item| schema.validate(item)))
            }
            ItemsMode::Tuple(schemas, additional) => {
                let mut errors = ValidationError::empty();
                for (index, item) in items.iter().enumerate() {
                    if let Some(schema) = schemas.get(index) {
                        errors.extend(schema.validate(item));
                    } else if additional.item_should_be_present == Some(false) {
                        errors.extend(ValidationError::additional_items(item));
                    } else {
                        errors.extend(additional.validate(item));
                    }
                }
                errors
            }
        }
    }
}

pub(crate) fn compile_items(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("items")?;
    let path = ctx.child(PathChunk::from("items"));
    match value {
        JsonValue::Array(schemas, _) => {
            let mut compiled = Vec::with_capacity(schemas.len());
            for (index, item) in schemas.iter().enumerate() {
                let mut item_path = path.clone();
                item_path.push(PathChunk::Index(index));
                compiled.push(compile_schema(
                    item,
                    ctx.resolver,
                    &item_path,
                    ctx.is_meta,
                    ctx.options,
                    errors,
                ));
            }
            let additional = compile_additional_items(map, ctx, errors);
            Some(Box::new(ItemsValidator {
                mode: ItemsMode::Tuple(compiled, additional),
            }))
        }
        _ => {
            let schema = compile_schema(value, ctx.resolver, &path, ctx.is_meta, ctx.options, errors);
            Some(Box::new(ItemsValidator {
                mode: ItemsMode::Single(schema),
            }))
        }
    }
}

fn compile_additional_items(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Arc<Schema> {
    match map.get("additionalItems") {
        Some(value) => {
            let path = ctx.child(PathChunk::from("additionalItems"));
            compile_schema(value, ctx.resolver, &path, ctx.is_meta, ctx.options, errors)
        }
        None => Arc::new(Schema::permissive(Arc::clone(ctx.resolver))),
    }
}
