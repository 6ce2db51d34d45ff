use std::sync::Arc;

use crate::compiler::compile_schema;
use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue, PathChunk};

/// `if`/`then`/`else`. `if`'s own errors are always discarded: only its pass/fail
/// outcome routes the instance to `then` or `else`, matching the applicator semantics
/// rather than the assertion ones.
struct ConditionalValidator {
    if_schema: Arc<Schema>,
    then_schema: Option<Arc<Schema>>,
    else_schema: Option<Arc<Schema>>,
}

impl Validate for ConditionalValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        if self.if_schema.is_valid(instance) {
            self.then_schema
                .as_ref()
                .map(|schema| schema.validate(instance))
                .unwrap_or_else(ValidationError::empty)
        } else {
            self.else_schema
                .as_ref()
                .map(|schema| schema.validate(instance))
                .unwrap_or_else(ValidationError::empty)
        }
    }
}

pub(crate) fn compile(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let if_value = map.get("if")?;
    let if_path = ctx.child(PathChunk::from("if"));
    let if_schema = compile_schema(if_value, ctx.resolver, &if_path, ctx.is_meta, ctx.options, errors);

    let then_schema = map.get("then").map(|value| {
        let path = ctx.child(PathChunk::from("then"));
        compile_schema(value, ctx.resolver, &path, ctx.is_meta, ctx.options, errors)
    });
    let else_schema = map.get("else").map(|value| {
        let path = ctx.child(PathChunk::from("else"));
        compile_schema(value, ctx.resolver, &path, ctx.is_meta, ctx.options, errors)
    });

    if then_schema.is_none() && else_schema.is_none() {
        return None;
    }

    Some(Box::new(ConditionalValidator {
        if_schema,
        then_schema,
        else_schema,
    }))
}
