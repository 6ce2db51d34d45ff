use std::sync::Arc;

use crate::compiler::compile_schema;
use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue, PathChunk};

enum Dependency {
    Properties(Vec<String>),
    Schema(Arc<Schema>),
}

struct DependenciesValidator {
    entries: Vec<(String, Dependency)>,
}

impl Validate for DependenciesValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        let Some(obj) = instance.as_object() else {
            return ValidationError::empty();
        };
        let mut errors = ValidationError::empty();
        for (trigger, dependency) in &self.entries {
            if !obj.contains_key(trigger) {
                continue;
            }
            match dependency {
                Dependency::Properties(required) => {
                    for name in required {
                        if !obj.contains_key(name) {
                            errors.extend(ValidationError::dependencies_required(instance, name));
                        }
                    }
                }
                Dependency::Schema(schema) => errors.extend(schema.validate(instance)),
            }
        }
        errors
    }
}

pub(crate) fn compile(
    map: &JsonObject,
    ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("dependencies")?;
    let Some(deps) = value.as_object() else {
        errors.extend(ValidationError::single(
            "'dependencies' must be an object",
            value.position().clone(),
        ));
        return None;
    };
    let mut entries = Vec::with_capacity(deps.len());
    for (key, dep_value) in deps.iter() {
        let trigger = key.as_str().unwrap_or_default().to_string();
        match dep_value {
            JsonValue::Array(items, _) => {
                let mut required = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(s) => required.push(s.to_string()),
                        None => errors.extend(ValidationError::single(
                            "dependency array items must be strings",
                            item.position().clone(),
                        )),
                    }
                }
                entries.push((trigger, Dependency::Properties(required)));
            }
            _ => {
                let path = ctx.child(PathChunk::from("dependencies"));
                let mut child_path = path;
                child_path.push(PathChunk::from(trigger.clone()));
                let schema = compile_schema(
                    dep_value,
                    ctx.resolver,
                    &child_path,
                    ctx.is_meta,
                    ctx.options,
                    errors,
                );
                entries.push((trigger, Dependency::Schema(schema)));
            }
        }
    }
    Some(Box::new(DependenciesValidator { entries }))
}
