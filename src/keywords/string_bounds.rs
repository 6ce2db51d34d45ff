use regex::Regex;

use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue};

struct MaxLengthValidator {
    limit: u64,
}

impl Validate for MaxLengthValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        match instance.scalar_len() {
            Some(len) if len as u64 > self.limit => ValidationError::max_length(instance, self.limit),
            _ => ValidationError::empty(),
        }
    }
}

struct MinLengthValidator {
    limit: u64,
}

impl Validate for MinLengthValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        match instance.scalar_len() {
            Some(len) if (len as u64) < self.limit => ValidationError::min_length(instance, self.limit),
            _ => ValidationError::empty(),
        }
    }
}

struct PatternValidator {
    regex: Regex,
    source: String,
}

impl Validate for PatternValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        let Some(text) = instance.as_str() else {
            return ValidationError::empty();
        };
        if self.regex.is_match(text) {
            ValidationError::empty()
        } else {
            ValidationError::pattern(instance, &self.source)
        }
    }
}

fn non_negative_integer(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Integer(i, _) if *i >= 0 => Some(*i as u64),
        _ => None,
    }
}

pub(crate) fn compile_max_length(
    map: &JsonObject,
    _ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("maxLength")?;
    match non_negative_integer(value) {
        Some(limit) => Some(Box::new(MaxLengthValidator { limit })),
        None => {
            errors.extend(ValidationError::single(
                "'maxLength' must be a non-negative integer",
                value.position().clone(),
            ));
            None
        }
    }
}

pub(crate) fn compile_min_length(
    map: &JsonObject,
    _ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("minLength")?;
    match non_negative_integer(value) {
        Some(limit) => Some(Box::new(MinLengthValidator { limit })),
        None => {
            errors.extend(ValidationError::single(
                "'minLength' must be a non-negative integer",
                value.position().clone(),
            ));
            None
        }
    }
}

pub(crate) fn compile_pattern(
    map: &JsonObject,
    _ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("pattern")?;
    let Some(source) = value.as_str() else {
        errors.extend(ValidationError::single(
            "'pattern' must be a string",
            value.position().clone(),
        ));
        return None;
    };
    match Regex::new(source) {
        Ok(regex) => Some(Box::new(PatternValidator {
            regex,
            source: source.to_string(),
        })),
        Err(_) => {
            errors.extend(ValidationError::invalid_regex(source, value.position().clone()));
            None
        }
    }
}
