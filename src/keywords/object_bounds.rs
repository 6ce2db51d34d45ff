use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue};

struct MaxPropertiesValidator {
    limit: u64,
}

impl Validate for MaxPropertiesValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        match instance.as_object() {
            Some(obj) if obj.len() as u64 > self.limit => {
                ValidationError::max_properties(instance, self.limit)
            }
            _ => ValidationError::empty(),
        }
    }
}

struct MinPropertiesValidator {
    limit: u64,
}

impl Validate for MinPropertiesValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        match instance.as_object() {
            Some(obj) if (obj.len() as u64) < self.limit => {
                ValidationError::min_properties(instance, self.limit)
            }
            _ => ValidationError::empty(),
        }
    }
}

struct RequiredValidator {
    properties: Vec<String>,
}

impl Validate for RequiredValidator {
    fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
        let Some(obj) = instance.as_object() else {
            return ValidationError::empty();
        };
        ValidationError::aggregate(self.properties.iter().filter_map(|name| {
            if obj.contains_key(name) {
                None
            } else {
                Some(ValidationError::required(instance, name))
            }
        }))
    }
}

fn non_negative_integer(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Integer(i, _) if *i >= 0 => Some(*i as u64),
        _ => None,
    }
}

pub(crate) fn compile_max_properties(
    map: &JsonObject,
    _ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("maxProperties")?;
    match non_negative_integer(value) {
        Some(limit) => Some(Box::new(MaxPropertiesValidator { limit })),
        None => {
            errors.extend(ValidationError::single(
                "'maxProperties' must be a non-negative integer",
                value.position().clone(),
            ));
            None
        }
    }
}

pub(crate) fn compile_min_properties(
    map: &JsonObject,
    _ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("minProperties")?;
    match non_negative_integer(value) {
        Some(limit) => Some(Box::new(MinPropertiesValidator { limit })),
        None => {
            errors.extend(ValidationError::single(
                "'minProperties' must be a non-negative integer",
                value.position().clone(),
            ));
            None
        }
    }
}

pub(crate) fn compile_required(
    map: &JsonObject,
    _ctx: &CompileContext,
    errors: &mut ValidationError,
) -> Option<BoxedValidator> {
    let value = map.get("required")?;
    let Some(items) = value.as_array() else {
        errors.extend(ValidationError::single(
            "'required' must be an array of strings",
            value.position().clone(),
        ));
        return None;
    };
    let mut properties = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => properties.push(s.to_string()),
            None => errors.extend(ValidationError::single(
                "'required' items must be strings",
                item.position().clone(),
            )),
        }
    }
    Some(Box::new(RequiredValidator { properties }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::empty_schema;
    use crate::value::{JsonObject, SourcePosition};

    fn object(pairs: Vec<(&str, JsonValue)>) -> JsonValue {
        let mut map = JsonObject::new();
        for (k, v) in pairs {
            map.insert(JsonValue::String(k.to_string(), SourcePosition::unknown()), v);
        }
        JsonValue::Object(map, SourcePosition::unknown())
    }

    #[test]
    fn required_reports_every_missing_property() {
        let v = RequiredValidator {
            properties: vec!["a".to_string(), "b".to_string()],
        };
        let instance = object(vec![]);
        let errors = v.validate(&instance, &empty_schema());
        assert_eq!(errors.errors.len(), 2);
    }

    #[test]
    fn required_passes_when_all_present() {
        let v = RequiredValidator {
            properties: vec!["a".to_string()],
        };
        let instance = object(vec![("a", JsonValue::Integer(1, SourcePosition::unknown()))]);
        assert!(v.validate(&instance, &empty_schema()).is_empty());
    }
}
