//! Walks a parsed schema document and materializes a [`Schema`] graph.
use std::sync::Arc;

use regex::Regex;

use crate::error::ValidationError;
use crate::keywords;
use crate::options::CompileOptions;
use crate::paths::pointer_string;
use crate::resolver::RefResolver;
use crate::schema::Schema;
use crate::value::{JsonValue, PathChunk};

/// Keyword names handled directly by [`keywords::compile`] or by the dedicated blocks
/// below. Every other object member is treated as an addressable nested schema (step 9
/// of the compiler contract) so custom `$defs`-like containers stay `$ref`-able.
const KNOWN_KEYS: &[&str] = &[
    "$ref",
    "$id",
    "$schema",
    "title",
    "description",
    "properties",
    "patternProperties",
    "definitions",
    "type",
    "enum",
    "const",
    "not",
    "allOf",
    "anyOf",
    "oneOf",
    "items",
    "additionalItems",
    "contains",
    "maxItems",
    "minItems",
    "uniqueItems",
    "maxProperties",
    "minProperties",
    "required",
    "dependencies",
    "additionalProperties",
    "propertyNames",
    "if",
    "then",
    "else",
    "multipleOf",
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxLength",
    "minLength",
    "pattern",
    // Annotation-only keywords: no validator, but still not schema-valued, so they must
    // not fall through to the generic "unrecognized member is a nested schema" rule.
    "format",
    "default",
    "examples",
    "readOnly",
    "writeOnly",
    "contentEncoding",
    "contentMediaType",
    "$comment",
];

/// Compiles `value` as a schema node at `path`, registering it (and every descendant) in
/// `resolver`. Always returns a usable `Schema`: malformed input produces a schema that
/// rejects everything and records the reason in `errors`, rather than aborting the walk.
pub(crate) fn compile_schema(
    value: &JsonValue,
    resolver: &Arc<RefResolver>,
    path: &[PathChunk],
    is_meta: bool,
    options: &CompileOptions,
    errors: &mut ValidationError,
) -> Arc<Schema> {
    if let JsonValue::Boolean(allowed, _) = value {
        let mut schema = Schema::new(Arc::clone(resolver));
        schema.item_should_be_present = Some(*allowed);
        let schema = Arc::new(schema);
        register(resolver, path, &schema);
        return schema;
    }

    let Some(map) = value.as_object() else {
        errors.extend(ValidationError::invalid_schema(value.position().clone()));
        let mut schema = Schema::new(Arc::clone(resolver));
        schema.item_should_be_present = Some(false);
        let schema = Arc::new(schema);
        register(resolver, path, &schema);
        return schema;
    };

    let mut schema = Schema::new(Arc::clone(resolver));

    if let Some(ref_value) = map.get("$ref") {
        if let Some(reference) = ref_value.as_str() {
            schema.ref_id = Some(reference.to_string());
            schema.ref_position = ref_value.position().clone();
            resolver.add_ref_to_resolve(reference.to_string(), ref_value.position().clone());
        }
    }
    if let Some(v) = map.get("$id").and_then(JsonValue::as_str) {
        schema.id = Some(v.to_string());
    }
    if let Some(v) = map.get("$schema").and_then(JsonValue::as_str) {
        schema.schema_uri = Some(v.to_string());
    }
    if let Some(v) = map.get("title").and_then(JsonValue::as_str) {
        schema.title = Some(v.to_string());
    }
    if let Some(v) = map.get("description").and_then(JsonValue::as_str) {
        schema.description = Some(v.to_string());
    }

    if let Some(JsonValue::Object(props, _)) = map.get("properties") {
        for (key, child_value) in props.iter() {
            let name = key.as_str().unwrap_or_default().to_string();
            let child_path = extend(path, PathChunk::from("properties"), PathChunk::from(name.clone()));
            let child = compile_schema(child_value, resolver, &child_path, is_meta, options, errors);
            schema.properties.insert(name, child);
        }
    }

    if let Some(JsonValue::Object(pattern_props, _)) = map.get("patternProperties") {
        for (key, child_value) in pattern_props.iter() {
            let pattern = key.as_str().unwrap_or_default();
            match Regex::new(pattern) {
                Ok(re) => {
                    let child_path =
                        extend(path, PathChunk::from("patternProperties"), PathChunk::from(pattern.to_string()));
                    let child = compile_schema(child_value, resolver, &child_path, is_meta, options, errors);
                    schema.pattern_properties.push((re, child));
                }
                Err(_) => errors.extend(ValidationError::invalid_regex(pattern, key.position().clone())),
            }
        }
    }

    if let Some(JsonValue::Object(defs, _)) = map.get("definitions") {
        for (key, child_value) in defs.iter() {
            let name = key.as_str().unwrap_or_default().to_string();
            let child_path = extend(path, PathChunk::from("definitions"), PathChunk::from(name.clone()));
            let child = compile_schema(child_value, resolver, &child_path, is_meta, options, errors);
            schema.definitions.insert(name, child);
        }
    }

    schema.validators = keywords::compile(map, path, resolver, is_meta, options, errors);

    for (key, child_value) in map.iter() {
        let name = key.as_str().unwrap_or_default();
        if KNOWN_KEYS.contains(&name) {
            continue;
        }
        let child_path = append(path, PathChunk::from(name.to_string()));
        let _ = compile_schema(child_value, resolver, &child_path, is_meta, options, errors);
    }

    let schema = Arc::new(schema);
    register(resolver, path, &schema);
    schema
}

fn register(resolver: &Arc<RefResolver>, path: &[PathChunk], schema: &Arc<Schema>) {
    resolver.add_reference(pointer_string(path), Arc::clone(schema));
}

fn append(path: &[PathChunk], chunk: PathChunk) -> Vec<PathChunk> {
    let mut out = path.to_vec();
    out.push(chunk);
    out
}

fn extend(path: &[PathChunk], a: PathChunk, b: PathChunk) -> Vec<PathChunk> {
    let mut out = path.to_vec();
    out.push(a);
    out.push(b);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieve::Retrieve;
    use crate::error::RetrieveError;

    struct NeverCalled;
    impl Retrieve for NeverCalled {
        fn retrieve(&self, url: &str) -> Result<Vec<u8>, RetrieveError> {
            Err(RetrieveError::UnsupportedScheme { url: url.to_string() })
        }
    }

    fn compile(source: &str) -> (Arc<Schema>, ValidationError) {
        let value = crate::parser::Parser::parse_document(source, false).unwrap();
        let resolver = RefResolver::new(Arc::new(NeverCalled));
        let options = CompileOptions::default().validate_schema(false);
        let mut errors = ValidationError::empty();
        let schema = compile_schema(&value, &resolver, &[], true, &options, &mut errors);
        errors.extend(resolver.validate_all_refs(&options));
        (schema, errors)
    }

    #[test]
    fn boolean_schema_compiles_to_terminal_node() {
        let (schema, errors) = compile("false");
        assert!(errors.is_empty());
        assert_eq!(schema.item_should_be_present, Some(false));
    }

    #[test]
    fn non_object_non_boolean_schema_is_a_compile_error() {
        let (_, errors) = compile("1");
        assert!(!errors.is_empty());
    }

    #[test]
    fn unrecognized_member_is_addressable_by_ref() {
        let (_, errors) = compile(r##"{"$defs": {"positive": {"minimum": 0}}, "$ref": "#/$defs/positive"}"##);
        assert!(errors.is_empty());
    }

    #[test]
    fn custom_keys_nest_two_levels_deep() {
        let value = crate::parser::Parser::parse_document(
            r#"{"$defs": {"positive": {"minimum": 0}}}"#,
            false,
        )
        .unwrap();
        let resolver = RefResolver::new(Arc::new(NeverCalled));
        let options = CompileOptions::default().validate_schema(false);
        let mut errors = ValidationError::empty();
        let _ = compile_schema(&value, &resolver, &[], true, &options, &mut errors);
        assert!(errors.is_empty());
        let instance = crate::parser::Parser::parse_document("-1", false).unwrap();
        let nested = resolver
            .registered("#/$defs/positive")
            .expect("nested schema registered");
        assert!(!nested.is_valid(&instance));
    }
}
