//! End-to-end coverage exercising the public API the way a caller would: compile a
//! schema document, validate instance documents against it, and check the aggregated
//! error shape.
use jsonschema7::{is_valid, JsonSchema};

#[test]
fn integer_bounds_reject_out_of_range_values() {
    let schema = JsonSchema::compile(r#"{"type": "integer", "minimum": 1, "maximum": 10}"#)
        .expect("schema compiles");
    assert!(schema.is_valid("5"));
    assert!(schema.is_valid("1"));
    assert!(schema.is_valid("10"));
    assert!(!schema.is_valid("0"));
    assert!(!schema.is_valid("11"));
    assert!(!schema.is_valid(r#""5""#));
}

#[test]
fn exclusive_bounds_are_strict() {
    let schema = JsonSchema::compile(r#"{"exclusiveMinimum": 0, "exclusiveMaximum": 10}"#)
        .expect("schema compiles");
    assert!(schema.is_valid("5"));
    assert!(!schema.is_valid("0"));
    assert!(!schema.is_valid("10"));
}

#[test]
fn unique_items_true_rejects_duplicates_false_allows_them() {
    let strict = JsonSchema::compile(r#"{"uniqueItems": true}"#).unwrap();
    assert!(strict.is_valid("[1, 2, 3]"));
    assert!(!strict.is_valid(r#"[1, "a", 1]"#));

    let lax = JsonSchema::compile(r#"{"uniqueItems": false}"#).unwrap();
    assert!(lax.is_valid(r#"[1, "a", 1]"#));
}

#[test]
fn required_and_additional_properties_compose() {
    let schema = JsonSchema::compile(
        r#"{
            "type": "object",
            "properties": {"name": {"type": "string"}, "age": {"type": "integer"}},
            "required": ["name"],
            "additionalProperties": false
        }"#,
    )
    .expect("schema compiles");

    assert!(schema.is_valid(r#"{"name": "Ada"}"#));
    assert!(schema.is_valid(r#"{"name": "Ada", "age": 30}"#));
    assert!(!schema.is_valid("{}"), "missing required name");
    assert!(
        !schema.is_valid(r#"{"name": "Ada", "nickname": "A"}"#),
        "additional property should be rejected"
    );

    let errors = schema.validate("{}").unwrap_err();
    assert_eq!(errors.errors.len(), 1);
    assert!(errors.errors[0].0.contains("name"));
}

#[test]
fn ref_to_sibling_definitions_resolves() {
    let schema = JsonSchema::compile(
        r##"{
            "definitions": {
                "positiveInt": {"type": "integer", "minimum": 0}
            },
            "type": "object",
            "properties": {
                "count": {"$ref": "#/definitions/positiveInt"}
            }
        }"##,
    )
    .expect("schema compiles");

    assert!(schema.is_valid(r#"{"count": 3}"#));
    assert!(!schema.is_valid(r#"{"count": -3}"#));
    assert!(!schema.is_valid(r#"{"count": "three"}"#));
}

#[test]
fn recursive_ref_validates_nested_structures() {
    let schema = JsonSchema::compile(
        r##"{
            "type": "object",
            "properties": {
                "value": {"type": "integer"},
                "next": {"$ref": "#"}
            },
            "additionalProperties": false
        }"##,
    )
    .expect("schema compiles");

    assert!(schema.is_valid(r#"{"value": 1, "next": {"value": 2}}"#));
    assert!(!schema.is_valid(r#"{"value": 1, "next": {"value": "nope"}}"#));
}

#[test]
fn boolean_schemas_short_circuit() {
    assert!(JsonSchema::compile("true").unwrap().is_valid(r#"{"any": "thing"}"#));
    assert!(!JsonSchema::compile("false").unwrap().is_valid("null"));

    // A `false` additionalProperties schema still lets declared properties through.
    let schema = JsonSchema::compile(r#"{"properties": {"a": true}, "additionalProperties": false}"#)
        .unwrap();
    assert!(schema.is_valid(r#"{"a": "anything"}"#));
    assert!(!schema.is_valid(r#"{"a": 1, "b": 2}"#));
}

#[test]
fn one_of_fails_when_more_than_one_branch_matches() {
    let schema =
        JsonSchema::compile(r#"{"oneOf": [{"type": "number"}, {"multipleOf": 5}]}"#).unwrap();
    assert!(schema.is_valid("3")); // only "number" matches
    assert!(!schema.is_valid("10")); // both branches match
    assert!(!schema.is_valid(r#""nope""#)); // neither matches
}

#[test]
fn any_of_and_all_of_compose_independently() {
    let any_of = JsonSchema::compile(r#"{"anyOf": [{"type": "string"}, {"type": "integer"}]}"#)
        .unwrap();
    assert!(any_of.is_valid(r#""x""#));
    assert!(any_of.is_valid("1"));
    assert!(!any_of.is_valid("1.5"));

    let all_of = JsonSchema::compile(r#"{"allOf": [{"minimum": 0}, {"maximum": 10}]}"#).unwrap();
    assert!(all_of.is_valid("5"));
    assert!(!all_of.is_valid("-1"));
    assert!(!all_of.is_valid("11"));
}

#[test]
fn if_then_else_picks_the_matching_branch() {
    let schema = JsonSchema::compile(
        r#"{
            "if": {"properties": {"kind": {"const": "circle"}}},
            "then": {"required": ["radius"]},
            "else": {"required": ["width", "height"]}
        }"#,
    )
    .unwrap();

    assert!(schema.is_valid(r#"{"kind": "circle", "radius": 2}"#));
    assert!(!schema.is_valid(r#"{"kind": "circle"}"#));
    assert!(schema.is_valid(r#"{"kind": "rect", "width": 1, "height": 2}"#));
    assert!(!schema.is_valid(r#"{"kind": "rect", "width": 1}"#));
}

#[test]
fn dependencies_schema_and_array_forms() {
    let schema = JsonSchema::compile(
        r#"{
            "dependencies": {
                "creditCard": ["billingAddress"],
                "shipping": {"required": ["address"]}
            }
        }"#,
    )
    .unwrap();

    assert!(schema.is_valid(r#"{"creditCard": "1234", "billingAddress": "x"}"#));
    assert!(!schema.is_valid(r#"{"creditCard": "1234"}"#));
    assert!(schema.is_valid(r#"{"shipping": true, "address": "x"}"#));
    assert!(!schema.is_valid(r#"{"shipping": true}"#));
}

#[test]
fn items_tuple_mode_with_additional_items_schema() {
    let schema = JsonSchema::compile(
        r#"{"items": [{"type": "integer"}, {"type": "string"}], "additionalItems": {"type": "boolean"}}"#,
    )
    .unwrap();

    assert!(schema.is_valid(r#"[1, "a"]"#));
    assert!(schema.is_valid(r#"[1, "a", true, false]"#));
    assert!(!schema.is_valid(r#"[1, "a", "not a bool"]"#));
    assert!(!schema.is_valid(r#"["not an int", "a"]"#));
}

#[test]
fn items_tuple_mode_defaults_additional_items_to_permissive() {
    let schema = JsonSchema::compile(r#"{"items": [{"type": "integer"}]}"#).unwrap();
    assert!(schema.is_valid(r#"[1, "anything", true, null]"#));
    assert!(!schema.is_valid(r#"["not an int"]"#));
}

#[test]
fn contains_requires_at_least_one_matching_item() {
    let schema = JsonSchema::compile(r#"{"contains": {"type": "integer", "minimum": 5}}"#).unwrap();
    assert!(schema.is_valid("[1, 2, 10]"));
    assert!(!schema.is_valid("[1, 2, 3]"));
    assert!(!schema.is_valid("[]"));
}

#[test]
fn pattern_properties_and_property_names_cooperate() {
    let schema = JsonSchema::compile(
        r#"{
            "propertyNames": {"pattern": "^[a-z]+$"},
            "patternProperties": {"^a": {"type": "integer"}}
        }"#,
    )
    .unwrap();

    assert!(schema.is_valid(r#"{"apple": 1, "banana": "x"}"#));
    assert!(!schema.is_valid(r#"{"apple": "not an int"}"#));
    assert!(!schema.is_valid(r#"{"Apple": 1}"#));
}

#[test]
fn custom_containers_are_ref_addressable_like_definitions() {
    let schema = JsonSchema::compile(
        r##"{
            "$defs": {"positive": {"type": "integer", "minimum": 0}},
            "properties": {"count": {"$ref": "#/$defs/positive"}}
        }"##,
    )
    .expect("custom $defs container compiles and is $ref-able");
    assert!(schema.is_valid(r#"{"count": 3}"#));
    assert!(!schema.is_valid(r#"{"count": -1}"#));
}

#[test]
fn annotation_only_keywords_do_not_affect_validation() {
    let schema = JsonSchema::compile(
        r#"{
            "type": "string",
            "format": "email",
            "default": "a@example.com",
            "examples": ["a@example.com"],
            "$comment": "not a validation keyword"
        }"#,
    )
    .expect("annotation-only keywords are recognized, not mis-treated as nested schemas");
    assert!(schema.is_valid(r#""anything@example.com""#));
    assert!(!schema.is_valid("1"));
}

#[test]
fn malformed_schema_document_is_a_compile_error() {
    let result = JsonSchema::compile(r#"{"type": "integer","#);
    assert!(result.is_err());
}

#[test]
fn malformed_instance_document_is_a_validate_error_not_a_panic() {
    let schema = JsonSchema::compile(r#"{"type": "integer"}"#).unwrap();
    let result = schema.validate("{not json");
    assert!(result.is_err());
    assert!(!schema.is_valid("{not json"));
}

#[test]
fn schema_validation_rejects_a_schema_that_violates_the_meta_schema() {
    // `type` must be a string or array of strings, not a number.
    let result = JsonSchema::compile(r#"{"type": 5}"#);
    assert!(result.is_err());
}

#[test]
fn free_function_is_valid_matches_compiled_schema_behavior() {
    assert!(is_valid(r#"{"minLength": 3}"#, r#""abcd""#));
    assert!(!is_valid(r#"{"minLength": 3}"#, r#""ab""#));
    // An invalid schema document makes `is_valid` report false rather than panic.
    assert!(!is_valid(r#"{"type": 5}"#, "1"));
}
