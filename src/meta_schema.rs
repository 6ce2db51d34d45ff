//! The bundled Draft 7 meta-schema, compiled once per process.
use std::sync::Arc;

use lazy_static::lazy_static;

use crate::compiler::compile_schema;
use crate::error::ValidationError;
use crate::options::CompileOptions;
use crate::parser::Parser;
use crate::resolver::RefResolver;
use crate::retrieve::DefaultRetriever;
use crate::schema::Schema;
use crate::value::JsonValue;

const DRAFT7_META_SCHEMA: &str = include_str!("../meta_schemas/draft7.json");

lazy_static! {
    static ref META_SCHEMA: Arc<Schema> = compile_meta_schema();
}

fn compile_meta_schema() -> Arc<Schema> {
    let value = Parser::parse_document(DRAFT7_META_SCHEMA, false)
        .expect("bundled draft7 meta-schema must parse");
    let resolver = RefResolver::new(Arc::new(DefaultRetriever));
    let options = CompileOptions::default().validate_schema(false);
    let mut errors = ValidationError::empty();
    // is_meta = true breaks the recursion that would otherwise come from validating the
    // meta-schema against itself while it is still compiling.
    let schema = compile_schema(&value, &resolver, &[], true, &options, &mut errors);
    errors.extend(resolver.validate_all_refs(&options));
    assert!(
        errors.is_empty(),
        "bundled draft7 meta-schema failed to compile: {}",
        errors
    );
    schema
}

/// Validates a parsed schema document against the bundled Draft 7 meta-schema.
pub(crate) fn validate_against_meta_schema(document: &JsonValue) -> ValidationError {
    META_SCHEMA.validate(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_schema_compiles() {
        // Forces the lazy_static initializer; panics (via the assert above) on failure.
        let _ = &*META_SCHEMA;
    }

    #[test]
    fn meta_schema_accepts_itself() {
        let value = Parser::parse_document(DRAFT7_META_SCHEMA, false).unwrap();
        let errors = validate_against_meta_schema(&value);
        assert!(errors.is_empty(), "{}", errors);
    }

    #[test]
    fn meta_schema_rejects_bad_type_keyword() {
        let value = Parser::parse_document(r#"{"type": 5}"#, false).unwrap();
        let errors = validate_against_meta_schema(&value);
        assert!(!errors.is_empty());
    }
}
