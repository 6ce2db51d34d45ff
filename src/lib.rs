//! # jsonschema7
//!
//! A JSON Schema (Draft 7) validator built on its own position-tracking JSON parser
//! rather than `serde_json`, so every compile and validation error can point back at an
//! exact line and column in the source text.
//!
//! ## Usage
//!
//! ```rust
//! use jsonschema7::JsonSchema;
//!
//! let schema = JsonSchema::compile(r#"{"type": "integer", "minimum": 0}"#).unwrap();
//! assert!(schema.is_valid("5"));
//! assert!(!schema.is_valid("-1"));
//! ```
//!
//! Custom configuration goes through [`JsonSchema::options`]:
//!
//! ```rust
//! use jsonschema7::JsonSchema;
//!
//! let schema = JsonSchema::options()
//!     .validate_schema(false)
//!     .compile(r#"{"maxLength": 5}"#)
//!     .unwrap();
//! assert!(schema.is_valid(r#""abc""#));
//! ```
#![warn(
    clippy::doc_markdown,
    clippy::map_unwrap_or,
    clippy::needless_borrow,
    clippy::redundant_closure,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces
)]
mod compiler;
mod error;
mod keywords;
mod lexer;
mod meta_schema;
mod options;
mod parser;
mod paths;
mod resolver;
mod retrieve;
mod schema;
mod string_stream;
#[cfg(test)]
mod test_support;
mod validator;
mod value;

use std::sync::Arc;

pub use error::{RetrieveError, ValidationError};
pub use options::CompileOptions;
pub use retrieve::Retrieve;
pub use schema::Schema;
pub use value::{JsonObject, JsonValue, PathChunk, SourcePosition};

use crate::parser::Parser;
use crate::resolver::RefResolver;

/// A compiled Draft 7 schema, ready to validate instance documents.
pub struct JsonSchema {
    root: Arc<Schema>,
    allow_line_comments: bool,
}

impl JsonSchema {
    /// A builder for customizing compilation before running it; `JsonSchema::compile(text)`
    /// is sugar for `JsonSchema::options().compile(text)`.
    #[must_use]
    pub fn options() -> CompileOptions {
        CompileOptions::default()
    }

    /// Compiles `schema_source` with default options (meta-schema validation on, HTTP
    /// `$ref` fetching on when the `resolve-http` feature is enabled).
    pub fn compile(schema_source: &str) -> Result<Self, ValidationError> {
        Self::options().compile(schema_source)
    }

    /// As [`JsonSchema::compile`], decoding `schema_source` as UTF-8 first.
    pub fn compile_bytes(schema_source: &[u8]) -> Result<Self, ValidationError> {
        let text = std::str::from_utf8(schema_source)
            .map_err(|_| ValidationError::invalid_data(SourcePosition::unknown()))?;
        Self::compile(text)
    }

    /// Parses `instance_source` and validates it against this schema, aggregating every
    /// failure rather than stopping at the first.
    pub fn validate(&self, instance_source: &str) -> Result<(), ValidationError> {
        let value = Parser::parse_document(instance_source, self.allow_line_comments)
            .map_err(ValidationError::from)?;
        let errors = self.root.validate(&value);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// As [`JsonSchema::validate`], decoding `instance_source` as UTF-8 first.
    pub fn validate_bytes(&self, instance_source: &[u8]) -> Result<(), ValidationError> {
        let text = std::str::from_utf8(instance_source)
            .map_err(|_| ValidationError::invalid_data(SourcePosition::unknown()))?;
        self.validate(text)
    }

    /// A boolean shortcut over [`JsonSchema::validate`]; malformed instance text is
    /// treated as invalid rather than propagated as an error.
    #[must_use]
    pub fn is_valid(&self, instance_source: &str) -> bool {
        match Parser::parse_document(instance_source, self.allow_line_comments) {
            Ok(value) => self.root.is_valid(&value),
            Err(_) => false,
        }
    }

    /// The compiled root schema node, for callers that need direct access to
    /// [`Schema::validate`]/[`Schema::is_valid`] on already-parsed [`JsonValue`]s.
    #[must_use]
    pub fn root(&self) -> &Schema {
        &self.root
    }
}

/// One-shot convenience: compiles `schema_source` and validates `instance_source` against
/// it, treating any compile or parse failure as "not valid".
///
/// ```rust
/// use jsonschema7::is_valid;
///
/// assert!(is_valid(r#"{"minLength": 5}"#, r#""foobar""#));
/// assert!(!is_valid(r#"{"minLength": 5}"#, r#""foo""#));
/// ```
#[must_use]
pub fn is_valid(schema_source: &str, instance_source: &str) -> bool {
    match JsonSchema::compile(schema_source) {
        Ok(schema) => schema.is_valid(instance_source),
        Err(_) => false,
    }
}

pub(crate) fn compile_with_options(
    schema_source: &str,
    options: CompileOptions,
) -> Result<JsonSchema, ValidationError> {
    let allow_line_comments = options.allow_line_comments;
    let value = Parser::parse_document(schema_source, allow_line_comments)
        .map_err(ValidationError::from)?;
    let resolver = RefResolver::new(Arc::clone(&options.retriever));
    let mut errors = ValidationError::empty();
    let root = compiler::compile_schema(&value, &resolver, &[], false, &options, &mut errors);
    errors.extend(resolver.validate_all_refs(&options));
    if options.validate_schema {
        errors.extend(meta_schema::validate_against_meta_schema(&value));
    }
    if errors.is_empty() {
        Ok(JsonSchema {
            root,
            allow_line_comments,
        })
    } else {
        Err(errors)
    }
}
