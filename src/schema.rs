//! The compiled schema node and its runtime validate/is_valid entry points.
use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use crate::error::ValidationError;
use crate::resolver::RefResolver;
use crate::validator::BoxedValidator;
use crate::value::{JsonValue, SourcePosition};

/// One compiled node of a schema document. The root schema owns the `RefResolver`;
/// every other node borrows it through an `Arc`.
pub struct Schema {
    pub(crate) id: Option<String>,
    pub(crate) schema_uri: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) ref_id: Option<String>,
    pub(crate) ref_position: SourcePosition,
    pub(crate) item_should_be_present: Option<bool>,
    pub(crate) properties: HashMap<String, Arc<Schema>>,
    pub(crate) pattern_properties: Vec<(Regex, Arc<Schema>)>,
    pub(crate) definitions: HashMap<String, Arc<Schema>>,
    pub(crate) validators: Vec<BoxedValidator>,
    pub(crate) resolver: Arc<RefResolver>,
}

impl Schema {
    /// A synthetic "always passes" schema. Used as the implicit default for
    /// `additionalItems`/`additionalProperties` when the keyword is absent from source;
    /// never registered in the resolver since it has no pointer path of its own.
    pub(crate) fn permissive(resolver: Arc<RefResolver>) -> Self {
        let mut schema = Schema::new(resolver);
        schema.item_should_be_present = Some(true);
        schema
    }

    pub(crate) fn new(resolver: Arc<RefResolver>) -> Self {
        Schema {
            id: None,
            schema_uri: None,
            title: None,
            description: None,
            ref_id: None,
            ref_position: SourcePosition::unknown(),
            item_should_be_present: None,
            properties: HashMap::new(),
            pattern_properties: Vec::new(),
            definitions: HashMap::new(),
            validators: Vec::new(),
            resolver,
        }
    }

    /// Validates `instance`, aggregating every failure rather than stopping at the first.
    pub fn validate(&self, instance: &JsonValue) -> ValidationError {
        if let Some(allowed) = self.item_should_be_present {
            return if allowed {
                ValidationError::empty()
            } else {
                ValidationError::false_schema(instance)
            };
        }
        if let Some(ref_id) = &self.ref_id {
            // `$ref` hides sibling keywords at runtime (Draft 7 semantics).
            return self.resolver.resolved_schema(ref_id).validate(instance);
        }
        ValidationError::aggregate(self.validators.iter().map(|v| v.validate(instance, self)))
    }

    /// A short-circuiting variant of [`Schema::validate`] for callers that only need a
    /// boolean outcome (used by `anyOf`, `not`, and the `if` branch of `if`/`then`/`else`).
    #[must_use]
    pub fn is_valid(&self, instance: &JsonValue) -> bool {
        if let Some(allowed) = self.item_should_be_present {
            return allowed;
        }
        if let Some(ref_id) = &self.ref_id {
            return self.resolver.resolved_schema(ref_id).is_valid(instance);
        }
        self.validators.iter().all(|v| v.is_valid(instance, self))
    }
}
