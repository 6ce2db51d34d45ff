//! Registry of compiled schemas keyed by JSON-Pointer fragment or absolute URL, shared by
//! every node descending from one root schema.
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use percent_encoding::percent_decode_str;

use crate::compiler::compile_schema;
use crate::error::ValidationError;
use crate::options::CompileOptions;
use crate::parser::Parser;
use crate::retrieve::Retrieve;
use crate::schema::Schema;
use crate::value::SourcePosition;

/// Shared, per-root-schema registry of compiled schemas.
///
/// Descendants hold a non-owning `Arc` clone; `$ref` never becomes a direct owning edge
/// between schema nodes, which is how a schema graph can contain cycles without becoming
/// an actual Rust reference cycle.
pub(crate) struct RefResolver {
    retriever: Arc<dyn Retrieve>,
    references: RwLock<HashMap<String, Arc<Schema>>>,
    refs_to_validate: RwLock<Vec<(String, SourcePosition)>>,
    resolved: RwLock<HashMap<String, Arc<Schema>>>,
    remote_ref_cache: RwLock<HashMap<String, Arc<Schema>>>,
}

impl RefResolver {
    pub(crate) fn new(retriever: Arc<dyn Retrieve>) -> Arc<Self> {
        Arc::new(RefResolver {
            retriever,
            references: RwLock::new(HashMap::new()),
            refs_to_validate: RwLock::new(Vec::new()),
            resolved: RwLock::new(HashMap::new()),
            remote_ref_cache: RwLock::new(HashMap::new()),
        })
    }

    pub(crate) fn add_reference(&self, pointer: String, schema: Arc<Schema>) {
        self.references.write().insert(pointer, schema);
    }

    pub(crate) fn add_ref_to_resolve(&self, reference: String, position: SourcePosition) {
        self.refs_to_validate.write().push((reference, position));
    }

    /// Looks up a schema by its registered pointer, e.g. `#/definitions/positive`.
    pub(crate) fn registered(&self, pointer: &str) -> Option<Arc<Schema>> {
        self.references.read().get(pointer).cloned()
    }

    /// Looks up an already-resolved `$ref` target. Only ever called at validate time,
    /// after [`RefResolver::validate_all_refs`] has run to completion on a successful
    /// compile, so the entry is guaranteed present.
    pub(crate) fn resolved_schema(&self, reference: &str) -> Arc<Schema> {
        self.resolved
            .read()
            .get(reference)
            .cloned()
            .unwrap_or_else(|| {
                panic!(
                    "'{}' was not resolved during compilation; this is a bug",
                    reference
                )
            })
    }

    /// Resolves every queued `$ref`, populating `resolved` and collecting failures.
    /// Called exactly once, at the end of root schema compilation.
    pub(crate) fn validate_all_refs(
        self: &Arc<Self>,
        options: &CompileOptions,
    ) -> ValidationError {
        let queue = self.refs_to_validate.read().clone();
        let mut errors = ValidationError::empty();
        for (reference, position) in queue {
            match self.get_schema(&reference, &position, options) {
                Ok(schema) => {
                    self.resolved.write().insert(reference, schema);
                }
                Err(error) => errors.extend(error),
            }
        }
        errors
    }

    /// Resolves a single `$ref` string to a compiled schema, fetching and compiling a
    /// remote document if the reference is not a local fragment.
    fn get_schema(
        self: &Arc<Self>,
        reference: &str,
        position: &SourcePosition,
        options: &CompileOptions,
    ) -> Result<Arc<Schema>, ValidationError> {
        if let Some(local) = reference.strip_prefix('#') {
            let pointer = format!("#{}", local);
            return self
                .references
                .read()
                .get(&pointer)
                .cloned()
                .ok_or_else(|| ValidationError::unresolved_reference(reference, position.clone()));
        }

        let (url_part, fragment) = match reference.split_once('#') {
            Some((url, fragment)) => (url, Some(fragment)),
            None => (reference, None),
        };

        let root = self.remote_schema(url_part, position, options)?;
        match fragment {
            None | Some("") => Ok(root),
            Some(fragment) => {
                let decoded = percent_decode_str(fragment)
                    .decode_utf8()
                    .map(|cow| cow.into_owned())
                    .unwrap_or_else(|_| fragment.to_string());
                let pointer = format!("#{}", decoded);
                root.resolver
                    .references
                    .read()
                    .get(&pointer)
                    .cloned()
                    .ok_or_else(|| ValidationError::unresolved_reference(reference, position.clone()))
            }
        }
    }

    fn remote_schema(
        self: &Arc<Self>,
        url: &str,
        position: &SourcePosition,
        options: &CompileOptions,
    ) -> Result<Arc<Schema>, ValidationError> {
        if let Some(cached) = self.remote_ref_cache.read().get(url) {
            return Ok(Arc::clone(cached));
        }
        let bytes = self
            .retriever
            .retrieve(url)
            .map_err(|error| ValidationError::single(error.to_string(), position.clone()))?;
        let text = String::from_utf8(bytes)
            .map_err(|_| ValidationError::invalid_data(position.clone()))?;
        let value = Parser::parse_document(&text, options.allow_line_comments)
            .map_err(ValidationError::from)?;
        let remote_resolver = RefResolver::new(Arc::clone(&self.retriever));
        let mut errors = ValidationError::empty();
        let schema = compile_schema(&value, &remote_resolver, &[], false, options, &mut errors);
        errors.extend(remote_resolver.validate_all_refs(options));
        if !errors.is_empty() {
            return Err(errors);
        }
        self.remote_ref_cache
            .write()
            .insert(url.to_string(), Arc::clone(&schema));
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CompileOptions;
    use crate::test_support::NeverCalled;

    #[test]
    fn local_fragment_lookup_round_trips() {
        let resolver = RefResolver::new(Arc::new(NeverCalled));
        let options = CompileOptions::default();
        let value = crate::parser::Parser::parse_document("true", false).unwrap();
        let mut errors = ValidationError::empty();
        let schema = compile_schema(&value, &resolver, &[], true, &options, &mut errors);
        resolver.add_reference("#".to_string(), Arc::clone(&schema));
        let found = resolver
            .get_schema("#", &SourcePosition::unknown(), &options)
            .unwrap();
        assert!(Arc::ptr_eq(&found, &schema));
    }

    #[test]
    fn unresolved_reference_is_an_error() {
        let resolver = RefResolver::new(Arc::new(NeverCalled));
        let options = CompileOptions::default();
        resolver.add_ref_to_resolve("#/missing".to_string(), SourcePosition::unknown());
        let errors = resolver.validate_all_refs(&options);
        assert!(!errors.is_empty());
    }
}
