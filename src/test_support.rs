//! Shared scaffolding for keyword unit tests.
#![cfg(test)]
use std::sync::Arc;

use crate::error::RetrieveError;
use crate::resolver::RefResolver;
use crate::retrieve::Retrieve;
use crate::schema::Schema;

pub(crate) struct NeverCalled;

impl Retrieve for NeverCalled {
    fn retrieve(&self, url: &str) -> Result<Vec<u8>, RetrieveError> {
        Err(RetrieveError::UnsupportedScheme {
            url: url.to_string(),
        })
    }
}

/// A schema with no validators of its own, useful when a test only needs a `&Schema` to
/// satisfy a `Validate::validate` signature.
pub(crate) fn empty_schema() -> Schema {
    Schema::new(RefResolver::new(Arc::new(NeverCalled)))
}
