//! Error types shared by the compiler and the keyword validators.
//!
//! `ValidationError` is the single public error shape: an ordered list of
//! `(message, SourcePosition)` pairs. Compile-time failures and run-time validation
//! failures both produce it, and it flattens straightforwardly into an aggregate when a
//! parent validator (`allOf`, `properties`, the root compiler) combines its children's
//! results.
use std::fmt;

use crate::parser::ParseDocumentError;
use crate::value::{JsonValue, SourcePosition};

/// The aggregated result of a compile or validate call. An empty `errors` vector means
/// success; this is checked by [`ValidationError::is_empty`] rather than by using
/// `Option`, so aggregation is just concatenation.
#[derive(Debug, Clone, Default)]
pub struct ValidationError {
    pub errors: Vec<(String, SourcePosition)>,
}

impl ValidationError {
    #[must_use]
    pub fn empty() -> Self {
        ValidationError { errors: Vec::new() }
    }

    #[must_use]
    pub fn single(message: impl Into<String>, position: SourcePosition) -> Self {
        ValidationError {
            errors: vec![(message.into(), position)],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn extend(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }

    pub fn push(&mut self, message: impl Into<String>, position: SourcePosition) {
        self.errors.push((message.into(), position));
    }

    #[must_use]
    pub fn aggregate(items: impl IntoIterator<Item = ValidationError>) -> Self {
        let mut out = ValidationError::empty();
        for item in items {
            out.extend(item);
        }
        out
    }

    pub(crate) fn type_error(instance: &JsonValue, expected: &str) -> Self {
        ValidationError::single(
            format!("'{}' is not of type '{}'", instance, expected),
            instance.position().clone(),
        )
    }

    pub(crate) fn multiple_type_error(instance: &JsonValue, expected: &[String]) -> Self {
        let types = expected
            .iter()
            .map(|t| format!("'{}'", t))
            .collect::<Vec<_>>()
            .join(", ");
        ValidationError::single(
            format!("'{}' is not of types {}", instance, types),
            instance.position().clone(),
        )
    }

    pub(crate) fn constant(instance: &JsonValue, expected: &JsonValue) -> Self {
        ValidationError::single(
            format!("'{}' was expected to equal '{}'", instance, expected),
            instance.position().clone(),
        )
    }

    pub(crate) fn enumeration(instance: &JsonValue, options: &JsonValue) -> Self {
        ValidationError::single(
            format!("'{}' is not one of '{}'", instance, options),
            instance.position().clone(),
        )
    }

    pub(crate) fn minimum(instance: &JsonValue, limit: f64) -> Self {
        ValidationError::single(
            format!("{} is less than the minimum of {}", instance, limit),
            instance.position().clone(),
        )
    }

    pub(crate) fn maximum(instance: &JsonValue, limit: f64) -> Self {
        ValidationError::single(
            format!("{} is greater than the maximum of {}", instance, limit),
            instance.position().clone(),
        )
    }

    pub(crate) fn exclusive_minimum(instance: &JsonValue, limit: f64) -> Self {
        ValidationError::single(
            format!(
                "{} is less than or equal to the minimum of {}",
                instance, limit
            ),
            instance.position().clone(),
        )
    }

    pub(crate) fn exclusive_maximum(instance: &JsonValue, limit: f64) -> Self {
        ValidationError::single(
            format!(
                "{} is greater than or equal to the maximum of {}",
                instance, limit
            ),
            instance.position().clone(),
        )
    }

    pub(crate) fn multiple_of(instance: &JsonValue, factor: f64) -> Self {
        ValidationError::single(
            format!("{} is not a multiple of {}", instance, factor),
            instance.position().clone(),
        )
    }

    pub(crate) fn max_length(instance: &JsonValue, limit: u64) -> Self {
        ValidationError::single(
            format!("{} is longer than {} characters", instance, limit),
            instance.position().clone(),
        )
    }

    pub(crate) fn min_length(instance: &JsonValue, limit: u64) -> Self {
        ValidationError::single(
            format!("{} is shorter than {} characters", instance, limit),
            instance.position().clone(),
        )
    }

    pub(crate) fn pattern(instance: &JsonValue, pattern: &str) -> Self {
        ValidationError::single(
            format!("{} does not match '{}'", instance, pattern),
            instance.position().clone(),
        )
    }

    pub(crate) fn max_items(instance: &JsonValue, limit: u64) -> Self {
        ValidationError::single(
            format!("{} has more than {} items", instance, limit),
            instance.position().clone(),
        )
    }

    pub(crate) fn min_items(instance: &JsonValue, limit: u64) -> Self {
        ValidationError::single(
            format!("{} has less than {} items", instance, limit),
            instance.position().clone(),
        )
    }

    pub(crate) fn unique_items(instance: &JsonValue) -> Self {
        ValidationError::single(
            format!("{} has non-unique elements", instance),
            instance.position().clone(),
        )
    }

    pub(crate) fn max_properties(instance: &JsonValue, limit: u64) -> Self {
        ValidationError::single(
            format!("{} has more than {} properties", instance, limit),
            instance.position().clone(),
        )
    }

    pub(crate) fn min_properties(instance: &JsonValue, limit: u64) -> Self {
        ValidationError::single(
            format!("{} has less than {} properties", instance, limit),
            instance.position().clone(),
        )
    }

    pub(crate) fn required(instance: &JsonValue, property: &str) -> Self {
        ValidationError::single(
            format!("'{}' is a required property", property),
            instance.position().clone(),
        )
    }

    pub(crate) fn additional_properties(instance: &JsonValue, extras: &[String]) -> Self {
        let joined = extras
            .iter()
            .map(|p| format!("'{}'", p))
            .collect::<Vec<_>>()
            .join(", ");
        ValidationError::single(
            format!("Additional properties are not allowed ({} was unexpected)", joined),
            instance.position().clone(),
        )
    }

    pub(crate) fn additional_items(instance: &JsonValue) -> Self {
        ValidationError::single(
            format!("Additional items are not allowed ({} was unexpected)", instance),
            instance.position().clone(),
        )
    }

    pub(crate) fn contains(instance: &JsonValue) -> Self {
        ValidationError::single(
            format!("{} does not contain items matching the given schema", instance),
            instance.position().clone(),
        )
    }

    pub(crate) fn dependencies_required(instance: &JsonValue, property: &str) -> Self {
        ValidationError::single(
            format!(
                "'{}' is a dependency of a present property and is missing",
                property
            ),
            instance.position().clone(),
        )
    }

    pub(crate) fn not_schema(instance: &JsonValue) -> Self {
        ValidationError::single(
            format!("{} is valid under the given schema", instance),
            instance.position().clone(),
        )
    }

    pub(crate) fn any_of(instance: &JsonValue) -> Self {
        ValidationError::single(
            format!("{} is not valid under any of the given schemas", instance),
            instance.position().clone(),
        )
    }

    pub(crate) fn one_of_not_valid(instance: &JsonValue) -> Self {
        ValidationError::single(
            format!("{} is not valid under any of the given schemas", instance),
            instance.position().clone(),
        )
    }

    pub(crate) fn one_of_multiple_valid(instance: &JsonValue) -> Self {
        ValidationError::single(
            format!("{} is valid under more than one of the given schemas", instance),
            instance.position().clone(),
        )
    }

    pub(crate) fn false_schema(instance: &JsonValue) -> Self {
        ValidationError::single(
            "False schema does not allow anything",
            instance.position().clone(),
        )
    }

    pub(crate) fn unresolved_reference(reference: &str, position: SourcePosition) -> Self {
        ValidationError::single(format!("Unresolved reference '{}'", reference), position)
    }

    pub(crate) fn invalid_schema(position: SourcePosition) -> Self {
        ValidationError::single("Invalid schema: expected an object or a boolean", position)
    }

    pub(crate) fn invalid_regex(pattern: &str, position: SourcePosition) -> Self {
        ValidationError::single(format!("'{}' is not a valid regex", pattern), position)
    }

    pub(crate) fn invalid_data(position: SourcePosition) -> Self {
        ValidationError::single("input is not valid UTF-8", position)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (message, position)) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} at {}", message, position)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ParseDocumentError> for ValidationError {
    fn from(error: ParseDocumentError) -> Self {
        let position = error.position();
        ValidationError::single(error.to_string(), position)
    }
}

/// Errors produced while fetching a remote `$ref` target.
#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    #[error("fetching '{url}' requires the 'resolve-http' feature")]
    UnsupportedScheme { url: String },
    #[error("fetching '{url}' failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("response body for '{url}' was not valid UTF-8")]
    InvalidEncoding { url: String },
}
