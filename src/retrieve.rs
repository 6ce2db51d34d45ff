//! The pluggable remote `$ref` fetch collaborator.
use crate::error::RetrieveError;

/// Fetches the raw bytes of a schema document referenced by an absolute URL.
///
/// Implementations are injected via [`crate::CompileOptions::retriever`], mirroring the
/// teacher's own `SchemaResolver` abstraction: tests stub this trait instead of hitting the
/// network, and the default implementation is a thin wrapper around a blocking HTTP client.
pub trait Retrieve: Send + Sync {
    fn retrieve(&self, url: &str) -> Result<Vec<u8>, RetrieveError>;
}

/// The default retriever: a blocking GET when `resolve-http` is enabled, otherwise a
/// retriever that always reports the feature is missing.
pub(crate) struct DefaultRetriever;

#[cfg(feature = "resolve-http")]
impl Retrieve for DefaultRetriever {
    fn retrieve(&self, url: &str) -> Result<Vec<u8>, RetrieveError> {
        use std::io::Read;
        let response = ureq::get(url)
            .call()
            .map_err(|error| RetrieveError::Transport {
                url: url.to_string(),
                reason: error.to_string(),
            })?;
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|error| RetrieveError::Transport {
                url: url.to_string(),
                reason: error.to_string(),
            })?;
        Ok(body)
    }
}

#[cfg(not(feature = "resolve-http"))]
impl Retrieve for DefaultRetriever {
    fn retrieve(&self, url: &str) -> Result<Vec<u8>, RetrieveError> {
        Err(RetrieveError::UnsupportedScheme {
            url: url.to_string(),
        })
    }
}

#[cfg(all(test, not(feature = "resolve-http")))]
mod tests {
    use super::*;

    #[test]
    fn default_retriever_reports_missing_feature() {
        let result = DefaultRetriever.retrieve("https://example.com/schema.json");
        assert!(matches!(result, Err(RetrieveError::UnsupportedScheme { .. })));
    }
}
