//! Compile-time configuration, mirroring the teacher's `CompilationOptions` builder.
use std::sync::Arc;

use crate::retrieve::{DefaultRetriever, Retrieve};

/// Builds a compiled [`crate::JsonSchema`] from schema source text.
///
/// `JsonSchema::compile(text)` is sugar for `JsonSchema::options().compile(text)`.
pub struct CompileOptions {
    pub(crate) validate_schema: bool,
    pub(crate) retriever: Arc<dyn Retrieve>,
    pub(crate) allow_line_comments: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            validate_schema: true,
            retriever: Arc::new(DefaultRetriever),
            allow_line_comments: false,
        }
    }
}

impl CompileOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the meta-schema validation pass run after a root schema compiles
    /// successfully. Enabled by default.
    #[must_use]
    pub fn validate_schema(mut self, enabled: bool) -> Self {
        self.validate_schema = enabled;
        self
    }

    /// Swaps the collaborator used to fetch remote `$ref` targets.
    #[must_use]
    pub fn retriever(mut self, retriever: Arc<dyn Retrieve>) -> Self {
        self.retriever = retriever;
        self
    }

    /// Opts into `;`-prefixed line comments in schema and instance source text, for
    /// bit-compatibility with callers that relied on the original engine's lexer
    /// accepting them. Disabled by default.
    #[must_use]
    pub fn allow_line_comments(mut self, enabled: bool) -> Self {
        self.allow_line_comments = enabled;
        self
    }

    #[must_use]
    pub fn compile(self, schema_source: &str) -> Result<crate::JsonSchema, crate::error::ValidationError> {
        crate::compile_with_options(schema_source, self)
    }
}
