//! One module per Draft 7 keyword family. [`compile`] instantiates every validator
//! applicable to a schema object's members; nested-schema keywords recurse through
//! [`crate::compiler::compile_schema`].
mod array_bounds;
mod combinators;
mod conditional;
mod const_;
mod dependencies;
mod enum_;
mod items;
mod multiple_of;
mod numeric_bounds;
mod object_bounds;
mod properties;
mod string_bounds;
mod type_;

use std::sync::Arc;

use crate::error::ValidationError;
use crate::options::CompileOptions;
use crate::resolver::RefResolver;
use crate::validator::BoxedValidator;
use crate::value::{JsonObject, PathChunk};

/// Context threaded through every keyword's `compile` function.
pub(crate) struct CompileContext<'a> {
    pub(crate) path: &'a [PathChunk],
    pub(crate) resolver: &'a Arc<RefResolver>,
    pub(crate) is_meta: bool,
    pub(crate) options: &'a CompileOptions,
}

impl<'a> CompileContext<'a> {
    pub(crate) fn child(&self, chunk: PathChunk) -> Vec<PathChunk> {
        let mut path = self.path.to_vec();
        path.push(chunk);
        path
    }
}

pub(crate) fn compile(
    map: &JsonObject,
    path: &[PathChunk],
    resolver: &Arc<RefResolver>,
    is_meta: bool,
    options: &CompileOptions,
    errors: &mut ValidationError,
) -> Vec<BoxedValidator> {
    let ctx = CompileContext {
        path,
        resolver,
        is_meta,
        options,
    };
    let mut validators: Vec<BoxedValidator> = Vec::new();

    macro_rules! push {
        ($opt:expr) => {
            if let Some(v) = $opt {
                validators.push(v);
            }
        };
    }

    push!(type_::compile(map, &ctx, errors));
    push!(enum_::compile(map, &ctx, errors));
    push!(const_::compile(map, &ctx, errors));
    push!(multiple_of::compile(map, &ctx, errors));
    push!(numeric_bounds::compile_maximum(map, &ctx, errors));
    push!(numeric_bounds::compile_exclusive_maximum(map, &ctx, errors));
    push!(numeric_bounds::compile_minimum(map, &ctx, errors));
    push!(numeric_bounds::compile_exclusive_minimum(map, &ctx, errors));
    push!(string_bounds::compile_max_length(map, &ctx, errors));
    push!(string_bounds::compile_min_length(map, &ctx, errors));
    push!(string_bounds::compile_pattern(map, &ctx, errors));
    push!(items::compile_items(map, &ctx, errors));
    push!(array_bounds::compile_max_items(map, &ctx, errors));
    push!(array_bounds::compile_min_items(map, &ctx, errors));
    push!(array_bounds::compile_unique_items(map, &ctx, errors));
    push!(array_bounds::compile_contains(map, &ctx, errors));
    push!(object_bounds::compile_max_properties(map, &ctx, errors));
    push!(object_bounds::compile_min_properties(map, &ctx, errors));
    push!(object_bounds::compile_required(map, &ctx, errors));
    push!(dependencies::compile(map, &ctx, errors));
    push!(properties::compile_properties(map, &ctx, errors));
    push!(properties::compile_pattern_properties(map, &ctx, errors));
    push!(properties::compile_additional_properties(map, &ctx, errors));
    push!(properties::compile_property_names(map, &ctx, errors));
    push!(conditional::compile(map, &ctx, errors));
    push!(combinators::compile_all_of(map, &ctx, errors));
    push!(combinators::compile_any_of(map, &ctx, errors));
    push!(combinators::compile_one_of(map, &ctx, errors));
    push!(combinators::compile_not(map, &ctx, errors));

    validators
}
