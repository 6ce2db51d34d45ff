use crate::error::ValidationError;
use crate::keywords::CompileContext;
use crate::schema::Schema;
use crate::validator::{BoxedValidator, Validate};
use crate::value::{JsonObject, JsonValue};

macro_rules! bound_validator {
    ($struct_name:ident, $keyword:literal, $compile_fn:ident, $check:expr, $make_error:expr) => {
        struct $struct_name {
            limit: f64,
        }

        impl Validate for $struct_name {
            fn validate(&self, instance: &JsonValue, _schema: &Schema) -> ValidationError {
                let Some(number) = instance.as_f64() else {
                    return ValidationError::empty();
                };
                let check: fn(f64, f64) -> bool = $check;
                if check(number, self.limit) {
                    let make_error: fn(&JsonValue, f64) -> ValidationError = $make_error;
                    make_error(instance, self.limit)
                } else {
                    ValidationError::empty()
                }
            }
        }

        pub(crate) fn $compile_fn(
            map: &JsonObject,
            _ctx: &CompileContext,
            errors: &mut ValidationError,
        ) -> Option<BoxedValidator> {
            let value = map.get($keyword)?;
            match value.as_f64() {
                Some(limit) => Some(Box::new($struct_name { limit })),
                None => {
                    errors.extend(ValidationError::single(
                        concat!("'", $keyword, "' must be a number"),
                        value.position().clone(),
                    ));
                    None
                }
            }
        }
    };
}

bound_validator!(
    MaximumValidator,
    "maximum",
    compile_maximum,
    |number, limit| number > limit,
    ValidationError::maximum
);
bound_validator!(
    ExclusiveMaximumValidator,
    "exclusiveMaximum",
    compile_exclusive_maximum,
    |number, limit| number >= limit,
    ValidationError::exclusive_maximum
);
bound_validator!(
    MinimumValidator,
    "minimum",
    compile_minimum,
    |number, limit| number < limit,
    ValidationError::minimum
);
bound_validator!(
    ExclusiveMinimumValidator,
    "exclusiveMinimum",
    compile_exclusive_minimum,
    |number, limit| number <= limit,
    ValidationError::exclusive_minimum
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::empty_schema;
    use crate::value::SourcePosition;

    fn int(n: i64) -> JsonValue {
        JsonValue::Integer(n, SourcePosition::unknown())
    }

    #[test]
    fn maximum_rejects_above_bound() {
        let v = MaximumValidator { limit: 5.0 };
        assert!(!v.validate(&int(6), &empty_schema()).is_empty());
        assert!(v.validate(&int(5), &empty_schema()).is_empty());
    }

    #[test]
    fn exclusive_maximum_rejects_at_bound() {
        let v = ExclusiveMaximumValidator { limit: 5.0 };
        assert!(!v.validate(&int(5), &empty_schema()).is_empty());
        assert!(v.validate(&int(4), &empty_schema()).is_empty());
    }

    #[test]
    fn minimum_rejects_below_bound() {
        let v = MinimumValidator { limit: 0.0 };
        assert!(!v.validate(&int(-1), &empty_schema()).is_empty());
        assert!(v.validate(&int(0), &empty_schema()).is_empty());
    }

    #[test]
    fn exclusive_minimum_rejects_at_bound() {
        let v = ExclusiveMinimumValidator { limit: 0.0 };
        assert!(!v.validate(&int(0), &empty_schema()).is_empty());
        assert!(v.validate(&int(1), &empty_schema()).is_empty());
    }

    #[test]
    fn non_numeric_instance_is_a_no_op() {
        let v = MaximumValidator { limit: 5.0 };
        let instance = JsonValue::String("x".into(), SourcePosition::unknown());
        assert!(v.validate(&instance, &empty_schema()).is_empty());
    }
}
