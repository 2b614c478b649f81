//! Type matching between declared types and runtime values.
//!
//! Numeric width is not a type distinction here: `integer` and `long` accept
//! each other, as do `float` and `double`. `TypeCode::Unknown` accepts any
//! value. Names that mean nothing fail closed.

use conform_core::{AnyValue, TypeCode, classify, effective_value};

use crate::result::ValidationResult;
use crate::type_ref::TypeRef;

/// Whether a value with runtime tag `actual_type` satisfies `expected`.
#[must_use]
pub fn match_type(expected: &TypeRef, actual_type: TypeCode, actual_value: &AnyValue) -> bool {
    match expected {
        TypeRef::Code(code) => match_type_code(*code, actual_type),
        TypeRef::Concrete(concrete) => match effective_value(actual_value).as_ref() {
            AnyValue::Object(object) => object.as_any().type_id() == concrete.id(),
            _ => false,
        },
        TypeRef::Named(name) => match_type_by_name(name, actual_type, actual_value),
        TypeRef::Schema(schema) => !schema
            .validate(actual_value)
            .iter()
            .any(ValidationResult::is_error),
    }
}

/// Classify `value` and match it against `expected`.
#[must_use]
pub fn match_value_type(expected: &TypeRef, value: &AnyValue) -> bool {
    match_type(expected, classify(value), value)
}

#[must_use]
pub fn match_type_code(expected: TypeCode, actual: TypeCode) -> bool {
    use TypeCode::{Double, Float, Integer, Long, Unknown};

    match (expected, actual) {
        (Unknown, _) | (Integer, Long) | (Long, Integer) | (Float, Double) | (Double, Float) => {
            true
        }
        (expected, actual) => expected == actual,
    }
}

/// Match a textual type name, case-insensitively.
///
/// Canonical names (`string`, `integer`, ...) and common aliases are
/// understood, `T[]` means an array, and an object also matches its own
/// type name.
#[must_use]
pub fn match_type_by_name(name: &str, actual_type: TypeCode, actual_value: &AnyValue) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }

    let lowered = name.to_ascii_lowercase();
    if lowered.ends_with("[]") {
        return actual_type == TypeCode::Array;
    }

    let canonical = match lowered.as_str() {
        "any" | "*" => "unknown",
        "bool" => "boolean",
        "int" => "integer",
        "date" => "datetime",
        "timespan" => "duration",
        "dict" | "dictionary" => "map",
        "list" => "array",
        other => other,
    };
    let expected = TypeCode::ALL
        .into_iter()
        .find(|code| code.as_str() == canonical);
    if expected.is_some_and(|code| match_type_code(code, actual_type)) {
        return true;
    }

    match effective_value(actual_value).as_ref() {
        AnyValue::Object(object) => object.type_name().eq_ignore_ascii_case(name),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectSchema;
    use chrono::{Duration, Utc};
    use conform_core::{ConcreteType, Record};
    use rstest::rstest;

    #[derive(Debug)]
    struct Invoice;

    impl conform_core::PropertyEnumerable for Invoice {
        fn properties_of(&self) -> Vec<(String, AnyValue)> {
            Vec::new()
        }
    }

    impl conform_core::DynObject for Invoice {
        fn type_name(&self) -> &str {
            "Invoice"
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[rstest]
    #[case(TypeCode::Integer, TypeCode::Long, true)]
    #[case(TypeCode::Long, TypeCode::Integer, true)]
    #[case(TypeCode::Float, TypeCode::Double, true)]
    #[case(TypeCode::Double, TypeCode::Float, true)]
    #[case(TypeCode::Integer, TypeCode::Double, false)]
    #[case(TypeCode::String, TypeCode::String, true)]
    #[case(TypeCode::String, TypeCode::Integer, false)]
    #[case(TypeCode::Unknown, TypeCode::Map, true)]
    #[case(TypeCode::Object, TypeCode::Map, false)]
    #[case(TypeCode::Array, TypeCode::Array, true)]
    fn tag_matching(#[case] expected: TypeCode, #[case] actual: TypeCode, #[case] matched: bool) {
        assert_eq!(match_type_code(expected, actual), matched);
    }

    #[rstest]
    #[case("String", AnyValue::from("abc"), true)]
    #[case("int", AnyValue::from(5_i64), true)]
    #[case("LONG", AnyValue::from(5), true)]
    #[case("bool", AnyValue::from(true), true)]
    #[case("date", AnyValue::from(Utc::now()), true)]
    #[case("timespan", AnyValue::from(Duration::seconds(5)), true)]
    #[case("string[]", AnyValue::from(vec!["a"]), true)]
    #[case("dictionary", AnyValue::map([("a", 1)]), true)]
    #[case("any", AnyValue::from(1.5), true)]
    #[case("Unknown", AnyValue::from("x"), true)]
    #[case("string", AnyValue::from(1), false)]
    #[case("", AnyValue::from(1), false)]
    #[case("nonsense", AnyValue::from(1), false)]
    fn name_matching(#[case] name: &str, #[case] value: AnyValue, #[case] matched: bool) {
        assert_eq!(match_value_type(&TypeRef::named(name), &value), matched);
    }

    #[test]
    fn objects_match_their_own_name() {
        let person = AnyValue::object(Record::new("Person"));
        assert!(match_value_type(&TypeRef::named("person"), &person));
        assert!(match_value_type(&TypeRef::named("object"), &person));
        assert!(!match_value_type(&TypeRef::named("Invoice"), &person));
    }

    #[test]
    fn concrete_types_check_instance() {
        let invoice = AnyValue::object(Invoice);
        let record = AnyValue::object(Record::new("Invoice"));
        let expected = TypeRef::Concrete(ConcreteType::of::<Invoice>());
        assert!(match_value_type(&expected, &invoice));
        assert!(!match_value_type(&expected, &record));
        assert!(!match_value_type(&expected, &AnyValue::from("Invoice")));
    }

    #[test]
    fn schemas_match_when_error_free() {
        let expected = TypeRef::schema(ObjectSchema::new().with_required_property(
            "id",
            TypeCode::String,
            [],
        ));
        assert!(match_value_type(&expected, &AnyValue::map([("id", "1")])));
        assert!(!match_value_type(&expected, &AnyValue::map([("id", 1)])));
    }
}
