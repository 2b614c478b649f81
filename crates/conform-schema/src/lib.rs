//! # conform-schema
//!
//! Declarative schemas and validation rules for conform.
//!
//! A schema describes the expected shape of an [`AnyValue`](conform_core::AnyValue)
//! and produces a flat list of [`ValidationResult`]s, each carrying the
//! dotted path of the value it concerns. Validation never fails outright;
//! callers decide what to do with the results, or let
//! [`ValidationException`] decide for them.
//!
//! ## Architecture
//!
//! - [`Schema`] is the shared trait; every kind owns a [`SchemaCore`] with the
//!   required flag and attached rules.
//! - [`PropertySchema`], [`ObjectSchema`], [`ArraySchema`] and [`MapSchema`]
//!   add structural checks on top of the core.
//! - [`rules`] holds the pluggable [`ValidationRule`] implementations.
//! - [`matcher`] decides whether a runtime value satisfies a declared [`TypeRef`].
//!
//! ```
//! use conform_core::{AnyValue, TypeCode};
//! use conform_schema::{ObjectSchema, Schema};
//!
//! let schema = ObjectSchema::new()
//!     .with_required_property("id", TypeCode::String, [])
//!     .with_optional_property("name", TypeCode::String, []);
//!
//! let results = schema.validate(&AnyValue::map([("id", "1"), ("name", "ABC")]));
//! assert!(results.is_empty());
//! ```

pub mod collection;
pub mod exception;
pub mod matcher;
pub mod object;
pub mod property;
pub mod result;
pub mod rules;
pub mod schema;
pub mod type_ref;

pub use collection::{ArraySchema, MapSchema};
pub use exception::ValidationException;
pub use object::ObjectSchema;
pub use property::PropertySchema;
pub use result::{ValidationResult, ValidationResultType, codes};
pub use rules::{ValidationRule, rule};
pub use schema::{RuleRef, Schema, SchemaCore, ValueSchema, perform_type_validation};
pub use type_ref::TypeRef;
