//! # conform-core
//!
//! Dynamic value model and introspection helpers for conform.
//!
//! This crate provides the pieces the validation engine codes against:
//! - `AnyValue`: loosely-typed document tree (scalars, sequences, maps, objects)
//! - `TypeCode` classification and transparent wrapper unwrapping
//! - `PropertyEnumerable`: uniform `name -> value` view over objects, maps and sequences
//! - `RecursiveObjectReader`: dotted-path access guarded against cyclic graphs
//! - Coercive comparison used by validation rules
//! - Cross-cutting error types

pub mod compare;
pub mod errors;
pub mod reader;
pub mod recursive;
pub mod types;
pub mod value;

pub use compare::CompareOperator;
pub use errors::CoreError;
pub use reader::PropertyEnumerable;
pub use recursive::{DEFAULT_MAX_DEPTH, RecursiveObjectReader};
pub use types::{ConcreteType, TypeCode};
pub use value::{AnyValue, DynObject, Record, ValueWrapper, classify, effective_value};
