//! Declared type descriptors.

use conform_core::{ConcreteType, TypeCode};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::schema::Schema;

/// The type a schema expects a value to have.
///
/// An absent declaration is modelled as `Option<TypeRef>::None` by the
/// schemas that carry one.
#[derive(Debug, Clone)]
pub enum TypeRef {
    /// A coarse runtime tag. `TypeCode::Unknown` accepts anything.
    Code(TypeCode),
    /// A concrete Rust type behind [`AnyValue::Object`](conform_core::AnyValue::Object).
    Concrete(ConcreteType),
    /// A type name, matched case-insensitively.
    Named(String),
    /// A nested schema that validates the value in place of a type check.
    Schema(Arc<dyn Schema>),
}

impl TypeRef {
    #[must_use]
    pub fn concrete<T: Any>() -> Self {
        Self::Concrete(ConcreteType::of::<T>())
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn schema(schema: impl Schema + 'static) -> Self {
        Self::Schema(Arc::new(schema))
    }

    /// Payload stored in `expected` of a type mismatch.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_string())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Concrete(concrete) => write!(f, "{concrete}"),
            Self::Named(name) => f.write_str(name),
            Self::Schema(_) => f.write_str("schema"),
        }
    }
}

impl From<TypeCode> for TypeRef {
    fn from(code: TypeCode) -> Self {
        Self::Code(code)
    }
}

impl From<ConcreteType> for TypeRef {
    fn from(concrete: ConcreteType) -> Self {
        Self::Concrete(concrete)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Arc<dyn Schema>> for TypeRef {
    fn from(schema: Arc<dyn Schema>) -> Self {
        Self::Schema(schema)
    }
}
