//! Runtime type classification for dynamic values.
//!
//! A [`TypeCode`] is the coarse tag the validation engine compares against.
//! It deliberately ignores numeric width and concrete object types; those are
//! handled by the type matcher in `conform-schema`.

use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::fmt;

// ---------------------------------------------------------------------------
// TypeCode
// ---------------------------------------------------------------------------

/// Coarse runtime classification of an [`AnyValue`](crate::AnyValue).
///
/// `Unknown` doubles as the "any" tag when used as an expected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCode {
    #[default]
    Unknown,
    String,
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    DateTime,
    Duration,
    Object,
    Map,
    Array,
}

impl TypeCode {
    pub const ALL: [Self; 12] = [
        Self::Unknown,
        Self::String,
        Self::Boolean,
        Self::Integer,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::DateTime,
        Self::Duration,
        Self::Object,
        Self::Map,
        Self::Array,
    ];

    /// Canonical lowercase name, used in messages and by-name matching.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::DateTime => "datetime",
            Self::Duration => "duration",
            Self::Object => "object",
            Self::Map => "map",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConcreteType
// ---------------------------------------------------------------------------

/// Handle to a concrete Rust type, used to declare "this value must be a `T`".
///
/// Matching is by [`TypeId`], so only values stored as
/// [`AnyValue::Object`](crate::AnyValue::Object) can satisfy it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConcreteType {
    id: TypeId,
    name: &'static str,
}

impl ConcreteType {
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified Rust type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// [`name`](Self::name) without the module path of the outer type, e.g.
    /// `Dummy` for `my_crate::Dummy` and `Vec<my::Foo>` for
    /// `alloc::vec::Vec<my::Foo>`. Generic arguments are kept as written.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let name = self.name;
        let outer = name.find('<').map_or(name, |generics| &name[..generics]);
        outer.rfind("::").map_or(name, |sep| &name[sep + 2..])
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
