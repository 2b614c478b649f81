//! Dynamic value model.
//!
//! [`AnyValue`] is the "document under test": a loosely-typed tree of
//! scalars, sequences, ordered maps and user objects. User objects plug in
//! through [`DynObject`]; [`Record`] is a ready-made metadata-driven object and
//! [`ValueWrapper`] a transparent wrapper that validation looks through.

use chrono::{DateTime, Duration, Utc};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::reader::PropertyEnumerable;
use crate::types::TypeCode;

/// Wrapper chains deeper than this are left as-is.
const MAX_UNWRAP_DEPTH: usize = 32;

/// A user-defined object that can take part in validation.
///
/// Implementors expose their properties through [`PropertyEnumerable`] and a
/// type name for by-name type matching. Objects that merely wrap another value
/// return it from [`wrapped_value`](Self::wrapped_value) and are then
/// invisible to the validation engine.
pub trait DynObject: PropertyEnumerable + fmt::Debug + Send + Sync + 'static {
    /// Name used when a schema declares a type by name.
    fn type_name(&self) -> &str;

    /// Access to the concrete type, for instance-of checks.
    fn as_any(&self) -> &dyn Any;

    /// The value this object stands in for, if it is a transparent wrapper.
    fn wrapped_value(&self) -> Option<AnyValue> {
        None
    }
}

/// A dynamically-typed value.
#[derive(Debug, Clone, Default)]
pub enum AnyValue {
    #[default]
    Null,
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    DateTime(DateTime<Utc>),
    Duration(Duration),
    Array(Vec<AnyValue>),
    /// Ordered key/value pairs; iteration order is insertion order.
    ///
    /// Keys are expected to be unique. [`AnyValue::map`] enforces this, a
    /// hand-built `Map` does not.
    Map(Vec<(String, AnyValue)>),
    Object(Arc<dyn DynObject>),
}

impl AnyValue {
    /// Wrap a user object.
    pub fn object<T: DynObject>(object: T) -> Self {
        Self::Object(Arc::new(object))
    }

    /// Build an ordered map from key/value pairs.
    ///
    /// A repeated key keeps the position of its first occurrence and the
    /// value of its last.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map: Vec<(String, Self)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match map.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => map.push((key, value)),
            }
        }
        Self::Map(map)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Runtime type tag of this value, without unwrapping.
    #[must_use]
    pub const fn type_code(&self) -> TypeCode {
        match self {
            Self::Null => TypeCode::Unknown,
            Self::Boolean(_) => TypeCode::Boolean,
            Self::Integer(_) => TypeCode::Integer,
            Self::Long(_) => TypeCode::Long,
            Self::Float(_) => TypeCode::Float,
            Self::Double(_) => TypeCode::Double,
            Self::String(_) => TypeCode::String,
            Self::DateTime(_) => TypeCode::DateTime,
            Self::Duration(_) => TypeCode::Duration,
            Self::Array(_) => TypeCode::Array,
            Self::Map(_) => TypeCode::Map,
            Self::Object(_) => TypeCode::Object,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&Arc<dyn DynObject>> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Coercive conversion to text.
    ///
    /// Arrays join their elements with `,`. Maps, objects and null have no
    /// text form.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match effective_value(self).as_ref() {
            Self::Null | Self::Map(_) | Self::Object(_) => None,
            Self::Boolean(b) => Some(b.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Long(l) => Some(l.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Double(d) => Some(d.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::DateTime(dt) => Some(dt.to_rfc3339()),
            Self::Duration(d) => Some(d.num_milliseconds().to_string()),
            Self::Array(items) => Some(
                items
                    .iter()
                    .map(|item| item.to_text().unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    /// Coercive conversion to a finite number.
    ///
    /// Strings are parsed, booleans map to `1`/`0`, date-times to epoch
    /// milliseconds and durations to milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> Option<f64> {
        let number = match effective_value(self).as_ref() {
            Self::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Integer(i) => Some(f64::from(*i)),
            Self::Long(l) => Some(*l as f64),
            Self::Float(f) => Some(f64::from(*f)),
            Self::Double(d) => Some(*d),
            Self::String(s) => s.trim().parse::<f64>().ok(),
            Self::DateTime(dt) => Some(dt.timestamp_millis() as f64),
            Self::Duration(d) => Some(d.num_milliseconds() as f64),
            Self::Null | Self::Array(_) | Self::Map(_) | Self::Object(_) => None,
        };
        number.filter(|n| n.is_finite())
    }

    /// Render as JSON for diagnostics. Objects render as their type name.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
            Self::Long(l) => Value::from(*l),
            Self::Float(f) => {
                serde_json::Number::from_f64(f64::from(*f)).map_or(Value::Null, Value::Number)
            }
            Self::Double(d) => serde_json::Number::from_f64(*d).map_or(Value::Null, Value::Number),
            Self::String(s) => Value::String(s.clone()),
            Self::DateTime(dt) => Value::String(dt.to_rfc3339()),
            Self::Duration(d) => Value::from(d.num_milliseconds()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Object(o) => match o.wrapped_value() {
                Some(inner) => inner.to_json(),
                None => Value::String(o.type_name().to_string()),
            },
        }
    }
}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Duration(a), Self::Duration(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Classify a value's runtime type, looking through wrappers.
#[must_use]
pub fn classify(value: &AnyValue) -> TypeCode {
    effective_value(value).type_code()
}

/// Unwrap transparent wrapper objects; plain values pass through borrowed.
#[must_use]
pub fn effective_value(value: &AnyValue) -> Cow<'_, AnyValue> {
    let mut current = Cow::Borrowed(value);
    for _ in 0..MAX_UNWRAP_DEPTH {
        let inner = match current.as_ref() {
            AnyValue::Object(o) => o.wrapped_value(),
            _ => None,
        };
        match inner {
            Some(inner) => current = Cow::Owned(inner),
            None => break,
        }
    }
    current
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

macro_rules! from_scalar {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for AnyValue {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

from_scalar!(bool, Boolean);
from_scalar!(i32, Integer);
from_scalar!(i64, Long);
from_scalar!(f32, Float);
from_scalar!(f64, Double);
from_scalar!(String, String);
from_scalar!(DateTime<Utc>, DateTime);
from_scalar!(Duration, Duration);

impl From<&str> for AnyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<u32> for AnyValue {
    fn from(value: u32) -> Self {
        Self::Long(i64::from(value))
    }
}

impl From<Arc<dyn DynObject>> for AnyValue {
    fn from(value: Arc<dyn DynObject>) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for AnyValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for AnyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for AnyValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i32::try_from(i).map_or(Self::Long(i), Self::Integer)
                } else if let Some(u) = n.as_u64() {
                    Self::Double(u as f64)
                } else {
                    n.as_f64().map_or(Self::Null, Self::Double)
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A named object described by metadata rather than a Rust struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, AnyValue)>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Set a field, replacing an existing field with the same name.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<AnyValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AnyValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnyValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }
}

impl PropertyEnumerable for Record {
    fn properties_of(&self) -> Vec<(String, AnyValue)> {
        self.fields.clone()
    }
}

impl DynObject for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// ValueWrapper
// ---------------------------------------------------------------------------

/// Transparent holder: validation sees the inner value, never the wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueWrapper {
    inner: AnyValue,
}

impl ValueWrapper {
    pub fn new(inner: impl Into<AnyValue>) -> Self {
        Self {
            inner: inner.into(),
        }
    }

    #[must_use]
    pub const fn inner(&self) -> &AnyValue {
        &self.inner
    }
}

impl PropertyEnumerable for ValueWrapper {
    fn properties_of(&self) -> Vec<(String, AnyValue)> {
        self.inner.properties_of()
    }
}

impl DynObject for ValueWrapper {
    fn type_name(&self) -> &str {
        "ValueWrapper"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn wrapped_value(&self) -> Option<AnyValue> {
        Some(self.inner.clone())
    }
}
