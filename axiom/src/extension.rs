//! Externally supplied answer values.
//!
//! Host applications plug custom fact-value types into the engine at two
//! capability levels: equality only ([`EquatableValue`]), or equality plus
//! ordering ([`ComparableValue`]). Values are erased behind an `Arc` so
//! answers stay cheap to clone; the wire payload travels through the
//! wrapped type's own `Serialize` implementation.

use serde::Serialize;
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Object-safe view of an equality-only extension value.
trait ErasedEquatable: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_value(&self, other: &dyn Any) -> bool;
    fn encode(&self) -> Result<serde_json::Value, serde_json::Error>;
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Object-safe view of an ordered extension value.
trait ErasedComparable: ErasedEquatable {
    fn cmp_value(&self, other: &dyn Any) -> Option<Ordering>;
}

struct Erased<T>(T);

impl<T> ErasedEquatable for Erased<T>
where
    T: PartialEq + Serialize + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn eq_value(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().map_or(false, |other| self.0 == *other)
    }

    fn encode(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.0)
    }

    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl<T> ErasedComparable for Erased<T>
where
    T: PartialEq + PartialOrd + Serialize + fmt::Debug + Send + Sync + 'static,
{
    fn cmp_value(&self, other: &dyn Any) -> Option<Ordering> {
        other.downcast_ref::<T>().and_then(|other| self.0.partial_cmp(other))
    }
}

/// An externally defined answer value supporting only equality.
#[derive(Clone)]
pub struct EquatableValue {
    type_name: Arc<str>,
    value: Arc<dyn ErasedEquatable>,
}

impl EquatableValue {
    /// Wrap a value under the given registry type name.
    pub fn new<T>(type_name: impl Into<Arc<str>>, value: T) -> Self
    where
        T: PartialEq + Serialize + fmt::Debug + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            value: Arc::new(Erased(value)),
        }
    }

    /// The registry name of this value's type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Borrow the wrapped value if it is a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref()
    }

    pub(crate) fn encode_payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        self.value.encode()
    }
}

impl PartialEq for EquatableValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.value.eq_value(other.value.as_any())
    }
}

impl fmt::Debug for EquatableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        self.value.fmt_value(f)?;
        f.write_str(")")
    }
}

impl fmt::Display for EquatableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt_value(f)
    }
}

/// An externally defined answer value supporting equality and ordering.
#[derive(Clone)]
pub struct ComparableValue {
    type_name: Arc<str>,
    value: Arc<dyn ErasedComparable>,
}

impl ComparableValue {
    /// Wrap a value under the given registry type name.
    pub fn new<T>(type_name: impl Into<Arc<str>>, value: T) -> Self
    where
        T: PartialEq + PartialOrd + Serialize + fmt::Debug + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            value: Arc::new(Erased(value)),
        }
    }

    /// The registry name of this value's type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Borrow the wrapped value if it is a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref()
    }

    pub(crate) fn encode_payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        self.value.encode()
    }
}

impl PartialEq for ComparableValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.value.eq_value(other.value.as_any())
    }
}

impl PartialOrd for ComparableValue {
    /// Ordering is defined only between values of the same registered type.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.type_name != other.type_name {
            return None;
        }
        self.value.cmp_value(other.value.as_any())
    }
}

impl fmt::Debug for ComparableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        self.value.fmt_value(f)?;
        f.write_str(")")
    }
}

impl fmt::Display for ComparableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt_value(f)
    }
}
