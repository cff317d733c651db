//! Typed fact values.

use crate::extension::{ComparableValue, EquatableValue};
use std::fmt;

/// A typed fact value.
///
/// The four built-in kinds carry native equality and ordering. The two
/// extension kinds wrap externally defined values registered with an
/// [`AnswerTypeRegistry`](crate::AnswerTypeRegistry): `Comparable` values
/// support the full operator set, `Equatable` values only equality.
///
/// Answers are immutable value types; cloning an extension answer shares
/// the wrapped value.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Comparable(ComparableValue),
    Equatable(EquatableValue),
}

impl Answer {
    /// A short name for this answer's kind, for diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Answer::Bool(_) => "bool",
            Answer::Int(_) => "int",
            Answer::Double(_) => "double",
            Answer::String(_) => "string",
            Answer::Comparable(value) => value.type_name(),
            Answer::Equatable(value) => value.type_name(),
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Answer::Bool(value)
    }
}

impl From<i32> for Answer {
    fn from(value: i32) -> Self {
        Answer::Int(i64::from(value))
    }
}

impl From<i64> for Answer {
    fn from(value: i64) -> Self {
        Answer::Int(value)
    }
}

impl From<f64> for Answer {
    fn from(value: f64) -> Self {
        Answer::Double(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::String(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::String(value)
    }
}

impl From<ComparableValue> for Answer {
    fn from(value: ComparableValue) -> Self {
        Answer::Comparable(value)
    }
}

impl From<EquatableValue> for Answer {
    fn from(value: EquatableValue) -> Self {
        Answer::Equatable(value)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Bool(value) => write!(f, "{}", value),
            Answer::Int(value) => write!(f, "{}", value),
            Answer::Double(value) => write!(f, "{}", value),
            Answer::String(value) => write!(f, "\"{}\"", value),
            Answer::Comparable(value) => write!(f, "{}", value),
            Answer::Equatable(value) => write!(f, "{}", value),
        }
    }
}
