//! Questions name the facts a predicate depends on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, string-identified handle naming a fact to look up.
///
/// Questions are immutable; equality and hashing follow the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question(String);

impl Question {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier this question looks up.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Question {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Question {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
