//! The answer-type registry.
//!
//! Maps a type name to the decode half of an extension answer codec; the
//! encode half travels with each value. Create one registry at process
//! start, register every extension type the application uses, then treat
//! it as read-only: registration is not safe to race with concurrent
//! decodes or with itself.

use crate::error::CodecError;
use crate::extension::{ComparableValue, EquatableValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Decodes a wire payload into a comparable extension value.
pub type ComparableDecoder =
    Box<dyn Fn(&Value) -> Result<ComparableValue, CodecError> + Send + Sync>;

/// Decodes a wire payload into an equality-only extension value.
pub type EquatableDecoder =
    Box<dyn Fn(&Value) -> Result<EquatableValue, CodecError> + Send + Sync>;

enum Decoder {
    Comparable(ComparableDecoder),
    Equatable(EquatableDecoder),
}

impl Decoder {
    fn capability(&self) -> &'static str {
        match self {
            Decoder::Comparable(_) => "comparable",
            Decoder::Equatable(_) => "equatable",
        }
    }
}

/// Registry of externally supplied answer types, keyed by name.
///
/// Registering a name already in use silently replaces the prior mapping
/// (last write wins); callers are responsible for name uniqueness.
#[derive(Default)]
pub struct AnswerTypeRegistry {
    decoders: HashMap<String, Decoder>,
}

impl AnswerTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a comparable type whose wire payload is its serde form.
    pub fn register_comparable<T>(&mut self, name: impl Into<String>)
    where
        T: DeserializeOwned
            + Serialize
            + PartialEq
            + PartialOrd
            + fmt::Debug
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        let type_name: Arc<str> = Arc::from(name.as_str());
        self.register_comparable_with(
            name,
            Box::new(move |payload| {
                let value: T = decode_payload(&type_name, payload)?;
                Ok(ComparableValue::new(type_name.clone(), value))
            }),
        );
    }

    /// Register a comparable type with a hand-written decoder.
    pub fn register_comparable_with(&mut self, name: impl Into<String>, decoder: ComparableDecoder) {
        self.decoders
            .insert(name.into(), Decoder::Comparable(decoder));
    }

    /// Register an equality-only type whose wire payload is its serde
    /// form.
    pub fn register_equatable<T>(&mut self, name: impl Into<String>)
    where
        T: DeserializeOwned + Serialize + PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        let name = name.into();
        let type_name: Arc<str> = Arc::from(name.as_str());
        self.register_equatable_with(
            name,
            Box::new(move |payload| {
                let value: T = decode_payload(&type_name, payload)?;
                Ok(EquatableValue::new(type_name.clone(), value))
            }),
        );
    }

    /// Register an equality-only type with a hand-written decoder.
    pub fn register_equatable_with(&mut self, name: impl Into<String>, decoder: EquatableDecoder) {
        self.decoders.insert(name.into(), Decoder::Equatable(decoder));
    }

    /// Remove a mapping. Returns whether the name was registered.
    pub fn deregister(&mut self, name: &str) -> bool {
        self.decoders.remove(name).is_some()
    }

    /// Whether a type is registered under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.decoders.contains_key(name)
    }

    pub(crate) fn decode_comparable(
        &self,
        name: &str,
        payload: &Value,
    ) -> Result<ComparableValue, CodecError> {
        match self.decoders.get(name) {
            Some(Decoder::Comparable(decode)) => decode(payload),
            Some(other) => Err(CodecError::CapabilityMismatch {
                type_name: name.to_string(),
                registered: other.capability(),
                declared: "comparable",
            }),
            None => Err(CodecError::UnregisteredAnswerType(name.to_string())),
        }
    }

    pub(crate) fn decode_equatable(
        &self,
        name: &str,
        payload: &Value,
    ) -> Result<EquatableValue, CodecError> {
        match self.decoders.get(name) {
            Some(Decoder::Equatable(decode)) => decode(payload),
            Some(other) => Err(CodecError::CapabilityMismatch {
                type_name: name.to_string(),
                registered: other.capability(),
                declared: "equatable",
            }),
            None => Err(CodecError::UnregisteredAnswerType(name.to_string())),
        }
    }
}

impl fmt::Debug for AnswerTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("AnswerTypeRegistry")
            .field("types", &names)
            .finish()
    }
}

fn decode_payload<T: DeserializeOwned>(type_name: &str, payload: &Value) -> Result<T, CodecError> {
    serde_json::from_value(payload.clone()).map_err(|source| CodecError::ExtensionPayload {
        type_name: type_name.to_string(),
        source,
    })
}
