//! Key/value map representation of project entries
//!
//! Property types and commands are stored in the project document as plain
//! JSON objects. Key order is preserved so that saved documents stay stable
//! across round trips.

use serde_json::{Map, Value};

/// JSON object form of a single document entry
pub type KeyValueMap = Map<String, Value>;

/// Conversion between a model value and its document entry
pub trait KeyValueEntry: Sized {
    /// Flatten the value into a document entry
    fn to_key_value_map(&self) -> KeyValueMap;

    /// Rebuild a value from a document entry
    fn from_key_value_map(map: &KeyValueMap) -> serde_json::Result<Self>;

    /// Rebuild a value from a document entry that may not be an object
    fn from_entry(entry: &Value) -> serde_json::Result<Self> {
        match entry {
            Value::Object(map) => Self::from_key_value_map(map),
            other => Err(serde::de::Error::custom(format!(
                "expected an object, found {other}"
            ))),
        }
    }
}

/// Serialize a value that is known to be a struct into its object form
pub(crate) fn to_object<T: serde::Serialize>(value: &T) -> KeyValueMap {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::warn!("Expected a JSON object for document entry, got {other}");
            KeyValueMap::new()
        }
        Err(e) => {
            tracing::warn!("Failed to serialize document entry: {e}");
            KeyValueMap::new()
        }
    }
}
