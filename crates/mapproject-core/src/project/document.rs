//! On-disk project document
//!
//! The document mirrors the JSON file field for field. All paths in it are
//! relative to the directory containing the file; conversion to and from the
//! in-memory [`Project`](super::Project) happens in the project module.
//!
//! Reading is lenient: any well-formed JSON loads. A missing, `null` or
//! wrong-typed field takes its default value, and a root that is not an
//! object reads as an empty document.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ProjectError, Result};

/// Extensions directory used when the document does not name one
pub const DEFAULT_EXTENSIONS_DIR: &str = "extensions";

fn default_extensions_path() -> String {
    DEFAULT_EXTENSIONS_DIR.to_string()
}

/// Read a field, falling back to `T::default()` when it has the wrong type
fn or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn extensions_path_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(path) => Ok(path),
        _ => Ok(default_extensions_path()),
    }
}

/// Folder list; entries that are not strings read as `""`
fn folders_or_default<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::String(folder) => folder,
                _ => String::new(),
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// Output style of saved documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Human-readable, one field per line
    #[default]
    Indented,
    /// Single line without whitespace
    Compact,
}

/// Serialized form of a project
///
/// Field order here is the order fields are written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    /// Property type entries, each expected to be an object
    #[serde(default, deserialize_with = "or_default")]
    pub property_types: Vec<Value>,

    /// Content folders; `"."` is the project directory
    #[serde(default, deserialize_with = "folders_or_default")]
    pub folders: Vec<String>,

    /// Directory holding scripted extensions
    #[serde(
        default = "default_extensions_path",
        deserialize_with = "extensions_path_or_default"
    )]
    pub extensions_path: String,

    /// Empty when no object types file is referenced
    #[serde(default, deserialize_with = "or_default")]
    pub object_types_file: String,

    /// Empty when no automapping rules file is referenced
    #[serde(default, deserialize_with = "or_default")]
    pub automapping_rules_file: String,

    /// Command entries, each expected to be an object
    #[serde(default, deserialize_with = "or_default")]
    pub commands: Vec<Value>,
}

impl Default for ProjectDocument {
    fn default() -> Self {
        Self {
            property_types: Vec::new(),
            folders: Vec::new(),
            extensions_path: default_extensions_path(),
            object_types_file: String::new(),
            automapping_rules_file: String::new(),
            commands: Vec::new(),
        }
    }
}

impl ProjectDocument {
    /// Encode the document as UTF-8 JSON
    pub fn to_bytes(&self, format: DocumentFormat) -> Result<Vec<u8>> {
        match format {
            DocumentFormat::Indented => {
                let mut bytes = serde_json::to_vec_pretty(self).map_err(ProjectError::Serialize)?;
                bytes.push(b'\n');
                Ok(bytes)
            }
            DocumentFormat::Compact => serde_json::to_vec(self).map_err(ProjectError::Serialize),
        }
    }

    /// Decode a document read from `path`
    ///
    /// Only malformed JSON is an error ([`ProjectError::Parse`]).
    pub fn from_slice(bytes: &[u8], path: &Path) -> Result<Self> {
        let parse_error = |source| ProjectError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let value: Value = serde_json::from_slice(bytes).map_err(parse_error)?;
        if !value.is_object() {
            tracing::warn!(
                "Project document {} is not a JSON object, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        serde_json::from_value(value).map_err(parse_error)
    }
}
