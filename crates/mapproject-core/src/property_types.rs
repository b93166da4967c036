//! Custom property types
//!
//! A project can define its own property types: enums (a fixed list of
//! values, optionally combinable as flags) and classes (a named group of
//! members with default values). The project file stores each type as a
//! JSON object tagged by a `"type"` key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::key_value::{to_object, KeyValueEntry, KeyValueMap};

fn default_true() -> bool {
    true
}

fn default_class_color() -> String {
    "#ffa0a0a4".to_string()
}

fn default_use_as() -> Vec<String> {
    vec!["property".to_string()]
}

fn default_member_type() -> String {
    "string".to_string()
}

/// How enum values are stored in properties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// The value name is stored
    #[default]
    String,
    /// The value index (or flag bits) is stored
    Int,
}

/// Enum property type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    /// How values are stored in properties
    #[serde(default)]
    pub storage_type: StorageType,

    /// Value names in index order
    #[serde(default)]
    pub values: Vec<String>,

    /// Values can be combined as bit flags
    #[serde(default)]
    pub values_as_flags: bool,
}

/// A member of a class property type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMember {
    /// Member name, unique within the class
    pub name: String,

    /// Value type name ("string", "int", "class", ...)
    #[serde(rename = "type", default = "default_member_type")]
    pub value_type: String,

    /// Default value of the member
    #[serde(default)]
    pub value: Value,

    /// Name of the custom property type, for enum and class members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
}

/// Class property type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassType {
    /// Display color as #AARRGGBB
    #[serde(default = "default_class_color")]
    pub color: String,

    /// Objects of this class are drawn filled
    #[serde(default = "default_true")]
    pub draw_fill: bool,

    /// Object kinds this class may be used for
    #[serde(default = "default_use_as")]
    pub use_as: Vec<String>,

    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<ClassMember>,
}

impl Default for ClassType {
    fn default() -> Self {
        Self {
            color: default_class_color(),
            draw_fill: true,
            use_as: default_use_as(),
            members: Vec::new(),
        }
    }
}

/// Kind-specific part of a property type
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyTypeKind {
    /// A fixed list of values
    Enum(EnumType),
    /// A named group of members
    Class(ClassType),
}

impl PropertyTypeKind {
    /// Value of the `"type"` key in the document
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyTypeKind::Enum(_) => "enum",
            PropertyTypeKind::Class(_) => "class",
        }
    }
}

/// A custom property type definition
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyType {
    /// Identifier, unique within the project
    pub id: u32,
    /// Name shown in the editor and referenced by class members
    pub name: String,
    /// Enum or class specific data
    pub kind: PropertyTypeKind,
}

/// Fields shared by all property type entries
#[derive(Deserialize)]
struct EntryHeader {
    #[serde(default)]
    id: u32,

    #[serde(default)]
    name: String,

    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl PropertyType {
    /// Create an enum type with string storage
    pub fn new_enum(id: u32, name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: PropertyTypeKind::Enum(EnumType {
                values,
                ..EnumType::default()
            }),
        }
    }

    /// Create a class type with the given members
    pub fn new_class(id: u32, name: impl Into<String>, members: Vec<ClassMember>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: PropertyTypeKind::Class(ClassType {
                members,
                ..ClassType::default()
            }),
        }
    }

    /// Whether this is an enum type
    pub fn is_enum(&self) -> bool {
        matches!(self.kind, PropertyTypeKind::Enum(_))
    }

    /// Whether this is a class type
    pub fn is_class(&self) -> bool {
        matches!(self.kind, PropertyTypeKind::Class(_))
    }
}

impl KeyValueEntry for PropertyType {
    fn to_key_value_map(&self) -> KeyValueMap {
        let mut map = KeyValueMap::new();
        map.insert("id".to_string(), Value::from(self.id));
        map.insert("name".to_string(), Value::from(self.name.clone()));
        map.insert("type".to_string(), Value::from(self.kind.type_name()));

        let body = match &self.kind {
            PropertyTypeKind::Enum(enum_type) => to_object(enum_type),
            PropertyTypeKind::Class(class_type) => to_object(class_type),
        };
        map.extend(body);

        map
    }

    fn from_key_value_map(map: &KeyValueMap) -> serde_json::Result<Self> {
        let value = Value::Object(map.clone());
        let header = EntryHeader::deserialize(&value)?;

        // Types written before classes existed carry no "type" key
        let kind = match header.kind.as_deref().unwrap_or("enum") {
            "enum" => PropertyTypeKind::Enum(EnumType::deserialize(&value)?),
            "class" => PropertyTypeKind::Class(ClassType::deserialize(&value)?),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "unknown property type kind '{other}'"
                )))
            }
        };

        Ok(Self {
            id: header.id,
            name: header.name,
            kind,
        })
    }
}
