//! Schema nodes produced by the synthesizer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The fixed set of primitive schema type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Boolean,
    String,
    Integer,
    Number,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::String => "string",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Number => "number",
        }
    }
}

/// Permitted extra keys of an object schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// Shape of a schema node. Exactly one shape is populated per node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaKind {
    Boolean,
    String,
    Integer,
    Number,
    Object {
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        properties: IndexMap<String, Schema>,
        #[serde(
            rename = "additionalProperties",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        additional_properties: Option<AdditionalProperties>,
    },
    Array {
        items: Box<Schema>,
    },
}

/// One node of a synthesized schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(flatten)]
    pub kind: SchemaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Schema {
    pub fn primitive(primitive: PrimitiveType) -> Self {
        let kind = match primitive {
            PrimitiveType::Boolean => SchemaKind::Boolean,
            PrimitiveType::String => SchemaKind::String,
            PrimitiveType::Integer => SchemaKind::Integer,
            PrimitiveType::Number => SchemaKind::Number,
        };
        Self {
            kind,
            description: None,
        }
    }

    pub fn object(properties: IndexMap<String, Schema>) -> Self {
        Self {
            kind: SchemaKind::Object {
                properties,
                additional_properties: None,
            },
            description: None,
        }
    }

    /// Object with no fixed properties whose values all follow `value`.
    pub fn map(value: Schema) -> Self {
        Self {
            kind: SchemaKind::Object {
                properties: IndexMap::new(),
                additional_properties: Some(AdditionalProperties::Schema(Box::new(value))),
            },
            description: None,
        }
    }

    /// Object accepting any keys; stands in for values without type information.
    pub fn open_object() -> Self {
        Self {
            kind: SchemaKind::Object {
                properties: IndexMap::new(),
                additional_properties: Some(AdditionalProperties::Allowed(true)),
            },
            description: None,
        }
    }

    pub fn array(items: Schema) -> Self {
        Self {
            kind: SchemaKind::Array {
                items: Box::new(items),
            },
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Primitive type name, or `None` for objects and arrays.
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self.kind {
            SchemaKind::Boolean => Some(PrimitiveType::Boolean),
            SchemaKind::String => Some(PrimitiveType::String),
            SchemaKind::Integer => Some(PrimitiveType::Integer),
            SchemaKind::Number => Some(PrimitiveType::Number),
            SchemaKind::Object { .. } | SchemaKind::Array { .. } => None,
        }
    }

    /// Fixed properties of an object schema.
    pub fn properties(&self) -> Option<&IndexMap<String, Schema>> {
        match &self.kind {
            SchemaKind::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&Schema> {
        match &self.kind {
            SchemaKind::Array { items } => Some(items),
            _ => None,
        }
    }

    pub fn additional_properties(&self) -> Option<&AdditionalProperties> {
        match &self.kind {
            SchemaKind::Object {
                additional_properties,
                ..
            } => additional_properties.as_ref(),
            _ => None,
        }
    }

    /// Type name as written in the document.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            SchemaKind::Object { .. } => "object",
            SchemaKind::Array { .. } => "array",
            _ => self.primitive_type().map_or("object", |p| p.as_str()),
        }
    }
}
