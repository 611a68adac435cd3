//! Core types shared by the synthesizer, the extractor and the assembler.

use serde::{Deserialize, Serialize};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_XML: &str = "application/xml";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";
pub const CONTENT_TYPE_HTML: &str = "text/html";

/// OpenAPI version written into every assembled document.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// Annotation value meaning "not bound at this location".
pub const UNBOUND: &str = "-";

/// Where an out-of-body parameter travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Query,
    Header,
    Cookie,
}

impl Location {
    /// All binding locations, in the order parameters are emitted.
    pub const ALL: [Location; 3] = [Location::Query, Location::Header, Location::Cookie];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Query => "query",
            Location::Header => "header",
            Location::Cookie => "cookie",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural kind of a synthesized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralKind {
    Scalar,
    Sequence,
    Record,
    Map,
}

impl StructuralKind {
    /// Whether a parameter of this kind is described through a content body
    /// rather than a plain schema.
    pub fn is_structured(&self) -> bool {
        matches!(self, StructuralKind::Record | StructuralKind::Map)
    }
}

/// Names of the field annotations read during synthesis and extraction.
///
/// Field metadata is a set of named annotations; these keys decide which
/// annotation carries the wire name, each binding location and the
/// description. Missing keys in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationKeys {
    /// Annotation holding the serialized field name.
    pub name: String,
    pub query: String,
    pub header: String,
    pub cookie: String,
    pub description: String,
}

impl Default for AnnotationKeys {
    fn default() -> Self {
        Self {
            name: "json".to_string(),
            query: "query".to_string(),
            header: "header".to_string(),
            cookie: "cookie".to_string(),
            description: "description".to_string(),
        }
    }
}

impl AnnotationKeys {
    /// Returns the annotation key that binds a field to `location`.
    pub fn location_key(&self, location: Location) -> &str {
        match location {
            Location::Query => &self.query,
            Location::Header => &self.header,
            Location::Cookie => &self.cookie,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_keys_follow_config() {
        let keys = AnnotationKeys {
            query: "q".into(),
            ..AnnotationKeys::default()
        };
        assert_eq!(keys.location_key(Location::Query), "q");
        assert_eq!(keys.location_key(Location::Header), "header");
        assert_eq!(keys.location_key(Location::Cookie), "cookie");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let keys: AnnotationKeys = serde_json::from_str(r#"{"name": "serde"}"#).unwrap();
        assert_eq!(keys.name, "serde");
        assert_eq!(keys.description, "description");
    }

    #[test]
    fn structured_kinds() {
        assert!(StructuralKind::Record.is_structured());
        assert!(StructuralKind::Map.is_structured());
        assert!(!StructuralKind::Scalar.is_structured());
        assert!(!StructuralKind::Sequence.is_structured());
    }

    #[test]
    fn location_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Location::Cookie).unwrap(), r#""cookie""#);
    }
}
