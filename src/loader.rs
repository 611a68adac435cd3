//! Registry and annotation-key loading from files and strings.
//!
//! Files ending in `.json` are parsed as JSON; anything else as YAML.
//! Enum values in YAML are single-key maps (`record: {..}`), the same shape
//! the JSON files use.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::LoadError;
use crate::registry::Api;
use crate::types::AnnotationKeys;

/// Load an endpoint registry from a file.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist, or a parse
/// error if its contents don't describe a registry.
pub fn load_registry(path: &Path) -> Result<Api, LoadError> {
    load_file(path)
}

/// Load annotation keys from a file. Keys missing from the file keep their
/// defaults.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist, or a parse
/// error if its contents are malformed.
pub fn load_keys(path: &Path) -> Result<AnnotationKeys, LoadError> {
    load_file(path)
}

/// Parse a registry from a YAML (or JSON) string.
///
/// # Errors
///
/// Returns `LoadError::InvalidYaml` if the string isn't a valid registry.
pub fn load_registry_str(content: &str) -> Result<Api, LoadError> {
    from_yaml(content).map_err(|source| LoadError::InvalidYaml {
        path: "<string>".into(),
        source,
    })
}

fn from_yaml<T: DeserializeOwned>(content: &str) -> Result<T, serde_yaml::Error> {
    serde_yaml::with::singleton_map_recursive::deserialize(serde_yaml::Deserializer::from_str(
        content,
    ))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    if is_json(path) {
        serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })
    } else {
        from_yaml(&content).map_err(|source| LoadError::InvalidYaml {
            path: path.to_path_buf(),
            source,
        })
    }
}
