//! Error types for schema synthesis, registry loading and document encoding.

use std::path::PathBuf;
use thiserror::Error;

use crate::describe::UnsupportedKind;

/// Errors raised while synthesizing schemas or assembling a document.
///
/// Every variant describes a defect in the caller's model types. None of them
/// is recoverable by retrying: the offending type has to be fixed.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("unsupported type kind `{kind}` at {path}")]
    Unsupported { kind: UnsupportedKind, path: String },

    #[error("expected a record at {path}, got {actual}")]
    NotARecord { path: String, actual: String },

    #[error("header `{name}` at {path} must be scalar, got {actual}")]
    NonScalarHeader {
        name: String,
        path: String,
        actual: String,
    },
}

impl SynthesisError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors while reading registries or annotation key files.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            LoadError::InvalidJson { .. } | LoadError::InvalidYaml { .. } => 2,
        }
    }
}

/// Errors while encoding a finished document to text.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("cannot encode document as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot encode document as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
