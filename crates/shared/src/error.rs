//! Error types for Atrium

use thiserror::Error;

/// Error raised when a catalog definition cannot be loaded or is malformed
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate module id '{module_id}' in catalog")]
    DuplicateModule { module_id: String },

    #[error("Duplicate action id '{action_id}' in module '{module_id}'")]
    DuplicateAction {
        module_id: String,
        action_id: String,
    },

    #[error("Unsupported catalog file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// General Atrium error type
#[derive(Debug, Error)]
pub enum AccessError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AccessError>;
