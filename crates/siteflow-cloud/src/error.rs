//! Cloud declaration error types

use thiserror::Error;

/// Resource declaration errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Resource already declared: {0}")]
    DuplicateResource(String),

    #[error("Resource {resource} references undeclared resource {target}")]
    DanglingReference { resource: String, target: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
